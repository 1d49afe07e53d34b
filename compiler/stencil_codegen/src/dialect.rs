//! Target-language syntax.
//!
//! The generator decides *what* to emit for each event and at which level;
//! a [`Dialect`] decides how it is spelled. Levels are absolute: the unit
//! wrapper and the render function occupy levels 0 and 1, so event depth
//! `d` is written at level `d + BODY_LEVEL`.
//!
//! # Layout slots
//!
//! A layout call passes a slot lookup callback. Each `@define` becomes one
//! branch of it, two levels deeper than the call:
//!
//! ```text
//! level d     call(args, slots {         <- LayoutCall
//! level d+1       if slot == "content"   <- LayoutDefine
//! level d+2           deferred body
//! level d+3               ...            <- events inside @define
//! level d+1       fallback               <- LayoutEnd
//! level d     })
//! ```

mod kotlin;
mod rust;

pub use kotlin::KotlinDialect;
pub use rust::RustDialect;

use stencil_ir::{ClassInfo, ParamInfo, TargetLanguage, TemplateKind};
use stencil_parse::BoundArgument;

use crate::CodeBuilder;

/// Level of depth-0 body statements.
pub const BODY_LEVEL: u32 = 2;

/// Everything the unit header depends on.
#[derive(Clone, Copy, Debug)]
pub struct UnitHeader<'a> {
    pub info: &'a ClassInfo,
    pub kind: TemplateKind,
    pub imports: &'a [String],
    pub params: &'a [ParamInfo],
    pub has_binary: bool,
}

pub trait Dialect: Sync {
    fn target(&self) -> TargetLanguage;

    /// One level of indentation.
    fn indent_unit(&self) -> &'static str;

    /// Unit wrapper, imports and the render signature, up to the opening
    /// brace of the body.
    fn prologue(&self, out: &mut CodeBuilder, header: &UnitHeader<'_>);

    /// Closes what `prologue` opened.
    fn epilogue(&self, out: &mut CodeBuilder);

    /// Write an already size-limited piece of static text.
    fn text(&self, out: &mut CodeBuilder, level: u32, text: &str);

    /// Write `start..end` of the unit's binary payload.
    fn binary_text(&self, out: &mut CodeBuilder, level: u32, start: usize, end: usize);

    /// Write the value of `expression`, HTML-escaped by the sink if `escaped`.
    fn expression(&self, out: &mut CodeBuilder, level: u32, expression: &str, escaped: bool);

    fn statement(&self, out: &mut CodeBuilder, level: u32, statement: &str);

    fn condition_start(&self, out: &mut CodeBuilder, level: u32, condition: &str);

    fn condition_else_if(&self, out: &mut CodeBuilder, level: u32, condition: &str);

    fn condition_else(&self, out: &mut CodeBuilder, level: u32);

    fn block_end(&self, out: &mut CodeBuilder, level: u32);

    fn for_start(&self, out: &mut CodeBuilder, level: u32, header: &str);

    /// Spell one bound argument.
    fn argument(&self, argument: &BoundArgument) -> String;

    fn tag_call(&self, out: &mut CodeBuilder, level: u32, callee: &ClassInfo, args: &[String]);

    /// Opens the call and its slot callback.
    fn layout_call_start(
        &self,
        out: &mut CodeBuilder,
        level: u32,
        callee: &ClassInfo,
        args: &[String],
    );

    fn define_start(&self, out: &mut CodeBuilder, level: u32, slot: &str);

    fn define_end(&self, out: &mut CodeBuilder, level: u32);

    /// Closes the slot callback. Layouts forward unknown slots to their own
    /// caller; everything else falls back to empty content.
    fn layout_call_end(&self, out: &mut CodeBuilder, level: u32, forward_slots: bool);

    /// Write the caller's content for `slot`.
    fn render_slot(&self, out: &mut CodeBuilder, level: u32, slot: &str);
}

/// Dialect for a target language.
pub fn dialect_for(target: TargetLanguage) -> &'static dyn Dialect {
    match target {
        TargetLanguage::Rust => &RustDialect,
        TargetLanguage::Kotlin => &KotlinDialect,
    }
}
