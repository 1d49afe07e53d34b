//! Parse events.
//!
//! The parser turns template text into a flat stream of [`ParseEvent`]s.
//! Text and code runs borrow from the template source; only the few
//! variants that the parser has to assemble (tag names, parameter records,
//! HTML tag snapshots) own their data.
//!
//! # Nesting depth
//!
//! Every event carries the depth at which it was emitted. Entering a `Text`
//! scope increments the depth, leaving it decrements it, and a `@define`
//! block adds a further offset of two. The code generator derives its
//! indentation from this value alone.

use crate::{HtmlAttribute, HtmlTag, ParamInfo};

/// One event with its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseEvent<'src> {
    /// Nesting depth at the point of emission.
    pub depth: u32,
    /// 1-based template line the event was emitted on.
    pub line: u32,
    pub kind: EventKind<'src>,
}

/// Whether a call site refers to a tag or a layout.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CallKind {
    Tag,
    Layout,
}

impl CallKind {
    /// Keyword the call is written with.
    pub fn keyword(self) -> &'static str {
        match self {
            CallKind::Tag => "@tag",
            CallKind::Layout => "@layout",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind<'src> {
    /// Literal text between constructs.
    Text(&'src str),
    /// `${expr}`, written escaped.
    SafeCode(&'src str),
    /// `$unsafe{expr}`, written raw.
    UnsafeCode(&'src str),
    /// `!{stmt}`
    CodeStatement(&'src str),
    /// `@import path`
    Import(&'src str),
    /// `@param name: Type = default`
    Param(ParamInfo),
    ConditionStart(&'src str),
    ConditionElseIf(&'src str),
    ConditionElse,
    ConditionEnd,
    /// Loop header without the surrounding parentheses.
    ForStart(&'src str),
    ForEnd,
    /// `@tag.name(args)`; `name` is the dotted reference with spaces removed.
    TagCall { name: String, args: Vec<&'src str> },
    /// `@layout.name(args)`, opens a region closed by `LayoutEnd`.
    LayoutCall { name: String, args: Vec<&'src str> },
    /// `@render(slot)` inside a layout.
    LayoutRender(&'src str),
    /// `@define(slot)` inside a layout call.
    LayoutDefine(&'src str),
    LayoutDefineEnd,
    LayoutEnd,
    HtmlTagOpened(HtmlTag),
    HtmlTagClosed(HtmlTag),
    /// Emitted right after the opening quote of an intercepted attribute.
    HtmlAttributeStarted {
        tag: HtmlTag,
        attribute: HtmlAttribute,
    },
    LineFinished,
    /// All `Param`/`Import` events have been emitted.
    ParamsComplete,
    Complete,
}

impl EventKind<'_> {
    /// Whether the event belongs to the declaration header.
    ///
    /// Header events may precede `ParamsComplete`; any other event forces it.
    pub fn is_header(&self) -> bool {
        matches!(
            self,
            EventKind::Param(_)
                | EventKind::Import(_)
                | EventKind::LineFinished
                | EventKind::ParamsComplete
        )
    }
}
