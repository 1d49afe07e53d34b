//! How the generator learns about the units it calls.

use std::sync::Arc;

use stencil_diagnostic::TemplateError;
use stencil_ir::{CallKind, ClassInfo, ParamInfo, TemplateKind, TemplateName};

/// A `@tag`/`@layout` reference found while generating `caller`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRef {
    pub caller: TemplateName,
    /// Template line of the reference.
    pub line: u32,
    pub kind: CallKind,
    /// Resolved callee name, e.g. `tag/forms/input.stn`.
    pub name: TemplateName,
}

impl CallRef {
    /// Resolve the dotted reference `dotted` against the caller's extension.
    pub fn new(caller: &TemplateName, line: u32, kind: CallKind, dotted: &str) -> Self {
        let template_kind = match kind {
            CallKind::Tag => TemplateKind::Tag,
            CallKind::Layout => TemplateKind::Layout,
        };
        let extension = caller
            .extension()
            .unwrap_or_else(|| stencil_ir::TargetLanguage::Rust.template_extension());
        CallRef {
            caller: caller.clone(),
            line,
            kind,
            name: TemplateName::for_call(template_kind, dotted, extension),
        }
    }
}

/// What a call site needs to know about its callee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Callee {
    pub info: ClassInfo,
    /// Declared parameters in declaration order.
    pub params: Arc<[ParamInfo]>,
}

/// Supplies callees to the generator, generating them on demand.
///
/// Implemented by the orchestrator: resolving a callee may recursively parse
/// and generate it into the same batch.
pub trait CalleeResolver {
    fn resolve_callee(&mut self, call: &CallRef) -> Result<Callee, TemplateError>;

    /// `name` has finished its header; `params` is its full parameter list.
    ///
    /// Sent before any body event, so a unit that calls itself can bind its
    /// own arguments.
    fn params_declared(&mut self, name: &TemplateName, params: &[ParamInfo]);
}
