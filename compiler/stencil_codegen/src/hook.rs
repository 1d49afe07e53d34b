//! Pluggable HTML interception hook.
//!
//! The hook runs at generation time. Whatever it writes is baked into the
//! generated unit as literal text at the point of the event, e.g. a hidden
//! CSRF field right before `</form>`.

use stencil_ir::HtmlAttribute;
use stencil_runtime::TemplateOutput;

pub trait HtmlHook: Send + Sync {
    /// Just before the `>` (or `/>`) of an intercepted tag, so anything
    /// written lands inside the tag.
    fn on_tag_opened(
        &self,
        _name: &str,
        _attributes: &[HtmlAttribute],
        _output: &mut dyn TemplateOutput,
    ) {
    }

    /// Right after the opening quote of the intercepted attribute `_name`
    /// inside tag `_tag`. `_attributes` are the tag's attributes so far.
    fn on_attribute_started(
        &self,
        _tag: &str,
        _name: &str,
        _attributes: &[HtmlAttribute],
        _output: &mut dyn TemplateOutput,
    ) {
    }

    /// Before the `</name` of an intercepted tag.
    fn on_tag_closed(&self, _name: &str, _output: &mut dyn TemplateOutput) {}
}
