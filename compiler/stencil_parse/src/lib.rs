//! Template parsing for the stencil compiler.
//!
//! - [`scan_param`]: one `@param` declaration into a [`ParamInfo`](stencil_ir::ParamInfo)
//! - [`bind_arguments`]: call-site arguments onto a callee's parameters
//! - [`Parser`]: the template state machine, feeding a [`Visitor`]
//!
//! ```text
//! let mut collector = EventCollector::new();
//! parse("Hello ${name}!", TemplateKind::Template, None, &mut collector);
//! // ParamsComplete, Text("Hello "), SafeCode("name"), Text("!"), Complete
//! ```

mod args;
mod param;
mod parser;
mod visitor;

pub use args::{bind_arguments, Argument, BoundArgument};
pub use param::{scan_param, ParamError};
pub use parser::Parser;
pub use visitor::{EventCollector, Visitor};

use stencil_ir::{HtmlConfig, TemplateKind};

/// Parse `source` into `visitor`.
pub fn parse<'src, V: Visitor<'src>>(
    source: &'src str,
    kind: TemplateKind,
    html: Option<&HtmlConfig>,
    visitor: &mut V,
) {
    Parser::new(source, kind, visitor).with_html(html).parse();
}

/// Parse `source` and collect its events and diagnostics.
pub fn collect_events<'src>(
    source: &'src str,
    kind: TemplateKind,
    html: Option<&HtmlConfig>,
) -> EventCollector<'src> {
    let mut collector = EventCollector::new();
    parse(source, kind, html, &mut collector);
    collector
}
