//! Event consumers.

use stencil_diagnostic::Diagnostic;
use stencil_ir::ParseEvent;

/// Receives the parser's events and diagnostics, in source order.
pub trait Visitor<'src> {
    fn visit(&mut self, event: ParseEvent<'src>);

    /// A recoverable problem; parsing continues afterwards.
    fn error(&mut self, diagnostic: Diagnostic);
}

/// Visitor that records everything it is given.
#[derive(Debug, Default)]
pub struct EventCollector<'src> {
    pub events: Vec<ParseEvent<'src>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'src> EventCollector<'src> {
    pub fn new() -> Self {
        EventCollector {
            events: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

impl<'src> Visitor<'src> for EventCollector<'src> {
    fn visit(&mut self, event: ParseEvent<'src>) {
        self.events.push(event);
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
