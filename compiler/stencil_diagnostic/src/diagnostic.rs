//! Located diagnostics.

use std::fmt;

use stencil_ir::TemplateName;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A template name plus 1-based line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub template: TemplateName,
    pub line: u32,
}

impl Location {
    pub fn new(template: TemplateName, line: u32) -> Self {
        Location { template, line }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.template, self.line)
    }
}

/// One problem found while compiling a template.
///
/// The parser does not know which template it is reading, so diagnostics
/// start without a template and get one attached by whoever drives the parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub template: Option<TemplateName>,
    /// 1-based template line, 0 when no template line is known.
    pub line: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn error(code: ErrorCode, line: u32, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            template: None,
            line,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: TemplateName) -> Self {
        self.template = Some(template);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.template, self.line) {
            (Some(template), 0) => write!(f, "{template}: ")?,
            (Some(template), line) => write!(f, "{template}:{line}: ")?,
            (None, 0) => {}
            (None, line) => write!(f, "line {line}: ")?,
        }
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

#[cfg(test)]
mod tests;
