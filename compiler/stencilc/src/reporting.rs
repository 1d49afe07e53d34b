//! Terminal rendering of compile errors.
//!
//! Errors that point at a template line are rendered as `ariadne` reports
//! with a snippet of that line; everything else is a single `error:` line.

use std::io::{self, Write};
use std::ops::Range;

use ariadne::{Config, Label, Report, ReportKind, Source};
use stencil_diagnostic::{Diagnostic, ErrorCode, Location, TemplateError};
use stencil_ir::TemplateName;

/// A message anchored to one template line.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Snippet {
    code: ErrorCode,
    template: TemplateName,
    line: u32,
    message: String,
}

impl Snippet {
    fn at(code: ErrorCode, location: &Location, message: String) -> Self {
        Snippet {
            code,
            template: location.template.clone(),
            line: location.line,
            message,
        }
    }

    fn from_diagnostic(diagnostic: &Diagnostic) -> Option<Self> {
        Some(Snippet {
            code: diagnostic.code,
            template: diagnostic.template.clone()?,
            line: diagnostic.line,
            message: diagnostic.message.clone(),
        })
    }
}

/// Renders [`TemplateError`]s, looking template sources up on demand.
pub struct Reporter<'a> {
    source: &'a dyn Fn(&TemplateName) -> Option<String>,
    color: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(source: &'a dyn Fn(&TemplateName) -> Option<String>) -> Self {
        Reporter {
            source,
            color: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn write(&self, error: &TemplateError, out: &mut dyn Write) -> io::Result<()> {
        let snippets = snippets(error);
        if snippets.is_empty() {
            return writeln!(out, "error: {error}");
        }
        for diagnostic in error.diagnostics() {
            if diagnostic.template.is_none() {
                writeln!(out, "error: {diagnostic}")?;
            }
        }
        for snippet in &snippets {
            self.write_snippet(snippet, out)?;
        }
        Ok(())
    }

    fn write_snippet(&self, snippet: &Snippet, out: &mut dyn Write) -> io::Result<()> {
        let Some(source) = (self.source)(&snippet.template) else {
            return writeln!(
                out,
                "error[{}]: {}:{}: {}",
                snippet.code, snippet.template, snippet.line, snippet.message
            );
        };
        let id = snippet.template.as_str();
        let span = line_span(&source, snippet.line);
        Report::build(ReportKind::Error, id, span.start)
            .with_code(snippet.code)
            .with_message(snippet.code.title())
            .with_label(Label::new((id, span)).with_message(&snippet.message))
            .with_config(Config::default().with_color(self.color))
            .finish()
            .write((id, Source::from(source)), out)
    }
}

fn snippets(error: &TemplateError) -> Vec<Snippet> {
    match error {
        TemplateError::Parse { diagnostics, .. }
        | TemplateError::BackendCompilationFailed { diagnostics } => diagnostics
            .iter()
            .filter_map(Snippet::from_diagnostic)
            .collect(),
        TemplateError::TemplateNotFound {
            name,
            referenced_from: Some(location),
        } => vec![Snippet::at(
            ErrorCode::E2001,
            location,
            format!("{name} not found"),
        )],
        TemplateError::MissingRequiredArgument {
            location,
            callee,
            param,
        } => vec![Snippet::at(
            ErrorCode::E2002,
            location,
            format!("missing required argument `{param}` for {callee}"),
        )],
        TemplateError::InvalidArguments {
            location,
            callee,
            problem,
        } => vec![Snippet::at(
            problem.code(),
            location,
            format!("{problem} (calling {callee})"),
        )],
        _ => Vec::new(),
    }
}

/// Character range of 1-based `line`, without its line break.
fn line_span(source: &str, line: u32) -> Range<usize> {
    let mut start = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        let length = text.trim_end_matches(['\n', '\r']).chars().count();
        if index + 1 == line as usize {
            return start..start + length;
        }
        start += text.chars().count();
    }
    start..start
}
