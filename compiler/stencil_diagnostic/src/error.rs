//! Compile request failures.

use std::fmt::{self, Write as _};
use std::io;

use stencil_ir::{TargetLanguage, TemplateName};
use thiserror::Error;

use crate::{Diagnostic, ErrorCode, Location};

/// Why a call site's arguments could not be bound to the callee's parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindingProblem {
    MissingRequired { param: String },
    UnknownName { name: String },
    Duplicate { param: String },
    TooMany { expected: usize, found: usize },
}

impl BindingProblem {
    pub fn code(&self) -> ErrorCode {
        match self {
            BindingProblem::MissingRequired { .. } => ErrorCode::E2002,
            BindingProblem::UnknownName { .. } => ErrorCode::E2003,
            BindingProblem::Duplicate { .. } => ErrorCode::E2004,
            BindingProblem::TooMany { .. } => ErrorCode::E2005,
        }
    }
}

impl fmt::Display for BindingProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingProblem::MissingRequired { param } => {
                write!(f, "missing required argument `{param}`")
            }
            BindingProblem::UnknownName { name } => write!(f, "no parameter named `{name}`"),
            BindingProblem::Duplicate { param } => {
                write!(f, "parameter `{param}` is bound more than once")
            }
            BindingProblem::TooMany { expected, found } => {
                write!(f, "expected at most {expected} argument(s), found {found}")
            }
        }
    }
}

/// Error returned by a compile request.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("{name} not found{}", referenced_suffix(.referenced_from.as_ref()))]
    TemplateNotFound {
        name: TemplateName,
        referenced_from: Option<Location>,
    },

    #[error("failed to read {name}: {source}")]
    Io {
        name: TemplateName,
        #[source]
        source: io::Error,
    },

    #[error("{}", render_diagnostics(.template, .diagnostics))]
    Parse {
        template: TemplateName,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("{location}: missing required argument `{param}` for {callee}")]
    MissingRequiredArgument {
        location: Location,
        callee: TemplateName,
        param: String,
    },

    #[error("{location}: invalid arguments for {callee}: {problem}")]
    InvalidArguments {
        location: Location,
        callee: TemplateName,
        problem: BindingProblem,
    },

    #[error("{second} and {first} both generate `{identifier}`")]
    IdentifierCollision {
        identifier: String,
        first: TemplateName,
        second: TemplateName,
    },

    #[error("a batch must target a single language, found {}", join_kinds(.kinds))]
    MixedUnitKindsUnsupported { kinds: Vec<TargetLanguage> },

    #[error("{}", render_backend(.diagnostics))]
    BackendCompilationFailed { diagnostics: Vec<Diagnostic> },

    #[error("failed to write generated output: {0}")]
    BackendIo(#[source] io::Error),

    #[error("failed to list templates: {0}")]
    ListTemplates(#[source] io::Error),
}

impl TemplateError {
    /// Error code for the failure, if it has a single one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            TemplateError::TemplateNotFound { .. } => Some(ErrorCode::E2001),
            TemplateError::MissingRequiredArgument { .. } => Some(ErrorCode::E2002),
            TemplateError::InvalidArguments { problem, .. } => Some(problem.code()),
            TemplateError::IdentifierCollision { .. } => Some(ErrorCode::E2006),
            TemplateError::MixedUnitKindsUnsupported { .. } => Some(ErrorCode::E3001),
            TemplateError::BackendCompilationFailed { .. } => Some(ErrorCode::E3002),
            TemplateError::Io { .. }
            | TemplateError::Parse { .. }
            | TemplateError::BackendIo(_)
            | TemplateError::ListTemplates(_) => None,
        }
    }

    /// Build the error for a failed argument binding.
    pub fn binding(location: Location, callee: TemplateName, problem: BindingProblem) -> Self {
        match problem {
            BindingProblem::MissingRequired { param } => TemplateError::MissingRequiredArgument {
                location,
                callee,
                param,
            },
            problem => TemplateError::InvalidArguments {
                location,
                callee,
                problem,
            },
        }
    }

    /// Diagnostics carried by the error, if any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            TemplateError::Parse { diagnostics, .. }
            | TemplateError::BackendCompilationFailed { diagnostics } => diagnostics,
            _ => &[],
        }
    }
}

fn referenced_suffix(location: Option<&Location>) -> String {
    location.map_or_else(String::new, |location| {
        format!(", referenced at {location}")
    })
}

fn render_diagnostics(template: &TemplateName, diagnostics: &[Diagnostic]) -> String {
    let mut out = format!("{template} failed to parse");
    for diagnostic in diagnostics {
        let _ = write!(out, "\n  {diagnostic}");
    }
    out
}

fn render_backend(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::from("failed to compile generated units");
    for diagnostic in diagnostics {
        let _ = write!(out, "\n  {diagnostic}");
    }
    out
}

fn join_kinds(kinds: &[TargetLanguage]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
