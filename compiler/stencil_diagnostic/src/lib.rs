//! Diagnostic system for the template compiler.
//!
//! - [`ErrorCode`]: searchable identifier, first digit is the phase
//! - [`Diagnostic`]: one located problem (template name + 1-based line)
//! - [`TemplateError`]: what a compile request fails with
//!
//! # Recovery
//!
//! Parse-level problems (malformed `@param`, unterminated constructs,
//! unbalanced directives) are collected as [`Diagnostic`]s and surfaced
//! together in [`TemplateError::Parse`]. Everything else aborts the current
//! compile request.

mod diagnostic;
mod error;
mod error_code;

pub use diagnostic::{Diagnostic, Location, Severity};
pub use error::{BindingProblem, TemplateError};
pub use error_code::ErrorCode;
