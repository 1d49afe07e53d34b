//! Runtime support for generated templates.
//!
//! Generated render functions write into a [`TemplateOutput`]. Literal text
//! goes through `write_raw`, `${...}` expressions through `write_escaped`,
//! and static text moved into binary payloads through `write_raw_bytes`.
//!
//! This crate is standalone: it does not depend on the compiler, so
//! applications that only render precompiled templates pull in nothing else.

mod html;
mod output;

pub use html::{escape_html, HtmlOutput};
pub use output::{StringOutput, TemplateOutput};
