//! Code generation for stencil templates.
//!
//! Turns the parser's event stream into one generated unit per template:
//! a Rust module or a Kotlin object exposing a `render` function.
//!
//! # Architecture
//!
//! ```text
//! template source
//!        ↓
//!   stencil_parse::Parser ── events ──▶ CodeGenerator ──▶ ClassDefinition
//!                                         │   (code + line map + binary payload)
//!                                         ├─ Dialect        (Rust or Kotlin syntax)
//!                                         ├─ CalleeResolver (tags/layouts it calls)
//!                                         └─ HtmlHook       (optional)
//! ```

mod builder;
mod callee;
mod config;
pub mod dialect;
mod generator;
mod hook;
pub mod literal;

pub use builder::CodeBuilder;
pub use callee::{CallRef, Callee, CalleeResolver};
pub use config::{GeneratorConfig, DEFAULT_MAX_LITERAL_LEN};
pub use dialect::{dialect_for, Dialect, KotlinDialect, RustDialect};
pub use generator::CodeGenerator;
pub use hook::HtmlHook;

use stencil_diagnostic::TemplateError;
use stencil_ir::{ClassDefinition, ClassInfo};

/// Parse `source` and generate the unit described by `info`.
pub fn generate_unit(
    source: &str,
    info: ClassInfo,
    config: &GeneratorConfig,
    resolver: &mut dyn CalleeResolver,
    hook: Option<&dyn HtmlHook>,
) -> Result<ClassDefinition, TemplateError> {
    let kind = info.kind();
    let mut generator = CodeGenerator::new(info, kind, config, resolver, hook);
    stencil_parse::parse(source, kind, config.html.as_ref(), &mut generator);
    generator.finish()
}
