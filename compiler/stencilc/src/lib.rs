//! The stencil template compiler.
//!
//! Compiles directories of templates into source code that renders them.
//! [`TemplateCompiler`] drives the parser and code generator over whatever
//! a [`CodeResolver`] serves, tracks which templates use which tags and
//! layouts, and hands finished batches to a [`CompilerBackend`].
//!
//! # Architecture
//!
//! ```text
//! CodeResolver ──source──▶ TemplateCompiler ──Batch──▶ CompilerBackend
//!  (memory, directory)       │  generate / precompile      (Rust bundle,
//!                            │  has_changed                 Kotlin sources)
//!                            └─ templates_using / invalidate
//! ```
//!
//! ```text
//! let resolver = Arc::new(DirectoryCodeResolver::new("templates"));
//! let compiler = TemplateCompiler::new(resolver, CompilerConfig::default());
//! compiler.precompile_all()?;   // writes stencil-generated/stencil_templates.rs
//! ```

pub mod backend;
pub mod commands;
mod compiler;
mod config;
pub mod reporting;
mod resolver;
pub mod tracing_setup;

pub use backend::{
    BackendDiagnostic, BackendFailure, BackendKind, BackendOutput, CompilerBackend,
    KotlinSourcesBackend, RustBundleBackend, BUNDLE_FILE, MANIFEST_FILE,
};
pub use compiler::{Batch, TemplateCompiler};
pub use config::{CompilerConfig, DEFAULT_OUTPUT_DIR};
pub use resolver::{CodeResolver, DirectoryCodeResolver, MemoryCodeResolver};
