//! Stencil IR - data model for the template compiler
//!
//! This crate contains the types every compiler phase agrees on:
//! - Template names, kinds and target languages
//! - Parameter declarations
//! - The parse event stream produced by `stencil_parse`
//! - HTML interception records
//! - Generated unit naming and the generated unit itself
//! - Dependency sets recorded by the orchestrator
//!
//! # Design Philosophy
//!
//! - **Cheap clones**: `TemplateName` is an `Arc<str>`, so names can key
//!   several concurrent maps without copying.
//! - **Borrowed events**: `ParseEvent` borrows from the template source, the
//!   parser never allocates for text or code runs.
//! - **Identity by name**: a `ClassDefinition` is equal to another when their
//!   generated identifiers match, regardless of content.

mod dependency;
mod event;
mod html;
mod name;
mod param;
mod unit;

pub use dependency::DependencySet;
pub use event::{CallKind, EventKind, ParseEvent};
pub use html::{is_void_element, HtmlAttribute, HtmlConfig, HtmlTag, VOID_ELEMENTS};
pub use name::{TargetLanguage, TemplateKind, TemplateName, LAYOUT_DIRECTORY, TAG_DIRECTORY};
pub use param::ParamInfo;
pub use unit::{
    ClassDefinition, ClassInfo, LineMap, CLASS_PREFIX, CLASS_SUFFIX, DEFAULT_PACKAGE,
};
