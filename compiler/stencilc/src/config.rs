//! Compiler configuration.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use stencil_codegen::{GeneratorConfig, HtmlHook, DEFAULT_MAX_LITERAL_LEN};
use stencil_ir::{HtmlConfig, DEFAULT_PACKAGE};

use crate::backend::BackendKind;

/// Directory backends write to when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "stencil-generated";

/// Settings shared by every compile request of one [`TemplateCompiler`].
///
/// [`TemplateCompiler`]: crate::TemplateCompiler
#[derive(Clone)]
pub struct CompilerConfig {
    /// Root package of generated units, dot separated.
    pub package_name: String,
    /// Tags and attributes handed to the HTML hook.
    pub html: Option<HtmlConfig>,
    pub html_hook: Option<Arc<dyn HtmlHook>>,
    /// Text runs longer than this many bytes go to the binary payload.
    pub binary_text_threshold: Option<usize>,
    pub max_literal_len: usize,
    pub output_dir: PathBuf,
    /// Extra backend inputs, passed through untouched.
    pub class_path: Vec<PathBuf>,
    /// Backend override. By default the batch's target language decides.
    pub backend: Option<BackendKind>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            package_name: DEFAULT_PACKAGE.to_string(),
            html: None,
            html_hook: None,
            binary_text_threshold: None,
            max_literal_len: DEFAULT_MAX_LITERAL_LEN,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            class_path: Vec::new(),
            backend: None,
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        CompilerConfig::default()
    }

    #[must_use]
    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = package_name.into();
        self
    }

    #[must_use]
    pub fn with_html(mut self, html: HtmlConfig) -> Self {
        self.html = Some(html);
        self
    }

    #[must_use]
    pub fn with_html_hook(mut self, hook: Arc<dyn HtmlHook>) -> Self {
        self.html_hook = Some(hook);
        self
    }

    #[must_use]
    pub fn with_binary_text_threshold(mut self, threshold: usize) -> Self {
        self.binary_text_threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn with_max_literal_len(mut self, max_literal_len: usize) -> Self {
        self.max_literal_len = max_literal_len.max(1);
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    #[must_use]
    pub fn with_class_path(mut self, class_path: Vec<PathBuf>) -> Self {
        self.class_path = class_path;
        self
    }

    #[must_use]
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = Some(backend);
        self
    }

    /// The subset the code generator needs.
    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            html: self.html.clone(),
            binary_text_threshold: self.binary_text_threshold,
            max_literal_len: self.max_literal_len,
        }
    }
}

impl fmt::Debug for CompilerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilerConfig")
            .field("package_name", &self.package_name)
            .field("html", &self.html)
            .field("html_hook", &self.html_hook.is_some())
            .field("binary_text_threshold", &self.binary_text_threshold)
            .field("max_literal_len", &self.max_literal_len)
            .field("output_dir", &self.output_dir)
            .field("class_path", &self.class_path)
            .field("backend", &self.backend)
            .finish()
    }
}
