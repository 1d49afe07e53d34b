//! Template names, kinds and target languages.

use std::fmt;
use std::sync::Arc;

/// Directory prefix that marks a template as a tag.
pub const TAG_DIRECTORY: &str = "tag/";

/// Directory prefix that marks a template as a layout.
pub const LAYOUT_DIRECTORY: &str = "layout/";

/// Path-like identifier of a template, e.g. `page.stn` or `tag/card.stn`.
///
/// Names are compared and hashed by their full text, so two distinct names
/// never alias. Cloning is an `Arc` bump.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TemplateName(Arc<str>);

impl TemplateName {
    /// Create a name from its path text.
    pub fn new(name: impl AsRef<str>) -> Self {
        TemplateName(Arc::from(name.as_ref()))
    }

    /// Build the name a `@tag.`/`@layout.` reference resolves to.
    ///
    /// `dotted` is the reference as written (`my.card`), `extension` is the
    /// extension of the referencing template.
    pub fn for_call(kind: TemplateKind, dotted: &str, extension: &str) -> Self {
        let directory = match kind {
            TemplateKind::Layout => LAYOUT_DIRECTORY,
            TemplateKind::Tag | TemplateKind::Template => TAG_DIRECTORY,
        };
        let path = dotted.replace('.', "/");
        TemplateName::new(format!("{directory}{path}.{extension}"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Kind derived from the directory convention.
    pub fn kind(&self) -> TemplateKind {
        if self.0.starts_with(TAG_DIRECTORY) {
            TemplateKind::Tag
        } else if self.0.starts_with(LAYOUT_DIRECTORY) {
            TemplateKind::Layout
        } else {
            TemplateKind::Template
        }
    }

    /// Extension after the last `.` of the file name, if any.
    pub fn extension(&self) -> Option<&str> {
        let file = self.file_name();
        file.rfind('.').map(|dot| &file[dot + 1..])
    }

    /// Final path segment, extension included.
    pub fn file_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(slash) => &self.0[slash + 1..],
            None => &self.0,
        }
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        let file = self.file_name();
        match file.rfind('.') {
            Some(dot) => &file[..dot],
            None => file,
        }
    }

    /// Directory segments before the file name.
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        let dir = match self.0.rfind('/') {
            Some(slash) => &self.0[..slash],
            None => "",
        };
        dir.split('/').filter(|segment| !segment.is_empty())
    }

    /// Target language selected by the extension.
    pub fn target(&self) -> TargetLanguage {
        self.extension()
            .map_or(TargetLanguage::Rust, TargetLanguage::from_extension)
    }
}

impl fmt::Debug for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TemplateName({:?})", self.as_str())
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateName {
    fn from(name: &str) -> Self {
        TemplateName::new(name)
    }
}

impl From<String> for TemplateName {
    fn from(name: String) -> Self {
        TemplateName(Arc::from(name))
    }
}

impl AsRef<str> for TemplateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TemplateName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// What a template is used as.
///
/// Layouts receive an extra slot-lookup parameter and are the only kind in
/// which `@render` is legal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TemplateKind {
    Template,
    Tag,
    Layout,
}

impl TemplateKind {
    pub fn is_layout(self) -> bool {
        matches!(self, TemplateKind::Layout)
    }
}

/// Language generated units are written in.
///
/// This is the "unit kind" of a batch: every unit handed to one backend
/// invocation must share it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TargetLanguage {
    Rust,
    Kotlin,
}

impl TargetLanguage {
    /// Map a template extension to its target. Unknown extensions target Rust.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "kstn" => TargetLanguage::Kotlin,
            _ => TargetLanguage::Rust,
        }
    }

    /// Extension of template files targeting this language.
    pub fn template_extension(self) -> &'static str {
        match self {
            TargetLanguage::Rust => "stn",
            TargetLanguage::Kotlin => "kstn",
        }
    }

    /// Extension of generated source files.
    pub fn source_extension(self) -> &'static str {
        match self {
            TargetLanguage::Rust => "rs",
            TargetLanguage::Kotlin => "kt",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetLanguage::Rust => write!(f, "rust"),
            TargetLanguage::Kotlin => write!(f, "kotlin"),
        }
    }
}
