//! Generated units and their naming.
//!
//! # Naming convention
//!
//! ```text
//! tag/my/card-list.stn  (package root "stencil.generated")
//!   class name  StncardlistGenerated
//!   package     stencil.generated.tag.my
//!   identifier  stencil.generated.tag.my.StncardlistGenerated
//!   source file stencil/generated/tag/my/StncardlistGenerated.rs
//! ```
//!
//! Backends rely on these names being bit-exact, so they are derived in one
//! place.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{TargetLanguage, TemplateKind, TemplateName};

/// Prefix of every generated unit name.
pub const CLASS_PREFIX: &str = "Stn";

/// Suffix of every generated unit name.
pub const CLASS_SUFFIX: &str = "Generated";

/// Package root used when none is configured.
pub const DEFAULT_PACKAGE: &str = "stencil.generated";

/// Where and under which name a template's generated unit lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassInfo {
    pub name: TemplateName,
    pub class_name: String,
    /// Package segments, root first.
    pub package: Vec<String>,
    pub target: TargetLanguage,
}

impl ClassInfo {
    pub fn new(name: &TemplateName, package_root: &str) -> Self {
        let class_name = format!(
            "{CLASS_PREFIX}{}{CLASS_SUFFIX}",
            sanitize_segment(name.stem())
        );
        let package = package_root
            .split('.')
            .chain(name.directories())
            .map(sanitize_segment)
            .filter(|segment| !segment.is_empty())
            .collect();
        ClassInfo {
            name: name.clone(),
            class_name,
            package,
            target: name.target(),
        }
    }

    pub fn kind(&self) -> TemplateKind {
        self.name.kind()
    }

    /// Fully qualified, dot-separated identifier. A batch holds at most one
    /// template per identifier and target.
    pub fn identifier(&self) -> String {
        self.qualified_name(".")
    }

    /// Package segments joined by `separator`, followed by the class name.
    pub fn qualified_name(&self, separator: &str) -> String {
        let mut qualified = self.package.join(separator);
        if !qualified.is_empty() {
            qualified.push_str(separator);
        }
        qualified.push_str(&self.class_name);
        qualified
    }

    /// Path of the generated source file relative to an output root.
    pub fn source_file_name(&self) -> String {
        format!(
            "{}.{}",
            self.qualified_name("/"),
            self.target.source_extension()
        )
    }

    /// Path of the binary text payload relative to an output root.
    pub fn binary_file_name(&self) -> String {
        format!("{}.bin", self.qualified_name("/"))
    }
}

/// Strip hyphens and replace anything else that cannot appear in an
/// identifier with `_`.
fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .filter(|&c| c != '-')
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Generated line to template line mapping.
///
/// Entry `n - 1` holds the 1-based template line of generated line `n`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LineMap(Vec<u32>);

impl LineMap {
    pub fn new() -> Self {
        LineMap(Vec::new())
    }

    /// Record the template line of the next generated line.
    #[inline]
    pub fn push(&mut self, template_line: u32) {
        self.0.push(template_line);
    }

    /// Template line for a 1-based generated line.
    pub fn template_line(&self, generated_line: u32) -> Option<u32> {
        let index = usize::try_from(generated_line).ok()?.checked_sub(1)?;
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend(&mut self, other: &LineMap) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// One generated compilation unit.
///
/// Equality and hashing use the generated identifier only, so a batch can
/// treat "already generated" as set membership.
#[derive(Clone)]
pub struct ClassDefinition {
    pub info: ClassInfo,
    pub code: String,
    pub line_map: LineMap,
    /// Static text runs moved out of the source, in reference order.
    pub binary_parts: Vec<Vec<u8>>,
}

impl ClassDefinition {
    pub fn identifier(&self) -> String {
        self.info.identifier()
    }

    pub fn template(&self) -> &TemplateName {
        &self.info.name
    }

    pub fn has_binary_content(&self) -> bool {
        !self.binary_parts.is_empty()
    }

    /// All binary parts concatenated in reference order.
    pub fn binary_content(&self) -> Vec<u8> {
        self.binary_parts.concat()
    }
}

impl PartialEq for ClassDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.info.class_name == other.info.class_name && self.info.package == other.info.package
    }
}

impl Eq for ClassDefinition {}

impl Hash for ClassDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.info.package.hash(state);
        self.info.class_name.hash(state);
    }
}

impl fmt::Debug for ClassDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDefinition")
            .field("identifier", &self.identifier())
            .field("lines", &self.line_map.len())
            .field("binary_parts", &self.binary_parts.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
