//! Compiler backends.
//!
//! A backend takes a homogeneous batch of generated units and turns it into
//! something loadable. Both built-in backends write files; a backend that
//! runs a real compiler reports failures as [`BackendDiagnostic`]s against
//! generated lines, which the orchestrator maps back to template lines.
//!
//! # Output layout
//!
//! ```text
//! <output_dir>/
//!   stencil_templates.rs                  RustBundle: every unit, nested per package
//!   stencil/generated/tag/StncardGenerated.kt   KotlinSources: one file per unit
//!   stencil/generated/tag/StncardGenerated.bin  binary text payload, if any
//!   stencil-manifest.json                 template names and line maps
//! ```

mod kotlin;
mod rust;

pub use kotlin::KotlinSourcesBackend;
pub use rust::{RustBundleBackend, BUNDLE_FILE};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use stencil_ir::{ClassDefinition, LineMap, TargetLanguage, TemplateName};

/// File name of the build manifest.
pub const MANIFEST_FILE: &str = "stencil-manifest.json";

/// Built-in backend selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    RustBundle,
    KotlinSources,
}

impl BackendKind {
    pub fn for_target(target: TargetLanguage) -> Self {
        match target {
            TargetLanguage::Rust => BackendKind::RustBundle,
            TargetLanguage::Kotlin => BackendKind::KotlinSources,
        }
    }

    /// Instantiate the backend writing below `output_dir`.
    pub fn create(self, output_dir: &Path) -> Box<dyn CompilerBackend> {
        match self {
            BackendKind::RustBundle => Box::new(RustBundleBackend::new(output_dir)),
            BackendKind::KotlinSources => Box::new(KotlinSourcesBackend::new(output_dir)),
        }
    }
}

pub trait CompilerBackend: Send + Sync {
    /// Compile one batch. `units` all share a target language.
    fn compile(
        &self,
        units: &[ClassDefinition],
        class_path: &[PathBuf],
    ) -> Result<BackendOutput, BackendFailure>;
}

/// What a successful backend run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackendOutput {
    pub files: Vec<PathBuf>,
}

/// A problem reported against a generated unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendDiagnostic {
    /// Identifier of the unit, see [`stencil_ir::ClassInfo::identifier`].
    pub identifier: String,
    /// 1-based line in the generated code.
    pub generated_line: u32,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendFailure {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("backend reported {} problem(s)", .0.len())]
    Diagnostics(Vec<BackendDiagnostic>),
}

#[derive(Serialize)]
struct Manifest<'a> {
    target: TargetLanguage,
    units: Vec<ManifestUnit<'a>>,
}

#[derive(Serialize)]
struct ManifestUnit<'a> {
    identifier: String,
    template: &'a TemplateName,
    source_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    binary_file: Option<String>,
    line_map: &'a LineMap,
}

/// Write `contents` to `path`, creating parent directories.
fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

/// Write each unit's binary payload next to where its loader expects it.
fn write_binary_parts(
    output_dir: &Path,
    units: &[ClassDefinition],
    files: &mut Vec<PathBuf>,
) -> io::Result<()> {
    for unit in units.iter().filter(|unit| unit.has_binary_content()) {
        let path = output_dir.join(unit.info.binary_file_name());
        write_file(&path, unit.binary_content())?;
        files.push(path);
    }
    Ok(())
}

fn write_manifest(
    output_dir: &Path,
    target: TargetLanguage,
    units: &[ClassDefinition],
    source_file: impl Fn(&ClassDefinition) -> String,
) -> io::Result<PathBuf> {
    let manifest = Manifest {
        target,
        units: units
            .iter()
            .map(|unit| ManifestUnit {
                identifier: unit.identifier(),
                template: unit.template(),
                source_file: source_file(unit),
                binary_file: unit
                    .has_binary_content()
                    .then(|| unit.info.binary_file_name()),
                line_map: &unit.line_map,
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&manifest).map_err(io::Error::from)?;
    let path = output_dir.join(MANIFEST_FILE);
    write_file(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests;
