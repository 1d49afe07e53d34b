//! One Kotlin source file per unit.

use std::path::{Path, PathBuf};

use stencil_ir::{ClassDefinition, TargetLanguage};

use super::{
    write_binary_parts, write_file, write_manifest, BackendFailure, BackendOutput,
    CompilerBackend,
};

/// Writes `<package path>/<unit>.kt` files for an external Kotlin build.
#[derive(Clone, Debug)]
pub struct KotlinSourcesBackend {
    output_dir: PathBuf,
}

impl KotlinSourcesBackend {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        KotlinSourcesBackend {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl CompilerBackend for KotlinSourcesBackend {
    fn compile(
        &self,
        units: &[ClassDefinition],
        class_path: &[PathBuf],
    ) -> Result<BackendOutput, BackendFailure> {
        let mut files = Vec::with_capacity(units.len() + 1);
        for unit in units {
            let path = self.output_dir.join(unit.info.source_file_name());
            write_file(&path, &unit.code)?;
            files.push(path);
        }
        write_binary_parts(&self.output_dir, units, &mut files)?;
        files.push(write_manifest(
            &self.output_dir,
            TargetLanguage::Kotlin,
            units,
            |unit| unit.info.source_file_name(),
        )?);

        tracing::debug!(
            units = units.len(),
            class_path = class_path.len(),
            path = %self.output_dir.display(),
            "kotlin sources written"
        );
        Ok(BackendOutput { files })
    }
}
