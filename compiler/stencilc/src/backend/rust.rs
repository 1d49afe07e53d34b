//! Single-file Rust bundle.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use stencil_ir::{ClassDefinition, TargetLanguage};

use super::{
    write_binary_parts, write_file, write_manifest, BackendFailure, BackendOutput,
    CompilerBackend,
};

/// File name of the bundle, meant to be `include!`d at a crate root.
pub const BUNDLE_FILE: &str = "stencil_templates.rs";

/// Writes every unit into one file, nested in `pub mod` blocks per package
/// segment so that `crate::<package>::<unit>` paths resolve.
#[derive(Clone, Debug)]
pub struct RustBundleBackend {
    output_dir: PathBuf,
}

impl RustBundleBackend {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        RustBundleBackend {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl CompilerBackend for RustBundleBackend {
    fn compile(
        &self,
        units: &[ClassDefinition],
        _class_path: &[PathBuf],
    ) -> Result<BackendOutput, BackendFailure> {
        let mut tree = ModuleTree::default();
        for unit in units {
            tree.insert(&unit.info.package, unit);
        }
        let mut bundle = String::from("// @generated by stencil. Do not edit.\n");
        tree.write(&mut bundle, 0);

        let mut files = Vec::new();
        let bundle_path = self.output_dir.join(BUNDLE_FILE);
        write_file(&bundle_path, bundle)?;
        files.push(bundle_path);
        write_binary_parts(&self.output_dir, units, &mut files)?;
        files.push(write_manifest(
            &self.output_dir,
            TargetLanguage::Rust,
            units,
            |_| BUNDLE_FILE.to_string(),
        )?);

        tracing::debug!(
            units = units.len(),
            path = %self.output_dir.display(),
            "rust bundle written"
        );
        Ok(BackendOutput { files })
    }
}

#[derive(Default)]
struct ModuleTree<'a> {
    units: Vec<&'a ClassDefinition>,
    children: BTreeMap<&'a str, ModuleTree<'a>>,
}

impl<'a> ModuleTree<'a> {
    fn insert(&mut self, package: &'a [String], unit: &'a ClassDefinition) {
        match package.split_first() {
            Some((segment, rest)) => self
                .children
                .entry(segment.as_str())
                .or_default()
                .insert(rest, unit),
            None => self.units.push(unit),
        }
    }

    /// Unit code is copied verbatim; re-indenting it could alter multi-line
    /// string literals in user statements.
    fn write(&self, out: &mut String, depth: usize) {
        let indent = "    ".repeat(depth);
        for unit in &self.units {
            out.push('\n');
            out.push_str(&unit.code);
        }
        for (segment, child) in &self.children {
            out.push('\n');
            out.push_str(&format!("{indent}pub mod {segment} {{\n"));
            child.write(out, depth + 1);
            out.push_str(&format!("{indent}}}\n"));
        }
    }
}
