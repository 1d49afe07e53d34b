//! Where template sources come from.
//!
//! The orchestrator calls [`CodeResolver::resolve`] once per name per compile
//! request. Resolvers track change state so a hot-reload watcher can ask
//! [`TemplateCompiler::has_changed`] whether a template must be recompiled.
//!
//! [`TemplateCompiler::has_changed`]: crate::TemplateCompiler::has_changed

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use dashmap::{DashMap, DashSet};
use stencil_ir::{TargetLanguage, TemplateName};

/// Source lookup consumed by the orchestrator.
pub trait CodeResolver: Send + Sync {
    /// Text of `name`, or `None` if there is no such template.
    fn resolve(&self, name: &TemplateName) -> io::Result<Option<String>>;

    /// Whether `name` changed since it was last resolved.
    fn has_changed(&self, name: &TemplateName) -> bool;

    /// Every template this resolver can serve.
    fn list_all_names(&self) -> io::Result<Vec<TemplateName>>;
}

/// In-memory sources.
///
/// A name reports changed from [`insert`](Self::insert) until its next
/// [`resolve`](CodeResolver::resolve).
#[derive(Debug, Default)]
pub struct MemoryCodeResolver {
    sources: DashMap<TemplateName, String>,
    changed: DashSet<TemplateName>,
}

impl MemoryCodeResolver {
    pub fn new() -> Self {
        MemoryCodeResolver::default()
    }

    #[must_use]
    pub fn with_template(self, name: impl Into<TemplateName>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn insert(&self, name: impl Into<TemplateName>, source: impl Into<String>) {
        let name = name.into();
        self.changed.insert(name.clone());
        self.sources.insert(name, source.into());
    }

    /// Forget `name`. Returns whether it was present.
    pub fn remove(&self, name: &TemplateName) -> bool {
        self.changed.insert(name.clone());
        self.sources.remove(name).is_some()
    }
}

impl CodeResolver for MemoryCodeResolver {
    fn resolve(&self, name: &TemplateName) -> io::Result<Option<String>> {
        let source = self.sources.get(name).map(|source| source.clone());
        self.changed.remove(name);
        Ok(source)
    }

    fn has_changed(&self, name: &TemplateName) -> bool {
        self.changed.contains(name)
    }

    fn list_all_names(&self) -> io::Result<Vec<TemplateName>> {
        let mut names: Vec<TemplateName> =
            self.sources.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        Ok(names)
    }
}

/// Templates stored below a root directory, named by their relative path.
///
/// Change detection compares modification times against the time recorded
/// at the last resolve. A name that was never resolved counts as changed.
#[derive(Debug)]
pub struct DirectoryCodeResolver {
    root: PathBuf,
    modified: DashMap<TemplateName, SystemTime>,
}

impl DirectoryCodeResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryCodeResolver {
            root: root.into(),
            modified: DashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &TemplateName) -> PathBuf {
        self.root.join(name.as_str())
    }

    fn collect(&self, dir: &Path, names: &mut Vec<TemplateName>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                self.collect(&path, names)?;
            } else if is_template_file(&path) {
                if let Ok(relative) = path.strip_prefix(&self.root) {
                    let name: Vec<_> = relative
                        .iter()
                        .map(|segment| segment.to_string_lossy())
                        .collect();
                    names.push(TemplateName::new(name.join("/")));
                }
            }
        }
        Ok(())
    }
}

fn is_template_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
        ext == TargetLanguage::Rust.template_extension()
            || ext == TargetLanguage::Kotlin.template_extension()
    })
}

fn modified_time(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

impl CodeResolver for DirectoryCodeResolver {
    fn resolve(&self, name: &TemplateName) -> io::Result<Option<String>> {
        let path = self.path_of(name);
        match fs::read_to_string(&path) {
            Ok(source) => {
                if let Ok(modified) = modified_time(&path) {
                    self.modified.insert(name.clone(), modified);
                }
                Ok(Some(source))
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    fn has_changed(&self, name: &TemplateName) -> bool {
        let Some(last) = self.modified.get(name).map(|entry| *entry) else {
            return true;
        };
        modified_time(&self.path_of(name)).map_or(true, |modified| modified != last)
    }

    fn list_all_names(&self) -> io::Result<Vec<TemplateName>> {
        let mut names = Vec::new();
        self.collect(&self.root, &mut names)?;
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests;
