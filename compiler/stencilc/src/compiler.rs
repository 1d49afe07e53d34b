//! Dependency-tracked compile orchestration.
//!
//! # Architecture
//!
//! ```text
//! generate(names)
//!   └─ for each name: generate_into(name)
//!        ├─ recursion guard: name already in the batch? done
//!        │                   identifier taken by another name? error
//!        ├─ CodeResolver::resolve(name)
//!        ├─ stencil_codegen::generate_unit(source, BatchContext)
//!        │     └─ @tag/@layout ─▶ BatchContext::resolve_callee
//!        │                          └─ generate_into(callee)   (recursive)
//!        └─ unit appended to the batch (callees before callers)
//!   └─ dependencies[name] = transitive closure of direct references
//! ```
//!
//! # Shared state
//!
//! A [`TemplateCompiler`] is shared by every compile request of a process.
//! Per-request state lives in a `BatchState` on the caller's stack; the
//! caches that outlive a request are `DashMap`s, so requests for unrelated
//! names never contend on a global lock. Two threads compiling the same name
//! at once may both generate it; the results are identical.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use rustc_hash::FxHashMap;
use stencil_codegen::{CallRef, Callee, CalleeResolver, GeneratorConfig};
use stencil_diagnostic::{Diagnostic, ErrorCode, Location, TemplateError};
use stencil_ir::{ClassDefinition, ClassInfo, DependencySet, ParamInfo, TargetLanguage, TemplateName};

use crate::backend::{BackendDiagnostic, BackendFailure, BackendKind, CompilerBackend};
use crate::{CodeResolver, CompilerConfig};

/// Minimum stack left before a nested callee is generated.
const RED_ZONE: usize = 100 * 1024;

/// Stack allocated when the red zone is hit.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Units produced by one compile request, callees before their callers.
#[derive(Clone, Debug, Default)]
pub struct Batch {
    units: Vec<ClassDefinition>,
}

impl Batch {
    pub fn units(&self) -> &[ClassDefinition] {
        &self.units
    }

    pub fn into_units(self) -> Vec<ClassDefinition> {
        self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Unit with the given generated identifier.
    pub fn unit(&self, identifier: &str) -> Option<&ClassDefinition> {
        self.units.iter().find(|unit| unit.identifier() == identifier)
    }

    /// Unit generated from `name`.
    pub fn unit_for(&self, name: &TemplateName) -> Option<&ClassDefinition> {
        self.units.iter().find(|unit| unit.template() == name)
    }

    /// The single target language of the batch, `None` when it is empty.
    pub fn target(&self) -> Result<Option<TargetLanguage>, TemplateError> {
        let mut kinds: Vec<TargetLanguage> =
            self.units.iter().map(|unit| unit.info.target).collect();
        kinds.sort();
        kinds.dedup();
        match kinds.as_slice() {
            [] => Ok(None),
            [target] => Ok(Some(*target)),
            _ => Err(TemplateError::MixedUnitKindsUnsupported { kinds }),
        }
    }

    /// Map a backend diagnostic onto its template line.
    fn translate(&self, diagnostic: &BackendDiagnostic) -> Diagnostic {
        match self.unit(&diagnostic.identifier) {
            Some(unit) => {
                let line = unit
                    .line_map
                    .template_line(diagnostic.generated_line)
                    .unwrap_or(1);
                Diagnostic::error(ErrorCode::E3002, line, diagnostic.message.clone())
                    .with_template(unit.template().clone())
            }
            None => Diagnostic::error(
                ErrorCode::E3002,
                0,
                format!("{}: {}", diagnostic.identifier, diagnostic.message),
            ),
        }
    }
}

/// State of one compile request.
#[derive(Default)]
struct BatchState {
    units: Vec<ClassDefinition>,
    /// Identifier and target reserved for each name before it is parsed.
    generated: FxHashMap<(String, TargetLanguage), TemplateName>,
    /// Names each template references directly.
    direct_refs: FxHashMap<TemplateName, DependencySet>,
    /// Parameter lists declared during this request.
    params: FxHashMap<TemplateName, Arc<[ParamInfo]>>,
}

impl BatchState {
    /// Every name reachable from `name` through direct references.
    fn closure(&self, name: &TemplateName) -> DependencySet {
        let mut dependencies = DependencySet::new();
        let mut pending = vec![name];
        while let Some(current) = pending.pop() {
            let Some(refs) = self.direct_refs.get(current) else {
                continue;
            };
            for referenced in refs {
                if dependencies.insert(referenced.clone()) {
                    pending.push(referenced);
                }
            }
        }
        dependencies
    }
}

/// Process-wide template compiler.
pub struct TemplateCompiler {
    config: CompilerConfig,
    generator: GeneratorConfig,
    resolver: Arc<dyn CodeResolver>,
    /// Transitive references of each top-level requested name.
    dependencies: DashMap<TemplateName, DependencySet>,
    /// Declared parameters of every generated template.
    param_order: DashMap<TemplateName, Arc<[ParamInfo]>>,
    /// Generated identifier to unit naming.
    units: DashMap<String, ClassInfo>,
    /// Top-level names whose last output is out of date.
    stale: DashSet<TemplateName>,
}

impl TemplateCompiler {
    pub fn new(resolver: Arc<dyn CodeResolver>, config: CompilerConfig) -> Self {
        TemplateCompiler {
            generator: config.generator(),
            config,
            resolver,
            dependencies: DashMap::new(),
            param_order: DashMap::new(),
            units: DashMap::new(),
            stale: DashSet::new(),
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Arc<dyn CodeResolver> {
        &self.resolver
    }

    /// Parse and generate `names` and everything they reference.
    pub fn generate(&self, names: &[TemplateName]) -> Result<Batch, TemplateError> {
        let _span = tracing::debug_span!("generate", templates = names.len()).entered();
        let mut state = BatchState::default();
        for name in names {
            self.generate_into(name, None, &mut state)?;
            let dependencies = state.closure(name);
            tracing::trace!(template = %name, dependencies = dependencies.len(), "dependencies recorded");
            self.dependencies.insert(name.clone(), dependencies);
        }
        for name in names {
            self.stale.remove(name);
        }
        tracing::debug!(units = state.units.len(), "batch generated");
        Ok(Batch { units: state.units })
    }

    /// [`generate`](Self::generate) every name the resolver lists.
    pub fn generate_all(&self) -> Result<Batch, TemplateError> {
        let names = self
            .resolver
            .list_all_names()
            .map_err(TemplateError::ListTemplates)?;
        self.generate(&names)
    }

    /// Generate `names` and hand the batch to the configured backend.
    pub fn precompile(&self, names: &[TemplateName]) -> Result<Batch, TemplateError> {
        let batch = self.generate(names)?;
        let Some(target) = batch.target()? else {
            return Ok(batch);
        };
        let kind = self
            .config
            .backend
            .unwrap_or_else(|| BackendKind::for_target(target));
        let backend = kind.create(&self.config.output_dir);
        self.compile_batch(batch, backend.as_ref())
    }

    /// [`precompile`](Self::precompile) every name the resolver lists.
    pub fn precompile_all(&self) -> Result<Batch, TemplateError> {
        let names = self
            .resolver
            .list_all_names()
            .map_err(TemplateError::ListTemplates)?;
        self.precompile(&names)
    }

    /// Like [`precompile`](Self::precompile) with an explicit backend.
    pub fn precompile_with(
        &self,
        names: &[TemplateName],
        backend: &dyn CompilerBackend,
    ) -> Result<Batch, TemplateError> {
        let batch = self.generate(names)?;
        if batch.target()?.is_none() {
            return Ok(batch);
        }
        self.compile_batch(batch, backend)
    }

    fn compile_batch(
        &self,
        batch: Batch,
        backend: &dyn CompilerBackend,
    ) -> Result<Batch, TemplateError> {
        let _span = tracing::debug_span!("backend", units = batch.len()).entered();
        match backend.compile(batch.units(), &self.config.class_path) {
            Ok(output) => {
                tracing::debug!(files = output.files.len(), "backend finished");
                Ok(batch)
            }
            Err(BackendFailure::Io(error)) => Err(TemplateError::BackendIo(error)),
            Err(BackendFailure::Diagnostics(diagnostics)) => {
                Err(TemplateError::BackendCompilationFailed {
                    diagnostics: diagnostics
                        .iter()
                        .map(|diagnostic| batch.translate(diagnostic))
                        .collect(),
                })
            }
        }
    }

    /// Whether `name` or anything it depends on changed since `name` was
    /// last requested.
    pub fn has_changed(&self, name: &TemplateName) -> bool {
        if self.stale.contains(name) || self.resolver.has_changed(name) {
            return true;
        }
        self.dependencies.get(name).is_some_and(|dependencies| {
            dependencies
                .iter()
                .any(|dependency| self.resolver.has_changed(dependency))
        })
    }

    /// Top-level templates whose output depends on `name`, sorted.
    pub fn templates_using(&self, name: &TemplateName) -> Vec<TemplateName> {
        let mut using: Vec<TemplateName> = self
            .dependencies
            .iter()
            .filter(|entry| entry.value().contains(name))
            .map(|entry| entry.key().clone())
            .collect();
        using.sort();
        using
    }

    /// Mark `name` and every top-level template using it changed until each
    /// of them is requested again.
    pub fn invalidate(&self, name: &TemplateName) {
        tracing::debug!(template = %name, "invalidated");
        self.stale.insert(name.clone());
        self.mark_users_stale(name);
        self.param_order.remove(name);
    }

    fn mark_users_stale(&self, name: &TemplateName) {
        for user in self.templates_using(name) {
            self.stale.insert(user);
        }
    }

    /// Transitive references recorded when `name` was last requested.
    pub fn dependencies_of(&self, name: &TemplateName) -> Option<DependencySet> {
        self.dependencies.get(name).map(|entry| entry.value().clone())
    }

    /// Declared parameters of `name`, if it has been generated.
    pub fn params_of(&self, name: &TemplateName) -> Option<Arc<[ParamInfo]>> {
        self.param_order.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Naming of a generated unit by identifier.
    pub fn unit_info(&self, identifier: &str) -> Option<ClassInfo> {
        self.units.get(identifier).map(|entry| entry.value().clone())
    }

    fn generate_into(
        &self,
        name: &TemplateName,
        referenced_from: Option<Location>,
        state: &mut BatchState,
    ) -> Result<ClassInfo, TemplateError> {
        let info = ClassInfo::new(name, &self.config.package_name);
        let identifier = info.identifier();
        match state.generated.entry((identifier.clone(), info.target)) {
            Entry::Occupied(entry) if entry.get() == name => {
                tracing::trace!(template = %name, "already in batch");
                return Ok(info);
            }
            Entry::Occupied(entry) => {
                return Err(TemplateError::IdentifierCollision {
                    identifier,
                    first: entry.get().clone(),
                    second: name.clone(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(name.clone());
            }
        }

        let _span = tracing::debug_span!("unit", template = %name).entered();
        let changed = self.resolver.has_changed(name);
        let source = self
            .resolver
            .resolve(name)
            .map_err(|source| TemplateError::Io {
                name: name.clone(),
                source,
            })?
            .ok_or_else(|| TemplateError::TemplateNotFound {
                name: name.clone(),
                referenced_from,
            })?;
        // The resolver forgets the change once resolved; users outside this
        // batch still hold the old output.
        if changed {
            self.mark_users_stale(name);
        }

        let unit = {
            let mut context = BatchContext {
                compiler: self,
                state: &mut *state,
            };
            stencil_codegen::generate_unit(
                &source,
                info.clone(),
                &self.generator,
                &mut context,
                self.config.html_hook.as_deref(),
            )?
        };
        self.units.insert(identifier, info.clone());
        state.units.push(unit);
        Ok(info)
    }
}

/// Feeds callees to the generator of one unit, generating them into the
/// same batch on first reference.
struct BatchContext<'c, 's> {
    compiler: &'c TemplateCompiler,
    state: &'s mut BatchState,
}

impl CalleeResolver for BatchContext<'_, '_> {
    fn resolve_callee(&mut self, call: &CallRef) -> Result<Callee, TemplateError> {
        self.state
            .direct_refs
            .entry(call.caller.clone())
            .or_default()
            .insert(call.name.clone());

        let referenced_from = Location::new(call.caller.clone(), call.line);
        let compiler = self.compiler;
        let state = &mut *self.state;
        let info = stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
            compiler.generate_into(&call.name, Some(referenced_from), state)
        })?;

        let params = self
            .state
            .params
            .get(&call.name)
            .cloned()
            .or_else(|| self.compiler.params_of(&call.name))
            .unwrap_or_else(|| Arc::from(Vec::new()));
        Ok(Callee { info, params })
    }

    fn params_declared(&mut self, name: &TemplateName, params: &[ParamInfo]) {
        let params: Arc<[ParamInfo]> = Arc::from(params);
        self.state.params.insert(name.clone(), Arc::clone(&params));
        self.compiler.param_order.insert(name.clone(), params);
    }
}
