//! The code generator visitor.
//!
//! # Architecture
//!
//! ```text
//! Parser ──events──▶ CodeGenerator ──writes──▶ CodeBuilder (body)
//!                      │      │
//!                      │      └─ TagCall/LayoutCall ─▶ CalleeResolver
//!                      │                              (may generate the callee)
//!                      └─ finish(): prologue + body + epilogue ─▶ ClassDefinition
//! ```
//!
//! The body is written while events arrive; the prologue needs the full
//! parameter list and whether any binary payload was produced, so it is
//! assembled last. Prologue lines map to template line 1, epilogue lines to
//! the last template line.

use stencil_diagnostic::{Diagnostic, ErrorCode, Location, TemplateError};
use stencil_ir::{
    CallKind, ClassDefinition, ClassInfo, EventKind, HtmlAttribute, ParamInfo, ParseEvent,
    TemplateKind,
};
use stencil_parse::{bind_arguments, Visitor};
use stencil_runtime::StringOutput;

use crate::dialect::{dialect_for, Dialect, UnitHeader, BODY_LEVEL};
use crate::literal::split_literal;
use crate::{CallRef, CalleeResolver, CodeBuilder, GeneratorConfig, HtmlHook};

/// Generates one unit from the events of its template.
pub struct CodeGenerator<'a> {
    info: ClassInfo,
    kind: TemplateKind,
    dialect: &'static dyn Dialect,
    config: &'a GeneratorConfig,
    resolver: &'a mut dyn CalleeResolver,
    hook: Option<&'a dyn HtmlHook>,
    imports: Vec<String>,
    params: Vec<ParamInfo>,
    body: CodeBuilder,
    binary_parts: Vec<Vec<u8>>,
    binary_len: usize,
    diagnostics: Vec<Diagnostic>,
    error: Option<TemplateError>,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(
        info: ClassInfo,
        kind: TemplateKind,
        config: &'a GeneratorConfig,
        resolver: &'a mut dyn CalleeResolver,
        hook: Option<&'a dyn HtmlHook>,
    ) -> Self {
        let dialect = dialect_for(info.target);
        CodeGenerator {
            info,
            kind,
            dialect,
            config,
            resolver,
            hook,
            imports: Vec::new(),
            params: Vec::new(),
            body: CodeBuilder::new(dialect.indent_unit()),
            binary_parts: Vec::new(),
            binary_len: 0,
            diagnostics: Vec::new(),
            error: None,
        }
    }

    /// Parameters declared so far.
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    /// Assemble the unit, or fail with the collected problems.
    ///
    /// Parse diagnostics take precedence over a failed call site, since the
    /// call site may be a consequence of them.
    pub fn finish(self) -> Result<ClassDefinition, TemplateError> {
        if self.diagnostics.iter().any(Diagnostic::is_error) {
            return Err(TemplateError::Parse {
                template: self.info.name.clone(),
                diagnostics: self.diagnostics,
            });
        }
        if let Some(error) = self.error {
            return Err(error);
        }

        let last_line = self.body.template_line();
        let mut code = CodeBuilder::new(self.dialect.indent_unit());
        self.dialect.prologue(
            &mut code,
            &UnitHeader {
                info: &self.info,
                kind: self.kind,
                imports: &self.imports,
                params: &self.params,
                has_binary: !self.binary_parts.is_empty(),
            },
        );
        code.append(self.body);
        code.set_template_line(last_line);
        self.dialect.epilogue(&mut code);

        let (code, line_map) = code.into_parts();
        tracing::trace!(
            unit = %self.info.identifier(),
            lines = line_map.len(),
            "unit generated"
        );
        Ok(ClassDefinition {
            info: self.info,
            code,
            line_map,
            binary_parts: self.binary_parts,
        })
    }

    fn location(&self, line: u32) -> Location {
        Location::new(self.info.name.clone(), line)
    }

    fn text(&mut self, level: u32, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(threshold) = self.config.binary_text_threshold {
            if text.len() > threshold {
                let start = self.binary_len;
                self.binary_len += text.len();
                self.binary_parts.push(text.as_bytes().to_vec());
                self.dialect
                    .binary_text(&mut self.body, level, start, self.binary_len);
                return;
            }
        }
        for piece in split_literal(text, self.config.max_literal_len) {
            self.dialect.text(&mut self.body, level, piece);
        }
    }

    fn param(&mut self, line: u32, param: ParamInfo) {
        if param.ty.trim().is_empty() {
            self.diagnostics.push(
                Diagnostic::error(
                    ErrorCode::E1006,
                    line,
                    format!("parameter `{}` needs a type", param.name),
                )
                .with_template(self.info.name.clone()),
            );
        }
        self.params.push(param);
    }

    fn call(&mut self, level: u32, line: u32, kind: CallKind, name: &str, args: &[&str]) {
        let call = CallRef::new(&self.info.name, line, kind, name);
        let callee = match self.resolver.resolve_callee(&call) {
            Ok(callee) => callee,
            Err(error) => {
                self.error = Some(error);
                return;
            }
        };
        let bound = match bind_arguments(&callee.params, args) {
            Ok(bound) => bound,
            Err(problem) => {
                self.error = Some(TemplateError::binding(
                    self.location(line),
                    call.name,
                    problem,
                ));
                return;
            }
        };
        let args: Vec<String> = bound.iter().map(|arg| self.dialect.argument(arg)).collect();
        match kind {
            CallKind::Tag => self
                .dialect
                .tag_call(&mut self.body, level, &callee.info, &args),
            CallKind::Layout => {
                self.dialect
                    .layout_call_start(&mut self.body, level, &callee.info, &args);
            }
        }
    }

    /// Run `f` against a scratch sink and bake what it wrote in as text.
    fn hook_output(&mut self, level: u32, f: impl FnOnce(&dyn HtmlHook, &mut StringOutput)) {
        let Some(hook) = self.hook else {
            return;
        };
        let mut output = StringOutput::new();
        f(hook, &mut output);
        if !output.is_empty() {
            self.text(level, output.as_str());
        }
    }
}

impl<'src> Visitor<'src> for CodeGenerator<'_> {
    fn visit(&mut self, event: ParseEvent<'src>) {
        if self.error.is_some() {
            return;
        }
        let level = event.depth + BODY_LEVEL;
        let dialect = self.dialect;
        match event.kind {
            EventKind::LineFinished => self.body.set_template_line(event.line + 1),
            EventKind::Import(path) => self.imports.push(path.trim().to_string()),
            EventKind::Param(param) => self.param(event.line, param),
            EventKind::ParamsComplete => {
                self.resolver.params_declared(&self.info.name, &self.params);
            }
            EventKind::Text(text) => self.text(level, text),
            EventKind::SafeCode(code) => dialect.expression(&mut self.body, level, code.trim(), true),
            EventKind::UnsafeCode(code) => {
                dialect.expression(&mut self.body, level, code.trim(), false);
            }
            EventKind::CodeStatement(code) => dialect.statement(&mut self.body, level, code),
            EventKind::ConditionStart(condition) => {
                dialect.condition_start(&mut self.body, level, condition);
            }
            EventKind::ConditionElseIf(condition) => {
                dialect.condition_else_if(&mut self.body, level, condition);
            }
            EventKind::ConditionElse => dialect.condition_else(&mut self.body, level),
            EventKind::ConditionEnd | EventKind::ForEnd => dialect.block_end(&mut self.body, level),
            EventKind::ForStart(header) => dialect.for_start(&mut self.body, level, header),
            EventKind::TagCall { name, args } => {
                self.call(level, event.line, CallKind::Tag, &name, &args);
            }
            EventKind::LayoutCall { name, args } => {
                self.call(level, event.line, CallKind::Layout, &name, &args);
            }
            EventKind::LayoutDefine(slot) => dialect.define_start(&mut self.body, level, slot),
            EventKind::LayoutDefineEnd => dialect.define_end(&mut self.body, level),
            EventKind::LayoutEnd => {
                dialect.layout_call_end(&mut self.body, level, self.kind.is_layout());
            }
            EventKind::LayoutRender(slot) => dialect.render_slot(&mut self.body, level, slot),
            EventKind::HtmlTagOpened(tag) => self.hook_output(level, |hook, out| {
                hook.on_tag_opened(&tag.name, &tag.attributes, out);
            }),
            EventKind::HtmlAttributeStarted { tag, attribute } => {
                let attributes: &[HtmlAttribute] = &tag.attributes;
                self.hook_output(level, |hook, out| {
                    hook.on_attribute_started(&tag.name, &attribute.name, attributes, out);
                });
            }
            EventKind::HtmlTagClosed(tag) => self.hook_output(level, |hook, out| {
                hook.on_tag_closed(&tag.name, out);
            }),
            EventKind::Complete => {}
        }
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        self.diagnostics
            .push(diagnostic.with_template(self.info.name.clone()));
    }
}

#[cfg(test)]
mod tests;
