//! Rust render units.
//!
//! ```text
//! #[allow(...)]
//! pub mod StncardGenerated {
//!     pub const TEMPLATE_NAME: &str = "tag/card.stn";
//!     pub fn render(stencil_output: &mut dyn ::stencil_runtime::TemplateOutput, title: &str) {
//!         stencil_output.write_raw("<h1>");
//!         ...
//!     }
//! }
//! ```

use stencil_ir::{ClassInfo, TargetLanguage};
use stencil_parse::BoundArgument;

use super::{Dialect, UnitHeader};
use crate::literal::escape_rust;
use crate::CodeBuilder;

const OUTPUT: &str = "stencil_output";
const OUTPUT_TYPE: &str = "&mut dyn ::stencil_runtime::TemplateOutput";
const SLOTS: &str = "stencil_slots";
const SLOT: &str = "stencil_slot";
const BINARY: &str = "STENCIL_BINARY_PARTS";

#[derive(Copy, Clone, Debug, Default)]
pub struct RustDialect;

impl RustDialect {
    fn callee_path(callee: &ClassInfo) -> String {
        format!("crate::{}::render", callee.qualified_name("::"))
    }

    fn call_args(args: &[String]) -> String {
        let mut joined = format!("&mut *{OUTPUT}");
        for arg in args {
            joined.push_str(", ");
            joined.push_str(arg);
        }
        joined
    }
}

impl Dialect for RustDialect {
    fn target(&self) -> TargetLanguage {
        TargetLanguage::Rust
    }

    fn indent_unit(&self) -> &'static str {
        "    "
    }

    fn prologue(&self, out: &mut CodeBuilder, header: &UnitHeader<'_>) {
        out.writeln(
            0,
            "#[allow(non_snake_case, dead_code, unused_imports, unused_variables, unused_mut, unused_parens, clippy::all)]",
        );
        out.writeln(0, &format!("pub mod {} {{", header.info.class_name));
        for import in header.imports {
            let import = import.trim().trim_end_matches(';');
            out.writeln(1, &format!("use {import};"));
        }
        out.writeln(
            1,
            &format!(
                "pub const TEMPLATE_NAME: &str = \"{}\";",
                escape_rust(header.info.name.as_str())
            ),
        );
        if header.has_binary {
            out.writeln(
                1,
                &format!(
                    "static {BINARY}: &[u8] = include_bytes!(\"{}\");",
                    escape_rust(&header.info.binary_file_name())
                ),
            );
        }
        out.newline();
        out.writeln(1, "pub fn render(");
        out.writeln(2, &format!("{OUTPUT}: {OUTPUT_TYPE},"));
        for param in header.params {
            let ty = if param.variadic {
                format!("&[{}]", param.ty)
            } else {
                param.ty.clone()
            };
            out.writeln(2, &format!("{}: {ty},", param.name));
        }
        if header.kind.is_layout() {
            out.writeln(
                2,
                &format!("{SLOTS}: &dyn Fn(&str, &mut dyn ::stencil_runtime::TemplateOutput),"),
            );
        }
        out.writeln(1, ") {");
    }

    fn epilogue(&self, out: &mut CodeBuilder) {
        out.writeln(1, "}");
        out.writeln(0, "}");
    }

    fn text(&self, out: &mut CodeBuilder, level: u32, text: &str) {
        out.writeln(
            level,
            &format!("{OUTPUT}.write_raw(\"{}\");", escape_rust(text)),
        );
    }

    fn binary_text(&self, out: &mut CodeBuilder, level: u32, start: usize, end: usize) {
        out.writeln(
            level,
            &format!("{OUTPUT}.write_raw_bytes(&{BINARY}[{start}..{end}]);"),
        );
    }

    fn expression(&self, out: &mut CodeBuilder, level: u32, expression: &str, escaped: bool) {
        let method = if escaped { "write_escaped" } else { "write_raw" };
        out.writeln(
            level,
            &format!("{OUTPUT}.{method}(&::std::string::ToString::to_string(&({expression})));"),
        );
    }

    fn statement(&self, out: &mut CodeBuilder, level: u32, statement: &str) {
        let statement = statement.trim();
        if statement.ends_with(';') || statement.ends_with('}') {
            out.writeln(level, statement);
        } else {
            out.writeln(level, &format!("{statement};"));
        }
    }

    fn condition_start(&self, out: &mut CodeBuilder, level: u32, condition: &str) {
        out.writeln(level, &format!("if {} {{", condition.trim()));
    }

    fn condition_else_if(&self, out: &mut CodeBuilder, level: u32, condition: &str) {
        out.writeln(level, &format!("}} else if {} {{", condition.trim()));
    }

    fn condition_else(&self, out: &mut CodeBuilder, level: u32) {
        out.writeln(level, "} else {");
    }

    fn block_end(&self, out: &mut CodeBuilder, level: u32) {
        out.writeln(level, "}");
    }

    fn for_start(&self, out: &mut CodeBuilder, level: u32, header: &str) {
        out.writeln(level, &format!("for {} {{", header.trim()));
    }

    fn argument(&self, argument: &BoundArgument) -> String {
        match argument {
            BoundArgument::Single(expression) => expression.clone(),
            BoundArgument::Variadic(items) => format!("&[{}]", items.join(", ")),
        }
    }

    fn tag_call(&self, out: &mut CodeBuilder, level: u32, callee: &ClassInfo, args: &[String]) {
        out.writeln(
            level,
            &format!("{}({});", Self::callee_path(callee), Self::call_args(args)),
        );
    }

    fn layout_call_start(
        &self,
        out: &mut CodeBuilder,
        level: u32,
        callee: &ClassInfo,
        args: &[String],
    ) {
        out.writeln(
            level,
            &format!(
                "{}({}, &|{SLOT}: &str, {OUTPUT}: {OUTPUT_TYPE}| {{",
                Self::callee_path(callee),
                Self::call_args(args)
            ),
        );
    }

    fn define_start(&self, out: &mut CodeBuilder, level: u32, slot: &str) {
        out.writeln(
            level + 1,
            &format!("if {SLOT} == \"{}\" {{", escape_rust(slot)),
        );
        out.writeln(level + 2, "{");
    }

    fn define_end(&self, out: &mut CodeBuilder, level: u32) {
        out.writeln(level + 2, "}");
        out.writeln(level + 2, "return;");
        out.writeln(level + 1, "}");
    }

    fn layout_call_end(&self, out: &mut CodeBuilder, level: u32, forward_slots: bool) {
        if forward_slots {
            out.writeln(level + 1, &format!("{SLOTS}({SLOT}, &mut *{OUTPUT});"));
        }
        out.writeln(level, "});");
    }

    fn render_slot(&self, out: &mut CodeBuilder, level: u32, slot: &str) {
        out.writeln(
            level,
            &format!("{SLOTS}(\"{}\", &mut *{OUTPUT});", escape_rust(slot)),
        );
    }
}
