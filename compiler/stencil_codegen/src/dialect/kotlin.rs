//! Kotlin render units.

use stencil_ir::{ClassInfo, TargetLanguage};
use stencil_parse::BoundArgument;

use super::{Dialect, UnitHeader};
use crate::literal::escape_kotlin;
use crate::CodeBuilder;

const OUTPUT: &str = "stencilOutput";
const OUTPUT_TYPE: &str = "stencil.runtime.TemplateOutput";
const SLOTS: &str = "stencilSlots";
const SLOT: &str = "stencilSlot";
const SLOTS_TYPE: &str = "java.util.function.Function<String, Runnable>";
const BINARY: &str = "STENCIL_BINARY_PARTS";

#[derive(Copy, Clone, Debug, Default)]
pub struct KotlinDialect;

impl KotlinDialect {
    fn call_args(args: &[String]) -> String {
        let mut joined = OUTPUT.to_string();
        for arg in args {
            joined.push_str(", ");
            joined.push_str(arg);
        }
        joined
    }
}

impl Dialect for KotlinDialect {
    fn target(&self) -> TargetLanguage {
        TargetLanguage::Kotlin
    }

    fn indent_unit(&self) -> &'static str {
        "\t"
    }

    fn prologue(&self, out: &mut CodeBuilder, header: &UnitHeader<'_>) {
        let info = header.info;
        if !info.package.is_empty() {
            out.writeln(0, &format!("package {}", info.package.join(".")));
            out.newline();
        }
        for import in header.imports {
            out.writeln(0, &format!("import {}", import.trim().trim_end_matches(';')));
        }
        out.writeln(0, &format!("object {} {{", info.class_name));
        out.writeln(
            1,
            &format!(
                "const val TEMPLATE_NAME = \"{}\"",
                escape_kotlin(info.name.as_str())
            ),
        );
        if header.has_binary {
            out.writeln(
                1,
                &format!(
                    "private val {BINARY}: ByteArray by lazy {{ {}::class.java.getResourceAsStream(\"{}.bin\")!!.readBytes() }}",
                    info.class_name, info.class_name
                ),
            );
        }
        out.newline();

        let mut signature = format!("@JvmStatic fun render({OUTPUT}: {OUTPUT_TYPE}");
        for param in header.params {
            signature.push_str(", ");
            if param.variadic {
                signature.push_str("vararg ");
            }
            signature.push_str(&format!("{}: {}", param.name, param.ty));
        }
        if header.kind.is_layout() {
            signature.push_str(&format!(", {SLOTS}: {SLOTS_TYPE}"));
        }
        signature.push_str(") {");
        out.writeln(1, &signature);
    }

    fn epilogue(&self, out: &mut CodeBuilder) {
        out.writeln(1, "}");
        out.writeln(0, "}");
    }

    fn text(&self, out: &mut CodeBuilder, level: u32, text: &str) {
        out.writeln(
            level,
            &format!("{OUTPUT}.writeRaw(\"{}\")", escape_kotlin(text)),
        );
    }

    fn binary_text(&self, out: &mut CodeBuilder, level: u32, start: usize, end: usize) {
        out.writeln(
            level,
            &format!("{OUTPUT}.writeRawBytes({BINARY}.copyOfRange({start}, {end}))"),
        );
    }

    fn expression(&self, out: &mut CodeBuilder, level: u32, expression: &str, escaped: bool) {
        let method = if escaped { "writeEscaped" } else { "writeRaw" };
        out.writeln(level, &format!("{OUTPUT}.{method}(({expression}).toString())"));
    }

    fn statement(&self, out: &mut CodeBuilder, level: u32, statement: &str) {
        out.writeln(level, statement.trim());
    }

    fn condition_start(&self, out: &mut CodeBuilder, level: u32, condition: &str) {
        out.writeln(level, &format!("if ({}) {{", condition.trim()));
    }

    fn condition_else_if(&self, out: &mut CodeBuilder, level: u32, condition: &str) {
        out.writeln(level, &format!("}} else if ({}) {{", condition.trim()));
    }

    fn condition_else(&self, out: &mut CodeBuilder, level: u32) {
        out.writeln(level, "} else {");
    }

    fn block_end(&self, out: &mut CodeBuilder, level: u32) {
        out.writeln(level, "}");
    }

    fn for_start(&self, out: &mut CodeBuilder, level: u32, header: &str) {
        out.writeln(level, &format!("for ({}) {{", header.trim()));
    }

    fn argument(&self, argument: &BoundArgument) -> String {
        match argument {
            BoundArgument::Single(expression) => expression.clone(),
            BoundArgument::Variadic(items) => format!("*arrayOf({})", items.join(", ")),
        }
    }

    fn tag_call(&self, out: &mut CodeBuilder, level: u32, callee: &ClassInfo, args: &[String]) {
        out.writeln(
            level,
            &format!("{}.render({})", callee.identifier(), Self::call_args(args)),
        );
    }

    fn layout_call_start(
        &self,
        out: &mut CodeBuilder,
        level: u32,
        callee: &ClassInfo,
        args: &[String],
    ) {
        // Named, since it may follow a vararg.
        out.writeln(
            level,
            &format!(
                "{}.render({}, {SLOTS} = {SLOTS_TYPE} {{ {SLOT} ->",
                callee.identifier(),
                Self::call_args(args)
            ),
        );
    }

    fn define_start(&self, out: &mut CodeBuilder, level: u32, slot: &str) {
        out.writeln(
            level + 1,
            &format!("if (\"{}\" == {SLOT}) {{", escape_kotlin(slot)),
        );
        out.writeln(level + 2, "return@Function Runnable {");
    }

    fn define_end(&self, out: &mut CodeBuilder, level: u32) {
        out.writeln(level + 2, "}");
        out.writeln(level + 1, "}");
    }

    fn layout_call_end(&self, out: &mut CodeBuilder, level: u32, forward_slots: bool) {
        if forward_slots {
            out.writeln(level + 1, &format!("return@Function {SLOTS}.apply({SLOT})"));
        } else {
            out.writeln(level + 1, "return@Function Runnable {}");
        }
        out.writeln(level, "})");
    }

    fn render_slot(&self, out: &mut CodeBuilder, level: u32, slot: &str) {
        out.writeln(
            level,
            &format!("{SLOTS}.apply(\"{}\").run()", escape_kotlin(slot)),
        );
    }
}
