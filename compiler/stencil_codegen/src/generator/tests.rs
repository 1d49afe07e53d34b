#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use super::*;
use crate::{generate_unit, Callee};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;
use stencil_ir::{HtmlConfig, TemplateName, DEFAULT_PACKAGE};
use stencil_runtime::TemplateOutput;

/// Resolver that knows a fixed set of callees plus whatever declared its
/// parameters during the test.
#[derive(Default)]
struct FakeResolver {
    known: FxHashMap<TemplateName, Vec<ParamInfo>>,
    calls: Vec<CallRef>,
}

impl FakeResolver {
    fn with(mut self, name: &str, params: Vec<ParamInfo>) -> Self {
        self.known.insert(TemplateName::new(name), params);
        self
    }
}

impl CalleeResolver for FakeResolver {
    fn resolve_callee(&mut self, call: &CallRef) -> Result<Callee, TemplateError> {
        self.calls.push(call.clone());
        let params = self
            .known
            .get(&call.name)
            .ok_or_else(|| TemplateError::TemplateNotFound {
                name: call.name.clone(),
                referenced_from: Some(Location::new(call.caller.clone(), call.line)),
            })?;
        Ok(Callee {
            info: ClassInfo::new(&call.name, DEFAULT_PACKAGE),
            params: Arc::from(params.clone()),
        })
    }

    fn params_declared(&mut self, name: &TemplateName, params: &[ParamInfo]) {
        self.known.insert(name.clone(), params.to_vec());
    }
}

fn card_params() -> Vec<ParamInfo> {
    vec![
        ParamInfo::new("title", "&str"),
        ParamInfo::new("count", "i32").with_default("1"),
    ]
}

fn generate_with(
    name: &str,
    source: &str,
    resolver: &mut FakeResolver,
    config: &GeneratorConfig,
    hook: Option<&dyn HtmlHook>,
) -> Result<ClassDefinition, TemplateError> {
    let info = ClassInfo::new(&TemplateName::new(name), DEFAULT_PACKAGE);
    generate_unit(source, info, config, resolver, hook)
}

fn generate(name: &str, source: &str, resolver: &mut FakeResolver) -> ClassDefinition {
    generate_with(name, source, resolver, &GeneratorConfig::default(), None).unwrap()
}

/// Lines between the render signature and the two closing braces.
fn body_lines(unit: &ClassDefinition) -> Vec<&str> {
    let lines: Vec<&str> = unit.code.lines().collect();
    let start = lines
        .iter()
        .position(|line| *line == "    ) {" || line.starts_with("\t@JvmStatic fun render("))
        .unwrap()
        + 1;
    lines[start..lines.len() - 2].to_vec()
}

#[test]
fn test_rust_unit() {
    let unit = generate(
        "hello.stn",
        "@param name: &str\nHello ${name}!",
        &mut FakeResolver::default(),
    );
    assert_eq!(
        unit.code,
        "#[allow(non_snake_case, dead_code, unused_imports, unused_variables, unused_mut, unused_parens, clippy::all)]
pub mod StnhelloGenerated {
    pub const TEMPLATE_NAME: &str = \"hello.stn\";

    pub fn render(
        stencil_output: &mut dyn ::stencil_runtime::TemplateOutput,
        name: &str,
    ) {
        stencil_output.write_raw(\"Hello \");
        stencil_output.write_escaped(&::std::string::ToString::to_string(&(name)));
        stencil_output.write_raw(\"!\");
    }
}
"
    );
    assert_eq!(
        unit.line_map.as_slice(),
        &[1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2]
    );
    assert!(!unit.has_binary_content());
}

#[test]
fn test_kotlin_unit() {
    let unit = generate(
        "tag/card.kstn",
        "@import java.time.Instant\n@param title: String\n<b>${title}</b>",
        &mut FakeResolver::default(),
    );
    assert_eq!(
        unit.code,
        "package stencil.generated.tag

import java.time.Instant
object StncardGenerated {
\tconst val TEMPLATE_NAME = \"tag/card.kstn\"

\t@JvmStatic fun render(stencilOutput: stencil.runtime.TemplateOutput, title: String) {
\t\tstencilOutput.writeRaw(\"<b>\")
\t\tstencilOutput.writeEscaped((title).toString())
\t\tstencilOutput.writeRaw(\"</b>\")
\t}
}
"
    );
}

#[test]
fn test_imports_and_statements() {
    let unit = generate(
        "page.stn",
        "@import std::fmt::Write;\n!{let mut total = 0}!{ if total > 1 { total = 1; } }",
        &mut FakeResolver::default(),
    );
    assert!(unit.code.contains("\n    use std::fmt::Write;\n"));
    assert_eq!(
        body_lines(&unit),
        vec![
            "        let mut total = 0;",
            "        if total > 1 { total = 1; }",
        ]
    );
}

#[test]
fn test_condition_indentation() {
    let unit = generate(
        "page.stn",
        "@if(a)\nyes\n@elseif(b)\nmaybe\n@else\nno\n@endif",
        &mut FakeResolver::default(),
    );
    assert_eq!(
        body_lines(&unit),
        vec![
            "        if a {",
            "            stencil_output.write_raw(\"\\nyes\\n\");",
            "        } else if b {",
            "            stencil_output.write_raw(\"\\nmaybe\\n\");",
            "        } else {",
            "            stencil_output.write_raw(\"\\nno\\n\");",
            "        }",
        ]
    );
}

#[test]
fn test_for_loop_and_unsafe() {
    let unit = generate(
        "page.stn",
        "@for(item in items)$unsafe{item}@endfor",
        &mut FakeResolver::default(),
    );
    assert_eq!(
        body_lines(&unit),
        vec![
            "        for item in items {",
            "            stencil_output.write_raw(&::std::string::ToString::to_string(&(item)));",
            "        }",
        ]
    );
}

#[test]
fn test_line_map_tracks_template_lines() {
    let unit = generate(
        "page.stn",
        "@param a: i32\n@param b: i32\n${a}\n${b}",
        &mut FakeResolver::default(),
    );
    let generated_line = unit
        .code
        .lines()
        .position(|line| line.contains("to_string(&(b))"))
        .unwrap()
        + 1;
    assert_eq!(
        unit.line_map.template_line(u32::try_from(generated_line).unwrap()),
        Some(4)
    );
    assert_eq!(unit.line_map.len(), unit.code.lines().count());
}

#[test]
fn test_tag_call_binds_defaults() {
    let mut resolver = FakeResolver::default().with("tag/card.stn", card_params());
    let unit = generate("page.stn", "@tag.card(\"Hi\")", &mut resolver);
    assert_eq!(
        body_lines(&unit),
        vec![
            "        crate::stencil::generated::tag::StncardGenerated::render(&mut *stencil_output, \"Hi\", 1);"
        ]
    );
    assert_eq!(
        resolver.calls,
        vec![CallRef {
            caller: TemplateName::new("page.stn"),
            line: 1,
            kind: CallKind::Tag,
            name: TemplateName::new("tag/card.stn"),
        }]
    );
}

#[test]
fn test_named_arguments_in_any_order() {
    let mut resolver = FakeResolver::default().with("tag/card.stn", card_params());
    let forward = generate("a.stn", "@tag.card(title = \"x\", count = 2)", &mut resolver);
    let backward = generate("b.stn", "@tag.card(count = 2, title = \"x\")", &mut resolver);
    assert_eq!(body_lines(&forward), body_lines(&backward));
    assert!(body_lines(&forward)[0].ends_with("(&mut *stencil_output, \"x\", 2);"));
}

#[test]
fn test_variadic_argument() {
    let mut resolver = FakeResolver::default()
        .with("tag/list.stn", vec![ParamInfo::new("items", "i32").variadic()]);
    let caller = generate("page.stn", "@tag.list(1, 2, 3)", &mut resolver);
    assert!(body_lines(&caller)[0].ends_with("(&mut *stencil_output, &[1, 2, 3]);"));

    let callee = generate(
        "tag/list.stn",
        "@param items: i32...\n@for(i in items)${i}@endfor",
        &mut resolver,
    );
    assert!(callee.code.contains("        items: &[i32],\n"));
}

#[test]
fn test_recursive_tag() {
    let mut resolver = FakeResolver::default();
    let unit = generate(
        "tag/recursion.stn",
        "@param amount: i32\n${amount}@if(amount > 0)@tag.recursion(amount - 1)@endif",
        &mut resolver,
    );
    assert_eq!(
        body_lines(&unit),
        vec![
            "        stencil_output.write_escaped(&::std::string::ToString::to_string(&(amount)));",
            "        if amount > 0 {",
            "            crate::stencil::generated::tag::StnrecursionGenerated::render(&mut *stencil_output, amount - 1);",
            "        }",
        ]
    );
}

#[test]
fn test_missing_required_argument() {
    let mut resolver = FakeResolver::default().with("tag/card.stn", card_params());
    let error = generate_with(
        "page.stn",
        "\n@tag.card()",
        &mut resolver,
        &GeneratorConfig::default(),
        None,
    )
    .unwrap_err();
    match error {
        TemplateError::MissingRequiredArgument {
            location,
            callee,
            param,
        } => {
            assert_eq!(location, Location::new(TemplateName::new("page.stn"), 2));
            assert_eq!(callee, TemplateName::new("tag/card.stn"));
            assert_eq!(param, "title");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_callee_stops_generation() {
    let mut resolver = FakeResolver::default().with("tag/card.stn", card_params());
    let error = generate_with(
        "page.stn",
        "@tag.missing()@tag.card(\"x\")",
        &mut resolver,
        &GeneratorConfig::default(),
        None,
    )
    .unwrap_err();
    assert_eq!(error.code(), Some(ErrorCode::E2001));
    assert_eq!(
        error.to_string(),
        "tag/missing.stn not found, referenced at page.stn:1"
    );
    assert_eq!(resolver.calls.len(), 1);
}

#[test]
fn test_layout_call() {
    let mut resolver = FakeResolver::default()
        .with("layout/main.stn", vec![ParamInfo::new("title", "&str")]);
    let unit = generate(
        "page.stn",
        "@layout.main(\"T\")\n@define(content)\nBody\n@enddefine\n@endlayout",
        &mut resolver,
    );
    assert_eq!(
        body_lines(&unit),
        vec![
            "        crate::stencil::generated::layout::StnmainGenerated::render(&mut *stencil_output, \"T\", &|stencil_slot: &str, stencil_output: &mut dyn ::stencil_runtime::TemplateOutput| {",
            "            if stencil_slot == \"content\" {",
            "                {",
            "                    stencil_output.write_raw(\"\\nBody\\n\");",
            "                }",
            "                return;",
            "            }",
            "        });",
        ]
    );
}

#[test]
fn test_layout_unit_renders_slots() {
    let mut resolver = FakeResolver::default().with("layout/main.stn", Vec::new());
    let layout = generate("layout/main.stn", "Hello @render(content)!!", &mut resolver);
    assert!(layout.code.contains(
        "        stencil_slots: &dyn Fn(&str, &mut dyn ::stencil_runtime::TemplateOutput),\n"
    ));
    assert_eq!(
        body_lines(&layout),
        vec![
            "        stencil_output.write_raw(\"Hello \");",
            "        stencil_slots(\"content\", &mut *stencil_output);",
            "        stencil_output.write_raw(\"!!\");",
        ]
    );

    let nested = generate(
        "layout/outer.stn",
        "@layout.main()@define(a)x@enddefine@endlayout",
        &mut resolver,
    );
    let lines = body_lines(&nested);
    assert_eq!(
        lines[lines.len() - 2..],
        [
            "            stencil_slots(stencil_slot, &mut *stencil_output);",
            "        });",
        ]
    );
}

#[test]
fn test_kotlin_layout_call() {
    let mut resolver = FakeResolver::default().with("layout/main.kstn", Vec::new());
    let unit = generate(
        "page.kstn",
        "@layout.main()@define(content)x@enddefine@endlayout",
        &mut resolver,
    );
    assert_eq!(
        body_lines(&unit),
        vec![
            "\t\tstencil.generated.layout.StnmainGenerated.render(stencilOutput, stencilSlots = java.util.function.Function<String, Runnable> { stencilSlot ->",
            "\t\t\tif (\"content\" == stencilSlot) {",
            "\t\t\t\treturn@Function Runnable {",
            "\t\t\t\t\tstencilOutput.writeRaw(\"x\")",
            "\t\t\t\t}",
            "\t\t\t}",
            "\t\t\treturn@Function Runnable {}",
            "\t\t})",
        ]
    );
}

#[test]
fn test_parse_errors_carry_template() {
    let error = generate_with(
        "page.stn",
        "@if(a)\nyes",
        &mut FakeResolver::default(),
        &GeneratorConfig::default(),
        None,
    )
    .unwrap_err();
    let diagnostics = error.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E1002);
    assert_eq!(diagnostics[0].template, Some(TemplateName::new("page.stn")));
}

#[test]
fn test_untyped_param() {
    let error = generate_with(
        "page.stn",
        "@param name\nx",
        &mut FakeResolver::default(),
        &GeneratorConfig::default(),
        None,
    )
    .unwrap_err();
    assert_eq!(error.diagnostics()[0].code, ErrorCode::E1006);
}

#[test]
fn test_binary_text() {
    let config = GeneratorConfig {
        binary_text_threshold: Some(10),
        ..GeneratorConfig::default()
    };
    let unit = generate_with(
        "page.stn",
        "@param x: i32\nshort ${x} a much longer run",
        &mut FakeResolver::default(),
        &config,
        None,
    )
    .unwrap();
    assert!(unit.code.contains(
        "    static STENCIL_BINARY_PARTS: &[u8] = include_bytes!(\"stencil/generated/StnpageGenerated.bin\");\n"
    ));
    assert_eq!(
        body_lines(&unit)[2],
        "        stencil_output.write_raw_bytes(&STENCIL_BINARY_PARTS[0..18]);"
    );
    assert_eq!(unit.binary_content(), b" a much longer run".to_vec());
}

#[test]
fn test_long_literal_is_split() {
    let config = GeneratorConfig {
        max_literal_len: 4,
        ..GeneratorConfig::default()
    };
    let unit = generate_with(
        "page.stn",
        "abcdefghij",
        &mut FakeResolver::default(),
        &config,
        None,
    )
    .unwrap();
    assert_eq!(
        body_lines(&unit),
        vec![
            "        stencil_output.write_raw(\"abcd\");",
            "        stencil_output.write_raw(\"efgh\");",
            "        stencil_output.write_raw(\"ij\");",
        ]
    );
}

#[derive(Default)]
struct RecordingHook {
    seen: Mutex<Vec<String>>,
}

impl HtmlHook for RecordingHook {
    fn on_tag_opened(
        &self,
        name: &str,
        attributes: &[HtmlAttribute],
        output: &mut dyn TemplateOutput,
    ) {
        let action = attributes
            .iter()
            .find(|attribute| attribute.name == "action")
            .and_then(|attribute| attribute.value.clone())
            .unwrap_or_default();
        self.seen.lock().push(format!("opened {name} action={action}"));
        output.write_raw(" data-form=\"x\"");
    }

    fn on_attribute_started(
        &self,
        tag: &str,
        name: &str,
        _attributes: &[HtmlAttribute],
        _output: &mut dyn TemplateOutput,
    ) {
        self.seen.lock().push(format!("attribute {tag}.{name}"));
    }

    fn on_tag_closed(&self, name: &str, output: &mut dyn TemplateOutput) {
        self.seen.lock().push(format!("closed {name}"));
        output.write_raw("<input name=\"fp\">");
    }
}

#[test]
fn test_html_hook_output_is_baked_in() {
    let config = GeneratorConfig {
        html: Some(HtmlConfig::new(["form"], ["action"])),
        ..GeneratorConfig::default()
    };
    let hook = RecordingHook::default();
    let unit = generate_with(
        "page.stn",
        "@param url: &str\n<form action=\"${url}\">x</form>",
        &mut FakeResolver::default(),
        &config,
        Some(&hook),
    )
    .unwrap();
    assert_eq!(
        *hook.seen.lock(),
        vec![
            "attribute form.action".to_string(),
            "opened form action=${url}".to_string(),
            "closed form".to_string(),
        ]
    );
    assert_eq!(
        body_lines(&unit),
        vec![
            "        stencil_output.write_raw(\"<form action=\\\"\");",
            "        stencil_output.write_escaped(&::std::string::ToString::to_string(&(url)));",
            "        stencil_output.write_raw(\"\\\"\");",
            "        stencil_output.write_raw(\" data-form=\\\"x\\\"\");",
            "        stencil_output.write_raw(\">x\");",
            "        stencil_output.write_raw(\"<input name=\\\"fp\\\">\");",
            "        stencil_output.write_raw(\"</form>\");",
        ]
    );
}
