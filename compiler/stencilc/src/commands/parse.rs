//! The `parse` command: print the event stream of one template.

use std::path::Path;

use stencil_ir::{EventKind, ParseEvent, TemplateKind, LAYOUT_DIRECTORY, TAG_DIRECTORY};

pub fn parse_template(path: &str) {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: failed to read {path}: {error}");
            std::process::exit(1);
        }
    };
    let kind = kind_of(Path::new(path));
    let collector = stencil_parse::collect_events(&source, kind, None);
    for event in &collector.events {
        println!("{}", describe_event(event));
    }
    for diagnostic in &collector.diagnostics {
        eprintln!("{path}: {diagnostic}");
    }
    if collector.has_errors() {
        std::process::exit(1);
    }
}

/// Kind from the innermost `tag` or `layout` directory the file sits in.
fn kind_of(path: &Path) -> TemplateKind {
    let mut kind = TemplateKind::Template;
    for directory in path.parent().into_iter().flat_map(Path::components) {
        let directory = directory.as_os_str().to_string_lossy();
        if TAG_DIRECTORY.strip_suffix('/') == Some(&*directory) {
            kind = TemplateKind::Tag;
        } else if LAYOUT_DIRECTORY.strip_suffix('/') == Some(&*directory) {
            kind = TemplateKind::Layout;
        }
    }
    kind
}

/// One line per event: `line:depth Kind payload`.
pub fn describe_event(event: &ParseEvent<'_>) -> String {
    let payload = match &event.kind {
        EventKind::Text(text) => format!("Text {text:?}"),
        EventKind::SafeCode(code) => format!("SafeCode {code:?}"),
        EventKind::UnsafeCode(code) => format!("UnsafeCode {code:?}"),
        EventKind::CodeStatement(code) => format!("CodeStatement {code:?}"),
        EventKind::Import(path) => format!("Import {path:?}"),
        EventKind::Param(param) => {
            let mut text = format!("Param {}: {}", param.name, param.ty);
            if param.variadic {
                text.push_str("...");
            }
            if let Some(default) = &param.default {
                text.push_str(" = ");
                text.push_str(default);
            }
            text
        }
        EventKind::ConditionStart(condition) => format!("ConditionStart {condition:?}"),
        EventKind::ConditionElseIf(condition) => format!("ConditionElseIf {condition:?}"),
        EventKind::ConditionElse => "ConditionElse".to_string(),
        EventKind::ConditionEnd => "ConditionEnd".to_string(),
        EventKind::ForStart(header) => format!("ForStart {header:?}"),
        EventKind::ForEnd => "ForEnd".to_string(),
        EventKind::TagCall { name, args } => format!("TagCall {name} {args:?}"),
        EventKind::LayoutCall { name, args } => format!("LayoutCall {name} {args:?}"),
        EventKind::LayoutRender(slot) => format!("LayoutRender {slot}"),
        EventKind::LayoutDefine(slot) => format!("LayoutDefine {slot}"),
        EventKind::LayoutDefineEnd => "LayoutDefineEnd".to_string(),
        EventKind::LayoutEnd => "LayoutEnd".to_string(),
        EventKind::HtmlTagOpened(tag) => format!("HtmlTagOpened <{}>", tag.name),
        EventKind::HtmlTagClosed(tag) => format!("HtmlTagClosed </{}>", tag.name),
        EventKind::HtmlAttributeStarted { tag, attribute } => {
            format!("HtmlAttributeStarted {}.{}", tag.name, attribute.name)
        }
        EventKind::LineFinished => "LineFinished".to_string(),
        EventKind::ParamsComplete => "ParamsComplete".to_string(),
        EventKind::Complete => "Complete".to_string(),
    };
    format!("{}:{} {payload}", event.line, event.depth)
}
