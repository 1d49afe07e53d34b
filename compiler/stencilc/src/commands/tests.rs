#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use stencil_ir::{EventKind, ParamInfo, ParseEvent};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn test_parse_no_options() {
    assert_eq!(parse_options(&[]).unwrap(), CliOptions::default());
}

#[test]
fn test_parse_all_options() {
    let options = parse_options(&args(&[
        "-o",
        "out",
        "--package=app.views",
        "--html-tags=form, a",
        "--html-attributes=href,action,",
        "--binary-threshold=512",
        "--max-literal=100",
    ]))
    .unwrap();
    assert_eq!(
        options,
        CliOptions {
            output: Some(PathBuf::from("out")),
            package: Some("app.views".to_string()),
            html_tags: vec!["form".to_string(), "a".to_string()],
            html_attributes: vec!["href".to_string(), "action".to_string()],
            binary_threshold: Some(512),
            max_literal_len: Some(100),
        }
    );
}

#[test]
fn test_parse_option_errors() {
    assert_eq!(
        parse_options(&args(&["-o"])).unwrap_err(),
        "`-o` needs a directory"
    );
    assert_eq!(
        parse_options(&args(&["--binary-threshold=big"])).unwrap_err(),
        "'--binary-threshold=big' expects a non-negative number"
    );
    assert_eq!(
        parse_options(&args(&["--verbose"])).unwrap_err(),
        "unknown option '--verbose'"
    );
}

#[test]
fn test_into_config() {
    let config = parse_options(&args(&[
        "--output=gen",
        "--package=app",
        "--html-tags=form",
        "--html-attributes=action",
        "--binary-threshold=64",
    ]))
    .unwrap()
    .into_config();
    assert_eq!(config.output_dir, PathBuf::from("gen"));
    assert_eq!(config.package_name, "app");
    assert_eq!(config.html, Some(HtmlConfig::new(["form"], ["action"])));
    assert_eq!(config.binary_text_threshold, Some(64));
}

#[test]
fn test_defaults_leave_config_alone() {
    let config = CliOptions::default().into_config();
    let default = CompilerConfig::default();
    assert_eq!(config.output_dir, default.output_dir);
    assert_eq!(config.package_name, default.package_name);
    assert_eq!(config.html, None);
    assert_eq!(config.binary_text_threshold, None);
    assert_eq!(config.max_literal_len, default.max_literal_len);
}

#[test]
fn test_attributes_without_tags_are_ignored() {
    let config = parse_options(&args(&["--html-attributes=href"]))
        .unwrap()
        .into_config();
    assert_eq!(config.html, None);
}

fn event(kind: EventKind<'_>) -> ParseEvent<'_> {
    ParseEvent {
        depth: 1,
        line: 3,
        kind,
    }
}

#[test]
fn test_describe_event() {
    assert_eq!(
        describe_event(&event(EventKind::Text("Hi\n"))),
        "3:1 Text \"Hi\\n\""
    );
    assert_eq!(
        describe_event(&event(EventKind::TagCall {
            name: "card".to_string(),
            args: vec!["\"One\"", "count = 2"],
        })),
        "3:1 TagCall card [\"\\\"One\\\"\", \"count = 2\"]"
    );
    assert_eq!(
        describe_event(&event(EventKind::Param(
            ParamInfo::new("items", "i32").variadic()
        ))),
        "3:1 Param items: i32..."
    );
    assert_eq!(
        describe_event(&event(EventKind::Param(
            ParamInfo::new("count", "i32").with_default("1")
        ))),
        "3:1 Param count: i32 = 1"
    );
    assert_eq!(describe_event(&event(EventKind::Complete)), "3:1 Complete");
}
