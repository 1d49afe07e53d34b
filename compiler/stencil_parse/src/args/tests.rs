#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

fn one_two() -> Vec<ParamInfo> {
    vec![
        ParamInfo::new("one", "i32").with_default("1"),
        ParamInfo::new("two", "i32").with_default("2"),
    ]
}

fn singles(values: &[&str]) -> Vec<BoundArgument> {
    values
        .iter()
        .map(|value| BoundArgument::Single((*value).to_string()))
        .collect()
}

#[test]
fn test_classify() {
    assert_eq!(Argument::classify("\"Hello\""), Argument::Positional("\"Hello\""));
    assert_eq!(
        Argument::classify(" two = 5 "),
        Argument::Named {
            name: "two",
            value: "5"
        }
    );
    assert_eq!(Argument::classify("a == b"), Argument::Positional("a == b"));
    assert_eq!(Argument::classify("a <= b"), Argument::Positional("a <= b"));
    assert_eq!(Argument::classify("x != 1"), Argument::Positional("x != 1"));
    assert_eq!(
        Argument::classify("f(a = 1)"),
        Argument::Positional("f(a = 1)")
    );
    assert_eq!(
        Argument::classify("\"a = b\""),
        Argument::Positional("\"a = b\"")
    );
    assert_eq!(
        Argument::classify("label = \"x = y\""),
        Argument::Named {
            name: "label",
            value: "\"x = y\""
        }
    );
}

#[test]
fn test_positional_binding() {
    let params = vec![
        ParamInfo::new("first", "&str"),
        ParamInfo::new("second", "i32"),
    ];
    let bound = bind_arguments(&params, &["\"Hello\"", "42"]).unwrap();
    assert_eq!(bound, singles(&["\"Hello\"", "42"]));
}

#[test]
fn test_named_binding_is_order_independent() {
    let forward = bind_arguments(&one_two(), &["one = 10", "two = 20"]).unwrap();
    let backward = bind_arguments(&one_two(), &["two = 20", "one = 10"]).unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward, singles(&["10", "20"]));
}

#[test]
fn test_defaults_fill_omitted_parameters() {
    assert_eq!(bind_arguments(&one_two(), &[]).unwrap(), singles(&["1", "2"]));
    assert_eq!(
        bind_arguments(&one_two(), &["two = 5"]).unwrap(),
        singles(&["1", "5"])
    );
    assert_eq!(
        bind_arguments(&one_two(), &["7"]).unwrap(),
        singles(&["7", "2"])
    );
}

#[test]
fn test_mixed_positional_and_named() {
    let params = vec![
        ParamInfo::new("a", "i32"),
        ParamInfo::new("b", "i32").with_default("0"),
        ParamInfo::new("c", "i32"),
    ];
    let bound = bind_arguments(&params, &["1", "c = 3"]).unwrap();
    assert_eq!(bound, singles(&["1", "0", "3"]));
}

#[test]
fn test_missing_required() {
    let params = vec![ParamInfo::new("title", "&str")];
    assert_eq!(
        bind_arguments(&params, &[]),
        Err(BindingProblem::MissingRequired {
            param: "title".to_string()
        })
    );
}

#[test]
fn test_unknown_duplicate_and_too_many() {
    assert_eq!(
        bind_arguments(&one_two(), &["three = 3"]),
        Err(BindingProblem::UnknownName {
            name: "three".to_string()
        })
    );
    assert_eq!(
        bind_arguments(&one_two(), &["one = 1", "one = 2"]),
        Err(BindingProblem::Duplicate {
            param: "one".to_string()
        })
    );
    assert_eq!(
        bind_arguments(&one_two(), &["two = 1", "5", "6"]),
        Err(BindingProblem::Duplicate {
            param: "two".to_string()
        })
    );
    assert_eq!(
        bind_arguments(&one_two(), &["1", "2", "3"]),
        Err(BindingProblem::TooMany {
            expected: 2,
            found: 3
        })
    );
}

#[test]
fn test_variadic_collects_remaining_positionals() {
    let params = vec![
        ParamInfo::new("label", "&str"),
        ParamInfo::new("values", "i32").variadic(),
    ];
    let bound = bind_arguments(&params, &["\"x\"", "1", "2", "3"]).unwrap();
    assert_eq!(
        bound,
        vec![
            BoundArgument::Single("\"x\"".to_string()),
            BoundArgument::Variadic(vec!["1".to_string(), "2".to_string(), "3".to_string()]),
        ]
    );

    let bound = bind_arguments(&params, &["\"x\""]).unwrap();
    assert_eq!(bound[1], BoundArgument::Variadic(Vec::new()));
}
