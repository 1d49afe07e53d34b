use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_display_with_template() {
    let diagnostic = Diagnostic::error(ErrorCode::E1002, 3, "unterminated `@if` block")
        .with_template(TemplateName::new("page.stn"));
    assert_eq!(
        diagnostic.to_string(),
        "page.stn:3: error[E1002]: unterminated `@if` block"
    );
}

#[test]
fn test_display_without_template() {
    let diagnostic = Diagnostic::error(ErrorCode::E1001, 1, "missing parameter name");
    assert_eq!(
        diagnostic.to_string(),
        "line 1: error[E1001]: missing parameter name"
    );
    assert!(diagnostic.is_error());
}

#[test]
fn test_location_display() {
    let location = Location::new(TemplateName::new("tag/card.stn"), 7);
    assert_eq!(location.to_string(), "tag/card.stn:7");
}

#[test]
fn test_display_without_line() {
    let diagnostic = Diagnostic::error(ErrorCode::E3002, 0, "elsewhere.Unit: unrelated");
    assert_eq!(
        diagnostic.to_string(),
        "error[E3002]: elsewhere.Unit: unrelated"
    );
}
