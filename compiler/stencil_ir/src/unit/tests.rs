use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_class_info_for_tag() {
    let info = ClassInfo::new(&TemplateName::new("tag/my/card-list.stn"), DEFAULT_PACKAGE);
    assert_eq!(info.class_name, "StncardlistGenerated");
    assert_eq!(info.package, vec!["stencil", "generated", "tag", "my"]);
    assert_eq!(
        info.identifier(),
        "stencil.generated.tag.my.StncardlistGenerated"
    );
    assert_eq!(
        info.source_file_name(),
        "stencil/generated/tag/my/StncardlistGenerated.rs"
    );
    assert_eq!(
        info.binary_file_name(),
        "stencil/generated/tag/my/StncardlistGenerated.bin"
    );
}

#[test]
fn test_class_info_snake_case_and_kotlin() {
    let info = ClassInfo::new(&TemplateName::new("snake-case-template.kstn"), "app.views");
    assert_eq!(info.class_name, "StnsnakecasetemplateGenerated");
    assert_eq!(info.identifier(), "app.views.StnsnakecasetemplateGenerated");
    assert_eq!(info.target, TargetLanguage::Kotlin);
    assert_eq!(
        info.source_file_name(),
        "app/views/StnsnakecasetemplateGenerated.kt"
    );
}

#[test]
fn test_class_info_empty_root() {
    let info = ClassInfo::new(&TemplateName::new("page.stn"), "");
    assert_eq!(info.identifier(), "StnpageGenerated");
    assert_eq!(info.qualified_name("::"), "StnpageGenerated");
}

#[test]
fn test_class_info_sanitizes_dots() {
    let info = ClassInfo::new(&TemplateName::new("page.v2.stn"), DEFAULT_PACKAGE);
    assert_eq!(info.class_name, "Stnpage_v2Generated");
}

#[test]
fn test_line_map_lookup() {
    let mut map = LineMap::new();
    map.push(1);
    map.push(1);
    map.push(3);
    assert_eq!(map.template_line(3), Some(3));
    assert_eq!(map.template_line(1), Some(1));
    assert_eq!(map.template_line(0), None);
    assert_eq!(map.template_line(4), None);
}

#[test]
fn test_definition_identity_ignores_content() {
    let info = ClassInfo::new(&TemplateName::new("tag/a.stn"), DEFAULT_PACKAGE);
    let first = ClassDefinition {
        info: info.clone(),
        code: "first".to_string(),
        line_map: LineMap::new(),
        binary_parts: Vec::new(),
    };
    let second = ClassDefinition {
        info,
        code: "second".to_string(),
        line_map: LineMap::new(),
        binary_parts: vec![b"abc".to_vec()],
    };
    assert_eq!(first, second);
    assert!(second.has_binary_content());
    assert_eq!(second.binary_content(), b"abc".to_vec());
}
