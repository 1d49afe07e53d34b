#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use stencil_ir::{ClassInfo, DEFAULT_PACKAGE};

fn unit(name: &str, code: &str, binary: &[u8]) -> ClassDefinition {
    let mut line_map = LineMap::new();
    for _ in code.lines() {
        line_map.push(1);
    }
    ClassDefinition {
        info: ClassInfo::new(&TemplateName::new(name), DEFAULT_PACKAGE),
        code: code.to_string(),
        line_map,
        binary_parts: if binary.is_empty() {
            Vec::new()
        } else {
            vec![binary.to_vec()]
        },
    }
}

fn sample_units() -> Vec<ClassDefinition> {
    vec![
        unit("page.stn", "pub mod StnpageGenerated {}\n", b""),
        unit("tag/card.stn", "pub mod StncardGenerated {}\n", b"payload"),
    ]
}

#[test]
fn test_backend_for_target() {
    assert_eq!(
        BackendKind::for_target(TargetLanguage::Rust),
        BackendKind::RustBundle
    );
    assert_eq!(
        BackendKind::for_target(TargetLanguage::Kotlin),
        BackendKind::KotlinSources
    );
}

#[test]
fn test_rust_bundle_nests_packages() {
    let dir = tempfile::tempdir().unwrap();
    let output = RustBundleBackend::new(dir.path())
        .compile(&sample_units(), &[])
        .unwrap();

    let bundle = fs::read_to_string(dir.path().join(BUNDLE_FILE)).unwrap();
    assert_eq!(
        bundle,
        concat!(
            "// @generated by stencil. Do not edit.\n",
            "\n",
            "pub mod stencil {\n",
            "\n",
            "    pub mod generated {\n",
            "\n",
            "pub mod StnpageGenerated {}\n",
            "\n",
            "        pub mod tag {\n",
            "\n",
            "pub mod StncardGenerated {}\n",
            "        }\n",
            "    }\n",
            "}\n",
        )
    );
    assert_eq!(
        output.files,
        vec![
            dir.path().join(BUNDLE_FILE),
            dir.path().join("stencil/generated/tag/StncardGenerated.bin"),
            dir.path().join(MANIFEST_FILE),
        ]
    );
    assert_eq!(
        fs::read(dir.path().join("stencil/generated/tag/StncardGenerated.bin")).unwrap(),
        b"payload".to_vec()
    );
}

#[test]
fn test_manifest_records_line_maps() {
    let dir = tempfile::tempdir().unwrap();
    RustBundleBackend::new(dir.path())
        .compile(&sample_units(), &[])
        .unwrap();

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap())
            .unwrap();
    assert_eq!(manifest["target"], "Rust");
    let units = manifest["units"].as_array().unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0]["template"], "page.stn");
    assert_eq!(units[0]["source_file"], BUNDLE_FILE);
    assert!(units[0].get("binary_file").is_none());
    assert_eq!(units[1]["identifier"], "stencil.generated.tag.StncardGenerated");
    assert_eq!(
        units[1]["binary_file"],
        "stencil/generated/tag/StncardGenerated.bin"
    );
    assert_eq!(units[1]["line_map"], serde_json::json!([1]));
}

#[test]
fn test_kotlin_sources_one_file_per_unit() {
    let dir = tempfile::tempdir().unwrap();
    let units = vec![
        unit("page.kstn", "object StnpageGenerated {}\n", b""),
        unit("tag/card.kstn", "object StncardGenerated {}\n", b""),
    ];
    let output = KotlinSourcesBackend::new(dir.path())
        .compile(&units, &[PathBuf::from("lib/runtime.jar")])
        .unwrap();

    assert_eq!(output.files.len(), 3);
    assert_eq!(
        fs::read_to_string(dir.path().join("stencil/generated/tag/StncardGenerated.kt")).unwrap(),
        "object StncardGenerated {}\n"
    );
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap())
            .unwrap();
    assert_eq!(manifest["target"], "Kotlin");
    assert_eq!(
        manifest["units"][0]["source_file"],
        "stencil/generated/StnpageGenerated.kt"
    );
}

#[test]
fn test_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocked");
    fs::write(&blocker, "not a directory").unwrap();
    let result = RustBundleBackend::new(&blocker).compile(&sample_units(), &[]);
    assert!(matches!(result, Err(BackendFailure::Io(_))));
}
