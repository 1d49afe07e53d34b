#![allow(clippy::unwrap_used)]

use std::time::Duration;

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_memory_resolve() {
    let resolver = MemoryCodeResolver::new().with_template("page.stn", "Hello");
    assert_eq!(
        resolver.resolve(&TemplateName::new("page.stn")).unwrap(),
        Some("Hello".to_string())
    );
    assert_eq!(
        resolver.resolve(&TemplateName::new("missing.stn")).unwrap(),
        None
    );
}

#[test]
fn test_memory_change_tracking() {
    let resolver = MemoryCodeResolver::new();
    let name = TemplateName::new("page.stn");
    resolver.insert("page.stn", "v1");
    assert!(resolver.has_changed(&name));

    resolver.resolve(&name).unwrap();
    assert!(!resolver.has_changed(&name));

    resolver.insert("page.stn", "v2");
    assert!(resolver.has_changed(&name));
    assert_eq!(resolver.resolve(&name).unwrap(), Some("v2".to_string()));

    assert!(resolver.remove(&name));
    assert!(resolver.has_changed(&name));
    assert_eq!(resolver.resolve(&name).unwrap(), None);
}

#[test]
fn test_memory_list_is_sorted() {
    let resolver = MemoryCodeResolver::new()
        .with_template("tag/b.stn", "")
        .with_template("a.stn", "")
        .with_template("layout/c.stn", "");
    assert_eq!(
        resolver.list_all_names().unwrap(),
        vec![
            TemplateName::new("a.stn"),
            TemplateName::new("layout/c.stn"),
            TemplateName::new("tag/b.stn"),
        ]
    );
}

fn write(root: &Path, name: &str, contents: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_directory_resolve() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "tag/card.stn", "<b>card</b>");
    let resolver = DirectoryCodeResolver::new(dir.path());

    assert_eq!(
        resolver.resolve(&TemplateName::new("tag/card.stn")).unwrap(),
        Some("<b>card</b>".to_string())
    );
    assert_eq!(
        resolver.resolve(&TemplateName::new("tag/none.stn")).unwrap(),
        None
    );
}

#[test]
fn test_directory_lists_template_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "page.stn", "");
    write(dir.path(), "tag/forms/input.stn", "");
    write(dir.path(), "layout/main.kstn", "");
    write(dir.path(), "notes.txt", "");
    let resolver = DirectoryCodeResolver::new(dir.path());

    assert_eq!(
        resolver.list_all_names().unwrap(),
        vec![
            TemplateName::new("layout/main.kstn"),
            TemplateName::new("page.stn"),
            TemplateName::new("tag/forms/input.stn"),
        ]
    );
}

#[test]
fn test_directory_change_tracking() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "page.stn", "v1");
    let resolver = DirectoryCodeResolver::new(dir.path());
    let name = TemplateName::new("page.stn");

    assert!(resolver.has_changed(&name));
    resolver.resolve(&name).unwrap();
    assert!(!resolver.has_changed(&name));

    let file = fs::File::options()
        .write(true)
        .open(dir.path().join("page.stn"))
        .unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(60))
        .unwrap();
    assert!(resolver.has_changed(&name));

    fs::remove_file(dir.path().join("page.stn")).unwrap();
    assert!(resolver.has_changed(&name));
}
