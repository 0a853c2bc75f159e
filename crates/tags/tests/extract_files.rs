use context_tags::{Tag, TagExtractor, TagKind};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn definitions(tags: &[Tag]) -> Vec<(&str, Option<usize>)> {
    tags.iter()
        .filter(|t| t.kind == TagKind::Definition)
        .map(|t| (t.name.as_str(), t.line))
        .collect()
}

#[test]
fn java_class_and_methods() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Test.java");
    fs::write(
        &path,
        r#"public class Test {
    public static void main(String[] args) {
        System.out.println("Hello");
    }

    public void greet() {
        main(null);
    }
}
"#,
    )
    .unwrap();

    let tags = TagExtractor::new().extract(&path, "Test.java");

    assert_eq!(
        definitions(&tags),
        vec![("Test", Some(0)), ("main", Some(1)), ("greet", Some(5))]
    );
    let refs: Vec<_> = tags
        .iter()
        .filter(|t| t.kind == TagKind::Reference)
        .map(|t| t.name.as_str())
        .collect();
    assert!(refs.contains(&"println"));
    assert!(refs.contains(&"main"));
    assert!(tags.iter().all(|t| t.rel_fname == "Test.java" && t.fname == path));
}

#[test]
fn typescript_and_tsx() {
    let dir = tempdir().unwrap();
    let ts = dir.path().join("api.ts");
    fs::write(
        &ts,
        "interface User { name: string }\n\nexport function load(id: number): User {\n  return fetchUser(id);\n}\n",
    )
    .unwrap();
    let tsx = dir.path().join("view.tsx");
    fs::write(
        &tsx,
        "export const View = () => {\n  return <div>{load(1).name}</div>;\n};\n",
    )
    .unwrap();

    let extractor = TagExtractor::new();
    let ts_tags = extractor.extract(&ts, "api.ts");
    assert_eq!(definitions(&ts_tags), vec![("User", Some(0)), ("load", Some(2))]);

    let tsx_tags = extractor.extract(&tsx, "view.tsx");
    assert_eq!(definitions(&tsx_tags), vec![("View", Some(0))]);
    assert!(tsx_tags
        .iter()
        .any(|t| t.kind == TagKind::Reference && t.name == "load"));
}

#[test]
fn javascript_functions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("util.js");
    fs::write(
        &path,
        "function add(a, b) { return a + b; }\nconst twice = (x) => add(x, x);\n",
    )
    .unwrap();

    let tags = TagExtractor::new().extract(&path, "util.js");
    assert_eq!(definitions(&tags), vec![("add", Some(0)), ("twice", Some(1))]);
}

#[test]
fn nonexistent_file_yields_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.py");
    assert!(TagExtractor::new().extract(&path, "missing.py").is_empty());
}

#[test]
fn unsupported_extension_yields_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.xyz");
    fs::write(&path, "def foo():\n    pass\n").unwrap();
    assert!(TagExtractor::new().extract(&path, "notes.xyz").is_empty());
}

#[test]
fn empty_file_yields_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.py");
    fs::write(&path, "").unwrap();
    assert!(TagExtractor::new().extract(&path, "empty.py").is_empty());
}

#[test]
fn image_named_as_source_yields_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("diagram.png");
    fs::write(&path, "def foo():\n    pass\n").unwrap();
    assert!(TagExtractor::new().extract(&path, "diagram.png").is_empty());
}

#[test]
fn tags_serialize_to_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.py");
    fs::write(&path, "def foo():\n    pass\n").unwrap();

    let tags = TagExtractor::new().extract(&path, "a.py");
    let json = serde_json::to_value(&tags).unwrap();
    assert_eq!(json[0]["name"], "foo");
    assert_eq!(json[0]["kind"], "definition");
    assert_eq!(json[0]["line"], 0);
}
