use frame_narrator::frames::markdown::parse_document;
use frame_narrator::frames::{self, EntryKind, Frame};

const DOC: &str = r#"text: First we set up the package manifest.
selectedFile: todo-app/package.json
scrollLine: 0
```json
{
  "name": "todo-app"
}
```
---
text: Then the Todo class gets a toggle method.
selectedFile: todo-app/src/todo.js
scrollLine: 4
highlights: [1, 9]
```javascript
class Todo {}
```
---
"#;

#[test]
fn parses_metadata_and_code() {
    let parsed = parse_document(DOC).unwrap();
    assert_eq!(parsed.len(), 2);

    let first = &parsed[0];
    assert_eq!(first.text, "First we set up the package manifest.");
    assert_eq!(first.selected_file, "todo-app/package.json");
    assert_eq!(first.language, "json");
    assert_eq!(first.content, "{\n  \"name\": \"todo-app\"\n}");
    assert_eq!(first.scroll_line, 0);
    assert!(first.highlights.is_empty());

    let second = &parsed[1];
    assert_eq!(second.language, "javascript");
    assert_eq!(second.scroll_line, 4);
    assert_eq!(second.highlights, vec![1, 9]);
}

#[test]
fn tree_is_cumulative_with_folders_first() {
    let parsed = parse_document(DOC).unwrap();

    let first_paths: Vec<&str> = parsed[0].tree.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(first_paths, ["todo-app", "todo-app/package.json"]);

    let second_paths: Vec<&str> = parsed[1].tree.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        second_paths,
        [
            "todo-app",
            "todo-app/src",
            "todo-app/src/todo.js",
            "todo-app/package.json",
        ]
    );
    assert_eq!(parsed[1].tree[0].kind, EntryKind::Folder);
    assert_eq!(parsed[1].tree[2].kind, EntryKind::File);
}

#[test]
fn missing_text_names_the_frame() {
    let doc = "selectedFile: a.js\n```js\nlet x;\n```\n---\n";
    let err = parse_document(doc).unwrap_err();
    assert_eq!(err.to_string(), "frame 1: missing required field \"text\"");
}

#[test]
fn missing_selected_file_is_an_error() {
    let doc = "text: Hello.\n```js\nlet x;\n```\n---\n";
    let err = parse_document(doc).unwrap_err();
    assert_eq!(
        err.to_string(),
        "frame 1: missing required field \"selectedFile\""
    );
}

#[test]
fn empty_document_is_an_error() {
    let err = parse_document("\n\n---\n\n").unwrap_err();
    assert_eq!(err.to_string(), "no frames found in document");
}

#[test]
fn json_round_trip_uses_camel_case_keys() {
    let parsed = parse_document(DOC).unwrap();
    let json = frames::to_json(&parsed).unwrap();
    assert!(json.contains("\"selectedFile\""));
    assert!(json.contains("\"scrollLine\""));

    let reloaded: Vec<Frame> = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, parsed);
}

#[test]
fn sparse_records_default_to_empty_text() {
    let raw = r#"[{"text": "narrated"}, {}, {"caption": "ignored"}]"#;
    let loaded: Vec<Frame> = serde_json::from_str(raw).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0].text, "narrated");
    assert_eq!(loaded[1].text, "");
    assert_eq!(loaded[2].text, "");
}
