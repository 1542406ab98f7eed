use frame_narrator::sanitize::{sanitize_document, sanitize_text};

#[test]
fn spells_out_operators() {
    let (text, count) = sanitize_text("a === b && c != d");
    assert_eq!(text, "a strictly equals b and c loosely not equals d");
    assert_eq!(count, 3);
}

#[test]
fn specific_operators_win_over_general_ones() {
    let (text, _) = sanitize_text("x !== y");
    assert_eq!(text, "x strictly not equals y");
}

#[test]
fn strips_markdown_formatting() {
    let (text, _) = sanitize_text("**bold** and *italic* and `code` and [docs](https://example.com)");
    assert_eq!(text, "bold and italic and code and docs");
}

#[test]
fn rewrites_slash_idioms_before_keywords() {
    let (text, _) = sanitize_text("we use async/await in a try/catch");
    assert_eq!(text, "we use ay-sink and ah-weight in a try and catch");
}

#[test]
fn rewrites_qualified_names() {
    let (text, _) = sanitize_text("console.log shows JSON.parse output, plain JSON too");
    assert_eq!(
        text,
        "console log shows Jay-son dot parse output, plain Jay-son too"
    );
}

#[test]
fn dot_methods_keep_the_receiver() {
    let (text, _) = sanitize_text("response.then gives items.forEach a list");
    assert_eq!(text, "response dot then gives items for each a list");
}

#[test]
fn drops_empty_parens_and_flattens_newlines() {
    let (text, _) = sanitize_text("call main()\nthen exit");
    assert_eq!(text, "call main then exit");
}

#[test]
fn arrow_becomes_which_returns() {
    let (text, _) = sanitize_text("a callback => the result");
    assert_eq!(text, "a callback which returns the result");
}

#[test]
fn document_pass_flattens_multiline_text() {
    let doc = "text: First sentence.\nAnd a continuation.\nselectedFile: a.js\n---\n";
    let (result, _) = sanitize_document(doc);
    assert_eq!(
        result,
        "text: First sentence. And a continuation.\nselectedFile: a.js\n---\n"
    );
}

#[test]
fn document_pass_leaves_code_blocks_alone() {
    let doc = "text: Uses x === y here.\nselectedFile: a.js\n```js\nif (x === y) {}\n```\n---\n";
    let (result, count) = sanitize_document(doc);
    assert!(result.contains("text: Uses x strictly equals y here."));
    assert!(result.contains("if (x === y) {}"));
    assert_eq!(count, 1);
}

#[test]
fn document_pass_is_stable_on_clean_input() {
    let doc = "text: Already clean narration.\nselectedFile: a.js\n```js\nlet x;\n```\n---\n";
    let (first, count) = sanitize_document(doc);
    assert_eq!(first, doc);
    assert_eq!(count, 0);

    let (second, _) = sanitize_document(&first);
    assert_eq!(second, first);
}

#[test]
fn document_pass_flushes_trailing_text() {
    let doc = "selectedFile: a.js\ntext: Ends mid-thought";
    let (result, _) = sanitize_document(doc);
    assert_eq!(result, "selectedFile: a.js\ntext: Ends mid-thought");
}
