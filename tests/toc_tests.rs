use mdext::{Engine, TocError};
use pretty_assertions::assert_eq;

#[test]
fn anchors_deduplicate_in_document_order() {
    let mut engine = Engine::new();
    let out = engine.convert("# Setup\n\n## Setup\n\n### Setup");
    assert!(out.contains("<h1 id=\"setup\">"), "{out}");
    assert!(out.contains("<h2 id=\"setup-1\">"), "{out}");
    assert!(out.contains("<h3 id=\"setup-2\">"), "{out}");
}

#[test]
fn blacklisted_slugs_are_suffixed() {
    let mut engine = Engine::new();
    engine
        .set_setting("headings.auto_anchors.blacklist", vec!["top"])
        .unwrap();
    let out = engine.convert("# Top");
    assert!(out.contains("<h1 id=\"top-1\">"), "{out}");
}

#[test]
fn explicit_ids_win_over_derived_anchors() {
    let mut engine = Engine::new();
    let out = engine.convert("# Title {#me}");
    assert!(out.contains("<h1 id=\"me\">"), "{out}");
    let json = engine.table_of_contents("structured").unwrap();
    assert!(json.contains("\"id\":\"me\""), "{json}");
}

#[test]
fn transliterated_anchors() {
    let mut engine = Engine::new();
    engine
        .set_setting("headings.auto_anchors.transliterate", true)
        .unwrap();
    let out = engine.convert("# Привет мир");
    assert!(out.contains("<h1 id=\"privet-mir\">"), "{out}");
}

#[test]
fn first_heading_sets_the_indent_baseline() {
    let mut engine = Engine::new();
    let out = engine.convert("[toc]\n\n## A\n\n### B");
    // a document starting at h2 nests exactly like one starting at h1
    assert!(
        out.starts_with("<div id=\"toc\"><ul><li><a href=\"#a\">A</a><ul>"),
        "{out}"
    );
}

#[test]
fn only_listed_levels_enter_the_contents() {
    let mut engine = Engine::new();
    engine.set_setting_overwrite("toc.headings", vec!["h2"]).unwrap();
    let out = engine.convert("# A\n\n## B");
    // the heading keeps its anchor even when unlisted
    assert!(out.contains("<h1 id=\"a\">"), "{out}");

    let json = engine.table_of_contents("structured").unwrap();
    assert!(json.contains("\"id\":\"b\""), "{json}");
    assert!(!json.contains("\"id\":\"a\""), "{json}");
}

#[test]
fn markup_and_html_formats_agree() {
    let mut engine = Engine::new();
    engine.convert("# One\n\n## Two");
    assert_eq!(
        engine.table_of_contents("markup").unwrap(),
        engine.table_of_contents("html").unwrap()
    );
    assert_eq!(
        engine.table_of_contents("structured").unwrap(),
        engine.table_of_contents("json").unwrap()
    );
}

#[test]
fn unknown_format_is_rejected() {
    let engine = Engine::new();
    assert_eq!(
        engine.table_of_contents("xml"),
        Err(TocError::UnknownFormat("xml".to_string()))
    );
}

#[test]
fn toc_state_resets_between_conversions() {
    let mut engine = Engine::new();
    engine.convert("# One");
    engine.convert("# Two");
    let json = engine.table_of_contents("json").unwrap();
    assert!(json.contains("\"id\":\"two\""), "{json}");
    assert!(!json.contains("\"id\":\"one\""), "{json}");
}

#[test]
fn heading_records_keep_raw_text() {
    let mut engine = Engine::new();
    engine.convert("# A *b*");
    let records = engine.headings();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "A *b*");
    assert_eq!(records[0].id, "a-b");
    assert_eq!(records[0].level, 1);
}

#[test]
fn placeholder_inside_prose_is_not_a_container() {
    let mut engine = Engine::new();
    let out = engine.convert("about [toc] here\n\n# A");
    // only a paragraph holding nothing but the tag expands
    assert!(!out.contains("<div id=\"toc\">"), "{out}");
    assert!(out.contains("about [toc] here"), "{out}");
}
