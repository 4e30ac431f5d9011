//! End-to-end tests for the table-of-contents transform.

use std::collections::HashSet;

use kuchikiki::traits::TendrilSink;
use pob_toc::{HeadingScope, LowercaseSlugify, TableOfContents, TocOptions};
use pretty_assertions::assert_eq;

fn toc_with_parent(parent: &str) -> TableOfContents {
    TableOfContents::new(TocOptions {
        parent: parent.to_owned(),
        ..TocOptions::default()
    })
}

fn heading_ids(html: &str) -> Vec<String> {
    let document = kuchikiki::parse_html().one(html);
    document
        .select("h2, h3, h4, h5, h6")
        .unwrap()
        .filter_map(|h| h.attributes.borrow().get("id").map(str::to_owned))
        .collect()
}

#[test]
fn test_generates_toc_for_valid_headings() {
    let input = r"
        <body>
            <h1>Title</h1>
            <h2>Section 1</h2>
            <h3>Subsection 1.1</h3>
            <h2>Section 2</h2>
        </body>
    ";

    let output = TableOfContents::default().apply(input, Some("test.html")).unwrap();

    assert!(output.contains(r#"id="Section-1""#));
    assert!(output.contains(r#"id="Subsection-11""#));
    assert!(output.contains(r##"href="#Section-1""##));
    assert!(output.contains("<ol>"));
    assert!(output.contains("<h1>Title</h1>"));
}

#[test]
fn test_concrete_outline_shape() {
    let input = "<body><h1>Title</h1><h2>A</h2><h3>A.1</h3><h2>B</h2></body>";
    let output = TableOfContents::default().apply(input, Some("index.html")).unwrap();

    assert_eq!(heading_ids(&output), vec!["A", "A1", "B"]);
    assert!(output.ends_with(concat!(
        r##"<h2 id="B">B</h2>"##,
        r##"<ol><li><a href="#A" id="A">A</a>"##,
        r##"<ol><li><a href="#A1" id="A1">A.1</a></li></ol></li>"##,
        r##"<li><a href="#B" id="B">B</a></li></ol></body></html>"##,
    )));
}

#[test]
fn test_duplicate_headings_get_increasing_suffixes() {
    let input = r"
        <body>
            <h2>Duplicate</h2>
            <h2>Duplicate</h2>
            <h3>Duplicate</h3>
        </body>
    ";

    let output = TableOfContents::default().apply(input, Some("test.html")).unwrap();

    assert_eq!(
        heading_ids(&output),
        vec!["Duplicate", "Duplicate-1", "Duplicate-2"]
    );
}

#[test]
fn test_heading_ids_are_unique() {
    let input = r"
        <body>
            <h2>Intro</h2><h3>Intro</h3><h2>Intro-1</h2><h2>Intro</h2>
            <h4>Notes</h4><h5>Notes</h5><h2>Notes!</h2>
        </body>
    ";

    let output = TableOfContents::default().apply(input, None).unwrap();
    let ids = heading_ids(&output);
    let unique: HashSet<&String> = ids.iter().collect();

    assert_eq!(ids.len(), 7);
    assert_eq!(unique.len(), ids.len());
    assert_eq!(&ids[..4], &["Intro", "Intro-1", "Intro-1-1", "Intro-2"]);
}

#[test]
fn test_missing_mount_point_returns_input_unchanged() {
    let input = "<!DOCTYPE html>\n<html><body>  <h2>Kept   as-is</h2></body></html>\n";
    let output = toc_with_parent("#toc").apply(input, Some("page.html")).unwrap();
    assert_eq!(output, input);
}

#[test]
fn test_no_headings_removes_mount_point() {
    let input = r#"<body><nav id="toc"><p>Contents</p></nav><p>Short page</p></body>"#;
    let output = toc_with_parent("#toc").apply(input, Some("page.html")).unwrap();

    assert!(!output.contains(r#"id="toc""#));
    assert!(output.contains("<p>Short page</p>"));
}

#[test]
fn test_deeper_headings_before_first_h2_are_left_out() {
    let input = "<body><h3>Pre</h3><h2>A</h2><h3>A.1</h3></body>";
    let output = TableOfContents::default().apply(input, Some("index.html")).unwrap();

    assert_eq!(heading_ids(&output), vec!["A", "A1"]);
    assert!(output.contains("<h3>Pre</h3>"));
    assert!(!output.contains(r##"href="#Pre""##));
    assert!(output.ends_with(concat!(
        r##"<ol><li><a href="#A" id="A">A</a>"##,
        r##"<ol><li><a href="#A1" id="A1">A.1</a></li></ol></li></ol></body></html>"##,
    )));
}

#[test]
fn test_only_deep_headings_removes_mount_point() {
    let toc = TableOfContents::new(TocOptions {
        parent: "#toc".to_owned(),
        scope: HeadingScope::Document,
        ..TocOptions::default()
    });
    let input = r#"<body><nav id="toc"></nav><main><h3>Deep</h3></main></body>"#;
    let output = toc.apply(input, None).unwrap();

    assert!(!output.contains("<nav"));
    assert!(output.contains("<h3>Deep</h3>"));
}

#[test]
fn test_headings_outside_mount_point_are_ignored() {
    let input = "<body><h2>Elsewhere</h2><article><h2>Inside</h2></article></body>";
    let output = toc_with_parent("article").apply(input, None).unwrap();

    assert_eq!(heading_ids(&output), vec!["Inside"]);
    assert!(output.contains("<h2>Elsewhere</h2>"));
}

#[test]
fn test_document_scope_fills_empty_nav() {
    let input = r#"<body><nav id="toc"></nav><main><h2>One</h2><h3>Two</h3></main></body>"#;
    let toc = TableOfContents::new(TocOptions {
        parent: "#toc".to_owned(),
        scope: HeadingScope::Document,
        anchor_ids: false,
    });

    let output = toc.apply(input, Some("post.html")).unwrap();

    assert!(output.contains(concat!(
        r##"<nav id="toc"><ol><li><a href="#One">One</a>"##,
        r##"<ol><li><a href="#Two">Two</a></li></ol></li></ol></nav>"##,
    )));
}

#[test]
fn test_list_is_appended_after_existing_children() {
    let input = "<body><aside><h2>Topic</h2><p>tail</p></aside></body>";
    let output = toc_with_parent("aside").apply(input, None).unwrap();

    let tail = output.find("<p>tail</p>").unwrap();
    let list = output.find("<ol>").unwrap();
    assert!(tail < list);
}

#[test]
fn test_only_first_matching_mount_point_is_used() {
    let input = r#"<body><div class="toc"><h2>A</h2></div><div class="toc"><h2>B</h2></div></body>"#;
    let output = toc_with_parent(".toc").apply(input, None).unwrap();

    assert_eq!(output.matches("<ol>").count(), 1);
    assert_eq!(heading_ids(&output), vec!["A"]);
}

#[test]
fn test_host_slug_function() {
    let toc = TableOfContents::default().with_slugify(LowercaseSlugify);
    let output = toc.apply("<body><h2>Getting Started</h2></body>", None).unwrap();
    assert_eq!(heading_ids(&output), vec!["getting-started"]);
}

#[test]
fn test_ignores_non_html_outputs() {
    let content = "some content";
    let output = TableOfContents::default().apply(content, Some("style.css")).unwrap();
    assert_eq!(output, content);
}
