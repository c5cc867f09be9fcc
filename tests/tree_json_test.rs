//! Integration tests for JSON document trees.

use rst2html::render::to_json;
use rst2html::{
    parse, render_json_tree, DocumentParser, Error, JsonFormat, JsonTreeParser, Node,
    RenderOptions, Rst2Html,
};

const SAMPLE_RST: &str = include_str!("fixtures/sample.rst");
const SAMPLE_HTML: &str = include_str!("fixtures/sample.html");

const SECTION_TREE: &str = r#"{
  "type": "document",
  "children": [
    {
      "type": "section",
      "depth": 1,
      "children": [
        { "type": "title", "children": [{ "type": "text", "value": "Title" }] },
        {
          "type": "paragraph",
          "children": [
            { "type": "text", "value": "Hello " },
            {
              "type": "interpreted_text",
              "role": "math",
              "children": [{ "type": "text", "value": "x^2" }]
            },
            { "type": "text", "value": ".\n" }
          ]
        }
      ]
    }
  ]
}"#;

#[test]
fn test_render_external_tree() {
    let html = render_json_tree(SECTION_TREE, &RenderOptions::default()).unwrap();
    let expected = concat!(
        "<div class=\"rst-document\">\n",
        "  <div class=\"rst-section\">\n",
        "    <h1 class=\"rst-title-1\">\n",
        "<span class=\"rst-text\">Title</span>\n",
        "    </h1>\n",
        "    <p class=\"rst-paragraph\">\n",
        "<span class=\"rst-text\">Hello </span>",
        "<span class=\"rst-interpreted_text rst-role-math\"><span class=\"rst-text\">x^2</span></span>",
        "<span class=\"rst-text\">.</span>\n",
        "    </p>\n",
        "  </div>\n",
        "\n",
        "</div>\n",
    );
    assert_eq!(html, expected);
}

#[test]
fn test_unknown_types_are_accepted() {
    let json = r#"{
      "type": "document",
      "children": [
        { "type": "footnote", "children": [{ "type": "text", "value": "note" }] },
        { "type": "comment", "value": "hidden\n" },
        { "type": "transition" }
      ]
    }"#;

    let doc = JsonTreeParser::new().parse(json).unwrap();
    assert_eq!(
        doc,
        Node::document(vec![
            Node::unknown("footnote", vec![Node::text("note")]).unwrap(),
            Node::unknown_leaf("comment", "hidden\n").unwrap(),
            Node::Transition,
        ])
    );

    let html = rst2html::render_tree(&doc, &RenderOptions::default());
    assert!(html.contains("  <div class=\"rst-unknown rst-footnote\">\n"));
    assert!(html.contains("<div class=\"rst-unknown rst-comment\">hidden</div>"));
    assert!(html.contains("<div class=\"rst-unknown rst-transition\"></div>"));
}

#[test]
fn test_contract_violations_are_rejected() {
    let cases = [
        r#"{"type":"text"}"#,
        r#"{"type":"paragraph"}"#,
        r#"{"type":"section","children":[{"type":"title","children":[]}]}"#,
        r#"{"type":"section","depth":2,"children":[]}"#,
        r#"{"type":"section","depth":2,"children":[{"type":"title"}]}"#,
        r#"{"type":"footnote"}"#,
    ];

    for json in cases {
        let result = JsonTreeParser::new().parse(json);
        assert!(
            matches!(result, Err(Error::InvalidTree(_))),
            "{} should be rejected",
            json
        );
    }
}

#[test]
fn test_malformed_json() {
    let result = JsonTreeParser::new().parse("{\"type\":");
    assert!(matches!(result, Err(Error::Json(_))));

    let result = JsonTreeParser::new().parse(r#"{"children":[]}"#);
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_sample_tree_survives_json() {
    let doc = parse(SAMPLE_RST).unwrap();

    for format in [JsonFormat::Pretty, JsonFormat::Compact] {
        let json = to_json(&doc, format).unwrap();
        let html = Rst2Html::new().parse_json(&json).unwrap().to_html();
        assert_eq!(html, SAMPLE_HTML);
    }
}

#[test]
fn test_section_serializes_title_wrapper() {
    let doc = Node::section(2, vec![Node::text("T")], vec![]);
    let json = to_json(&doc, JsonFormat::Compact).unwrap();
    assert_eq!(
        json,
        r#"{"type":"section","depth":2,"children":[{"type":"title","children":[{"type":"text","value":"T"}]}]}"#
    );
}

#[test]
fn test_builtin_names_cannot_be_unknown() {
    assert!(matches!(
        Node::unknown("section", vec![]),
        Err(Error::InvalidTree(_))
    ));
    assert!(Node::unknown("text", vec![Node::text("x")]).is_err());
    assert!(Node::unknown("transition", vec![Node::text("x")]).is_err());
    assert!(Node::unknown_leaf("paragraph", "x").is_err());
}

#[test]
fn test_unknown_nodes_survive_json() {
    let doc = Node::document(vec![
        Node::unknown("footnote", vec![Node::text("x")]).unwrap(),
        Node::unknown("title", vec![]).unwrap(),
        Node::unknown_leaf("comment", "note\n").unwrap(),
        Node::composite("interpreted_text", vec![Node::text("y")]).unwrap(),
    ]);

    for format in [JsonFormat::Pretty, JsonFormat::Compact] {
        let json = to_json(&doc, format).unwrap();
        assert_eq!(JsonTreeParser::new().parse(&json).unwrap(), doc);
    }
}
