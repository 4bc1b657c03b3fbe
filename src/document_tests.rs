use super::*;

fn restart_list(texts: &[&str]) -> Block {
    Block::OrderedList {
        attrs: ListAttrs {
            restart_numbering: true,
        },
        content: texts.iter().map(|t| ListItem::with_text(t)).collect(),
    }
}

#[test]
fn restart_attribute_round_trips_through_json() {
    let document = Document::from_blocks(vec![restart_list(&["a", "b"])]);
    let json = document.to_json().expect("serialize");
    assert!(
        json.contains("\"restartNumbering\":true"),
        "flag missing from {json}"
    );

    let reloaded = Document::from_json(&json).expect("reload");
    assert_eq!(reloaded, document);
    let Block::OrderedList { attrs, .. } = &reloaded.content[0] else {
        panic!("expected an ordered list");
    };
    assert!(attrs.restart_numbering);
}

#[test]
fn untouched_list_serializes_without_attrs() {
    let document = Document::from_blocks(vec![Block::ordered_list(vec![ListItem::with_text(
        "only",
    )])]);
    let json = document.to_json().expect("serialize");
    assert!(!json.contains("restartNumbering"), "stray flag in {json}");
    assert!(!json.contains("attrs"), "stray attrs in {json}");

    let reloaded = Document::from_json(&json).expect("reload");
    let Block::OrderedList { attrs, .. } = &reloaded.content[0] else {
        panic!("expected an ordered list");
    };
    assert!(!attrs.restart_numbering);
}

#[test]
fn editor_style_json_loads() {
    let json = r#"{
        "type": "doc",
        "content": [
            {"type": "heading", "attrs": {"level": 1}, "content": [{"type": "text", "text": "臺北市政府函"}]},
            {"type": "paragraph", "content": [{"type": "text", "text": "說明："}]},
            {"type": "orderedList", "content": [
                {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "依據協議書第二條辦理。"}]}]},
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "檢附明細表。"}]},
                    {"type": "orderedList", "attrs": {"restartNumbering": true}, "content": [
                        {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "明細一"}]}]}
                    ]}
                ]}
            ]},
            {"type": "horizontalRule"},
            {"type": "paragraph", "content": [
                {"type": "text", "marks": [{"type": "bold"}], "text": "承辦人："},
                {"type": "text", "text": "王小明"}
            ]}
        ]
    }"#;

    let document = Document::from_json(json).expect("load");
    assert_eq!(document.content.len(), 5);
    let Block::OrderedList { content, .. } = &document.content[2] else {
        panic!("expected the list block");
    };
    assert_eq!(content.len(), 2);
    let nested = &content[1].content[1];
    let Block::OrderedList { attrs, .. } = nested else {
        panic!("expected a nested list");
    };
    assert!(attrs.restart_numbering);

    // reserialize and reload losslessly
    let json = document.to_json().expect("serialize");
    assert_eq!(Document::from_json(&json).expect("reload"), document);
}

#[test]
fn ordered_list_rejects_non_item_children() {
    let json = r#"{
        "type": "doc",
        "content": [
            {"type": "orderedList", "content": [{"type": "paragraph", "content": []}]}
        ]
    }"#;
    assert!(matches!(
        Document::from_json(json),
        Err(DocumentError::Json(_))
    ));
}

#[test]
fn block_ref_follows_item_and_child_steps() {
    let document = Document::from_blocks(vec![
        Block::paragraph("lead"),
        Block::ordered_list(vec![
            ListItem::with_text("first"),
            ListItem::from_blocks(vec![
                Block::paragraph("second"),
                Block::ordered_list(vec![ListItem::with_text("inner")]),
            ]),
        ]),
        Block::Blockquote {
            content: vec![Block::paragraph("quoted")],
        },
    ]);

    let mut path = BlockPath::new_root(1);
    path.push_item(1, 0);
    assert_eq!(
        block_ref(&document, &path).map(block_plain_text),
        Some("second".to_string())
    );

    let mut nested = BlockPath::new_root(1);
    nested.push_item(1, 1);
    nested.push_item(0, 0);
    assert_eq!(
        block_ref(&document, &nested).map(block_plain_text),
        Some("inner".to_string())
    );
    assert_eq!(list_depth_at(&nested), Some(2));

    let mut quoted = BlockPath::new_root(2);
    quoted.push_child(0);
    assert_eq!(
        block_ref(&document, &quoted).map(block_plain_text),
        Some("quoted".to_string())
    );
    assert_eq!(list_depth_at(&quoted), None);

    let missing = BlockPath::new_root(9);
    assert!(block_ref(&document, &missing).is_none());
}

#[test]
fn emptiness_reflects_inline_content() {
    assert!(block_is_empty(&Block::paragraph("")));
    assert!(!block_is_empty(&Block::paragraph("x")));
    assert!(!block_is_empty(&Block::HorizontalRule));
    assert!(list_item_is_empty(&ListItem::with_text("")));
    assert!(list_item_is_empty(&ListItem::from_blocks(Vec::new())));
    assert!(!list_item_is_empty(&ListItem::with_text("content")));
}
