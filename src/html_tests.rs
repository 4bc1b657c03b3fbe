use super::*;
use crate::document::Document;

#[test]
fn writer_emits_restart_attribute_only_when_set() {
    let flagged = Document::from_blocks(vec![Block::OrderedList {
        attrs: ListAttrs {
            restart_numbering: true,
        },
        content: vec![ListItem::with_text("a")],
    }]);
    assert_eq!(
        to_html(&flagged),
        "<ol data-restart-numbering=\"true\"><li><p>a</p></li></ol>"
    );

    let plain = Document::from_blocks(vec![Block::ordered_list(vec![ListItem::with_text("a")])]);
    assert_eq!(to_html(&plain), "<ol><li><p>a</p></li></ol>");
}

#[test]
fn writer_nests_lists_and_marks() {
    let document = Document::from_blocks(vec![
        Block::Heading {
            attrs: HeadingAttrs { level: 1 },
            content: vec![Inline::text("函")],
        },
        Block::ordered_list(vec![ListItem::from_blocks(vec![
            Block::Paragraph {
                content: vec![
                    Inline::styled("主旨", vec![Mark::Bold]),
                    Inline::text("：請查照。"),
                ],
            },
            Block::ordered_list(vec![ListItem::with_text("inner")]),
        ])]),
    ]);
    assert_eq!(
        to_html(&document),
        "<h1>函</h1><ol><li><p><strong>主旨</strong>：請查照。</p>\
         <ol><li><p>inner</p></li></ol></li></ol>"
    );
}

#[test]
fn writer_escapes_text_and_attributes() {
    let document = Document::from_blocks(vec![Block::Paragraph {
        content: vec![Inline::styled(
            "a < b & c",
            vec![Mark::Link {
                attrs: LinkAttrs {
                    href: "https://example.com/?a=1&b=\"2\"".to_string(),
                },
            }],
        )],
    }]);
    assert_eq!(
        to_html(&document),
        "<p><a href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\">a &lt; b &amp; c</a></p>"
    );
}

#[test]
fn reader_round_trips_writer_output() {
    let document = Document::from_blocks(vec![
        Block::paragraph("lead"),
        Block::OrderedList {
            attrs: ListAttrs {
                restart_numbering: true,
            },
            content: vec![
                ListItem::with_text("first"),
                ListItem::from_blocks(vec![
                    Block::paragraph("second"),
                    Block::ordered_list(vec![ListItem::with_text("inner")]),
                ]),
            ],
        },
        Block::Blockquote {
            content: vec![Block::paragraph("備註")],
        },
        Block::HorizontalRule,
    ]);
    let html = to_html(&document);
    let reloaded = parse_document_html(&html);
    assert_eq!(reloaded, document);
}

#[test]
fn reader_wraps_bare_item_text_in_a_paragraph() {
    let blocks = parse_blocks("<ol><li>plain</li><li><p>wrapped</p></li></ol>");
    let [Block::OrderedList { content, .. }] = blocks.as_slice() else {
        panic!("expected a single list, got {blocks:?}");
    };
    assert_eq!(content[0].content, vec![Block::paragraph("plain")]);
    assert_eq!(content[1].content, vec![Block::paragraph("wrapped")]);
}

#[test]
fn reader_reads_marks_and_breaks() {
    let blocks = parse_blocks("<p><strong>bold <em>both</em></strong> plain<br>next</p>");
    let [Block::Paragraph { content }] = blocks.as_slice() else {
        panic!("expected one paragraph, got {blocks:?}");
    };
    assert_eq!(
        content,
        &vec![
            Inline::styled("bold ", vec![Mark::Bold]),
            Inline::styled("both", vec![Mark::Bold, Mark::Italic]),
            Inline::text(" plain"),
            Inline::HardBreak,
            Inline::text("next"),
        ]
    );
}

#[test]
fn reader_degrades_unknown_containers_to_their_content() {
    let blocks = parse_blocks("<div><p>kept</p></div><section><p>also kept</p></section>");
    assert_eq!(
        blocks,
        vec![Block::paragraph("kept"), Block::paragraph("also kept")]
    );
}

#[test]
fn reader_ignores_missing_restart_attribute() {
    let blocks = parse_blocks("<ol><li><p>a</p></li></ol>");
    let [Block::OrderedList { attrs, .. }] = blocks.as_slice() else {
        panic!("expected a list");
    };
    assert!(!attrs.restart_numbering);
}
