use super::*;
use crate::document::Block;
use crate::html::parse_blocks;

fn word_paragraph(level: u8, text: &str) -> String {
    format!(
        "<p class=MsoListParagraph style='margin-left:36.0pt;mso-list:l0 level{level} lfo1'>\
         <!--[if !supportLists]--><span style='mso-list:Ignore'>一、<span style='font:7.0pt \
         \"Times New Roman\"'>&nbsp;&nbsp;</span></span><!--[endif]-->{text}</p>"
    )
}

fn word_fragment(body: &str) -> String {
    format!(
        "<html xmlns:w=\"urn:schemas-microsoft-com:office:word\"><body>{body}</body></html>"
    )
}

/// Depth-first (level, text) pairs of the content-carrying list items.
fn collect_levels(html: &str) -> Vec<(u8, String)> {
    fn walk(blocks: &[Block], depth: u8, out: &mut Vec<(u8, String)>) {
        for block in blocks {
            if let Block::OrderedList { content, .. } = block {
                for item in content {
                    let mut text = String::new();
                    let mut nested: Vec<&Block> = Vec::new();
                    for child in &item.content {
                        if matches!(child, Block::OrderedList { .. }) {
                            nested.push(child);
                        } else {
                            text.push_str(&crate::document::block_plain_text(child));
                        }
                    }
                    if !text.trim().is_empty() {
                        out.push((depth, text.trim().to_string()));
                    }
                    for child in nested {
                        walk(std::slice::from_ref(child), depth + 1, out);
                    }
                }
            }
        }
    }
    let blocks = parse_blocks(html);
    let mut out = Vec::new();
    walk(&blocks, 1, &mut out);
    out
}

#[test]
fn non_word_markup_passes_through_unchanged() {
    let html = "<p>hello <strong>world</strong></p><ol><li>kept as-is</li></ol>";
    assert_eq!(transform_pasted_html(html), html);
}

#[test]
fn word_fingerprints_are_detected() {
    assert!(is_word_html("<html xmlns:w=\"urn:schemas-microsoft-com:office:word\">"));
    assert!(is_word_html("<p style='mso-list:l0 level1 lfo1'>x</p>"));
    assert!(is_word_html("<p class=MsoNormal>x</p>"));
    assert!(is_word_html("<p class=MsoListParagraph>x</p>"));
    assert!(!is_word_html("<p class=normal style='color:red'>x</p>"));
}

#[test]
fn flat_word_run_rebuilds_the_documented_level_sequence() {
    let body: String = [1u8, 2, 2, 1, 3, 1]
        .iter()
        .enumerate()
        .map(|(i, level)| word_paragraph(*level, &format!("item{i}")))
        .collect();
    let out = transform_pasted_html(&word_fragment(&body));

    let levels = collect_levels(&out);
    assert_eq!(
        levels.iter().map(|(d, _)| *d).collect::<Vec<_>>(),
        vec![1, 2, 2, 1, 3, 1]
    );
    assert_eq!(levels.len(), 6);
    assert_eq!(levels[0].1, "item0");
    assert_eq!(levels[4].1, "item4");
}

#[test]
fn marker_runs_and_conditional_comments_are_stripped() {
    let out = transform_pasted_html(&word_fragment(&word_paragraph(1, "正文")));
    assert!(!out.contains("一、"), "marker text survived: {out}");
    assert!(!out.contains("supportLists"), "comment survived: {out}");
    assert!(!out.contains("endif"), "comment survived: {out}");
    assert!(!out.contains("mso-list"), "vendor style survived: {out}");
    assert!(out.contains("正文"));
}

#[test]
fn margin_left_fallback_converts_units_to_levels() {
    let cases = [
        ("36.0pt", 1u8),
        ("72.0pt", 2),
        ("1.27cm", 1),
        ("2.54cm", 2),
        ("1.5in", 3),
        ("6.0em", 2),
        ("96px", 2),
    ];
    for (margin, expected) in cases {
        let body = format!(
            "<p class=MsoListParagraph style='margin-left:{margin}'>indented</p>"
        );
        let out = transform_pasted_html(&word_fragment(&body));
        let levels = collect_levels(&out);
        assert_eq!(
            levels.iter().map(|(d, _)| *d).collect::<Vec<_>>(),
            vec![expected],
            "margin {margin} should infer level {expected}: {out}"
        );
    }
}

#[test]
fn list_class_without_margin_defaults_to_level_one() {
    let body = "<p class=MsoListParagraph>unmeasured</p>";
    let out = transform_pasted_html(&word_fragment(body));
    assert_eq!(
        collect_levels(&out),
        vec![(1, "unmeasured".to_string())]
    );
}

#[test]
fn non_list_paragraph_breaks_the_segment() {
    let body = format!(
        "{}{}{}",
        word_paragraph(1, "first"),
        "<p class=MsoNormal>between</p>",
        word_paragraph(1, "second")
    );
    let out = transform_pasted_html(&word_fragment(&body));
    let blocks = parse_blocks(&out);

    let kinds: Vec<bool> = blocks.iter().map(Block::is_list).collect();
    assert_eq!(kinds, vec![true, false, true], "blocks: {blocks:?}");
    // each segment numbers independently of the markup — continuity is the
    // structural model's job, not the paste normalizer's
    assert_eq!(
        collect_levels(&out),
        vec![(1, "first".to_string()), (1, "second".to_string())]
    );
}

#[test]
fn vendor_styles_are_stripped_but_user_styling_survives() {
    let body = "<p class='MsoNormal custom' lang=ZH-TW style='color:red;mso-fareast-language:ZH-TW;\
                margin-left:36.0pt;line-height:115%'>styled</p>";
    let out = transform_pasted_html(&word_fragment(body));
    assert!(out.contains("color:red") || out.contains("color: red"), "user style lost: {out}");
    assert!(!out.contains("mso-"), "vendor style survived: {out}");
    assert!(!out.contains("margin-left"), "margin survived: {out}");
    assert!(!out.contains("line-height"), "line-height survived: {out}");
    assert!(!out.contains("MsoNormal"), "vendor class survived: {out}");
    assert!(out.contains("class=\"custom\""), "user class lost: {out}");
    assert!(!out.contains("lang="), "lang attribute survived: {out}");
}

#[test]
fn office_namespace_tags_are_removed() {
    let body = "<p class=MsoNormal>text<o:p></o:p></p><w:sdt><p class=MsoNormal>inner</p></w:sdt>";
    let out = transform_pasted_html(&word_fragment(body));
    assert!(!out.contains("<o:p"), "o:p survived: {out}");
    assert!(!out.contains("<w:"), "w: tag survived: {out}");
    assert!(out.contains("text"));
    assert!(out.contains("inner"));
}

#[test]
fn level_jump_creates_a_placeholder_item() {
    let body = format!(
        "{}{}",
        word_paragraph(1, "top"),
        word_paragraph(3, "deep")
    );
    let out = transform_pasted_html(&word_fragment(&body));
    assert_eq!(
        collect_levels(&out),
        vec![(1, "top".to_string()), (3, "deep".to_string())]
    );
}

#[test]
fn empty_input_stays_empty() {
    assert_eq!(transform_pasted_html(""), "");
    // fingerprinted but contentless input degrades to nothing
    let out = transform_pasted_html("<html xmlns:w=\"urn:x\"><body></body></html>");
    assert_eq!(out, "");
}
