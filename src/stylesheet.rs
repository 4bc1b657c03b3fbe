//! Declarative counter rules for the presentation layer.
//!
//! The document never stores rendered numbers, so whatever displays it
//! has to realize the continuity model itself. For CSS-based renderers
//! that means one shared counter per depth (`list-L1` … `list-L7`),
//! reset once at the scope root, incremented once per item at its depth,
//! and zeroed again only on lists carrying `data-restart-numbering`.
//! Restart flags therefore change local reset points and nothing else.

use std::fmt::Write;

use crate::numbering::MAX_STYLED_DEPTH;

struct DepthStyle {
    counter: &'static str,
    system: &'static str,
    parenthesized: bool,
    padding: &'static str,
    label_width: &'static str,
}

/// Numeral system and indent geometry per nesting depth, following the
/// official-document conventions: 一、 (一) 1、 (1) 甲、 (甲) 子、.
const DEPTH_STYLES: [DepthStyle; MAX_STYLED_DEPTH as usize] = [
    DepthStyle {
        counter: "list-L1",
        system: "trad-chinese-informal",
        parenthesized: false,
        padding: "2em",
        label_width: "2em",
    },
    DepthStyle {
        counter: "list-L2",
        system: "trad-chinese-informal",
        parenthesized: true,
        padding: "1.5em",
        label_width: "2em",
    },
    DepthStyle {
        counter: "list-L3",
        system: "decimal",
        parenthesized: false,
        padding: "1.5em",
        label_width: "1.5em",
    },
    DepthStyle {
        counter: "list-L4",
        system: "decimal",
        parenthesized: true,
        padding: "1.2em",
        label_width: "1.5em",
    },
    DepthStyle {
        counter: "list-L5",
        system: "cjk-heavenly-stem",
        parenthesized: false,
        padding: "1.8em",
        label_width: "1.8em",
    },
    DepthStyle {
        counter: "list-L6",
        system: "cjk-heavenly-stem",
        parenthesized: true,
        padding: "1.3em",
        label_width: "1.8em",
    },
    DepthStyle {
        counter: "list-L7",
        system: "cjk-earthly-branch",
        parenthesized: false,
        padding: "1.8em",
        label_width: "1.8em",
    },
];

fn list_selector(scope: &str, depth: usize) -> String {
    let mut selector = String::from(scope);
    for _ in 0..depth {
        selector.push_str(" ol");
    }
    selector
}

fn content_expression(style: &DepthStyle) -> String {
    if style.parenthesized {
        format!("\"(\" counter({}, {}) \")\"", style.counter, style.system)
    } else {
        format!("counter({}, {}) \"、\"", style.counter, style.system)
    }
}

/// Emit the counter rules for ordered lists under `scope` (an arbitrary
/// selector such as `.editor-surface` or `body`).
///
/// All seven counters are reset exactly once, on the scope root, so a
/// list at any depth continues the running count of earlier same-depth
/// lists anywhere in the document. The only other reset points are the
/// `counter-set` overrides on restart-flagged lists.
pub fn counter_rules(scope: &str) -> String {
    let mut css = String::new();

    let all_counters: Vec<&str> = DEPTH_STYLES.iter().map(|s| s.counter).collect();
    let _ = writeln!(css, "{scope} {{");
    let _ = writeln!(css, "  counter-reset: {};", all_counters.join(" "));
    let _ = writeln!(css, "}}");

    for (idx, style) in DEPTH_STYLES.iter().enumerate() {
        let depth = idx + 1;
        let selector = list_selector(scope, depth);

        let _ = writeln!(css);
        let _ = writeln!(css, "{selector} {{");
        let _ = writeln!(css, "  list-style: none;");
        let _ = writeln!(css, "  padding-left: {};", style.padding);
        let _ = writeln!(css, "}}");

        let _ = writeln!(css, "{selector} > li {{");
        let _ = writeln!(css, "  counter-increment: {};", style.counter);
        let _ = writeln!(css, "  position: relative;");
        let _ = writeln!(css, "  list-style: none;");
        let _ = writeln!(css, "}}");

        let _ = writeln!(css, "{selector} > li::marker {{");
        let _ = writeln!(css, "  content: none;");
        let _ = writeln!(css, "}}");

        let _ = writeln!(css, "{selector} > li::before {{");
        let _ = writeln!(css, "  content: {};", content_expression(style));
        let _ = writeln!(css, "  position: absolute;");
        let _ = writeln!(css, "  left: -{};", style.label_width);
        let _ = writeln!(css, "  width: {};", style.label_width);
        let _ = writeln!(css, "  text-align: right;");
        let _ = writeln!(css, "  white-space: nowrap;");
        let _ = writeln!(css, "}}");
    }

    let _ = writeln!(css);
    for (idx, style) in DEPTH_STYLES.iter().enumerate() {
        let depth = idx + 1;
        let mut selector = list_selector(scope, depth);
        selector.push_str("[data-restart-numbering=\"true\"]");
        let _ = writeln!(css, "{selector} {{ counter-set: {} 0; }}", style.counter);
    }

    css
}

// ============================================================================
// Print stylesheet
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaperSize {
    #[default]
    A4,
    A3,
    B4,
}

impl PaperSize {
    fn css_name(self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::A3 => "A3",
            Self::B4 => "B4",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintOptions {
    pub paper: PaperSize,
    pub orientation: Orientation,
}

const PRINT_FONT_STACK: &str = "DFKai-SB, BiauKai, '標楷體', serif";

/// The complete print stylesheet for an official document: A-series page
/// setup with a binding-edge margin on the left, 標楷體 body text, page
/// number footer, and the list counter rules scoped to `body`.
pub fn print_stylesheet(options: &PrintOptions) -> String {
    let mut css = String::new();

    let size = match options.orientation {
        Orientation::Portrait => options.paper.css_name().to_string(),
        Orientation::Landscape => format!("{} landscape", options.paper.css_name()),
    };

    let _ = writeln!(css, "@page {{");
    let _ = writeln!(css, "  size: {size};");
    // binding edge: 2.5cm + 1.5cm gutter on the left
    let _ = writeln!(css, "  margin: 2.5cm 2.5cm 2.5cm 4cm;");
    let _ = writeln!(css);
    let _ = writeln!(css, "  @bottom-center {{");
    let _ = writeln!(css, "    content: counter(page);");
    let _ = writeln!(css, "    font-family: {PRINT_FONT_STACK};");
    let _ = writeln!(css, "    font-size: 10pt;");
    let _ = writeln!(css, "  }}");
    let _ = writeln!(css, "}}");
    let _ = writeln!(css);

    let _ = writeln!(css, "body {{");
    let _ = writeln!(css, "  font-family: {PRINT_FONT_STACK};");
    let _ = writeln!(css, "  font-size: 12pt;");
    let _ = writeln!(css, "  line-height: 1.5;");
    let _ = writeln!(css, "  color: #000;");
    let _ = writeln!(css, "  text-align: justify;");
    let _ = writeln!(css, "  margin: 0;");
    let _ = writeln!(css, "}}");
    let _ = writeln!(css);

    let _ = writeln!(
        css,
        "h1 {{ font-size: 20pt; margin: 1em 0 0.5em; page-break-after: avoid; }}"
    );
    let _ = writeln!(
        css,
        "h2 {{ font-size: 16pt; margin: 0.8em 0 0.4em; page-break-after: avoid; }}"
    );
    let _ = writeln!(
        css,
        "h3 {{ font-size: 14pt; margin: 0.6em 0 0.3em; page-break-after: avoid; }}"
    );
    let _ = writeln!(
        css,
        "h4, h5, h6 {{ font-size: 12pt; margin: 0.5em 0 0.2em; page-break-after: avoid; }}"
    );
    let _ = writeln!(css);
    let _ = writeln!(css, "p {{ margin: 0.5em 0; orphans: 3; widows: 3; }}");
    let _ = writeln!(css);
    let _ = writeln!(css, "ol {{ margin: 0.5em 0; }}");
    let _ = writeln!(
        css,
        "li {{ margin: 0.2em 0; page-break-inside: avoid; }}"
    );
    let _ = writeln!(css);

    css.push_str(&counter_rules("body"));

    let _ = writeln!(css);
    let _ = writeln!(css, "blockquote {{");
    let _ = writeln!(css, "  border-left: 2pt solid #666;");
    let _ = writeln!(css, "  padding-left: 1em;");
    let _ = writeln!(css, "  margin: 1em 0;");
    let _ = writeln!(css, "  color: #333;");
    let _ = writeln!(css, "  page-break-inside: avoid;");
    let _ = writeln!(css, "}}");

    css
}

#[cfg(test)]
#[path = "stylesheet_tests.rs"]
mod stylesheet_tests;
