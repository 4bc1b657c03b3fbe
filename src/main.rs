use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};

use gongwen::document::{Block, block_plain_text, block_ref};
use gongwen::numbering::{NumberedItem, compute_ordinals};
use gongwen::stylesheet::{PrintOptions, print_stylesheet};
use gongwen::{Document, html};

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let Some(path_arg) = args.next() else {
        eprintln!("Usage: gongwen <document.json> [outline|stylesheet|html]");
        return Ok(());
    };
    let path = PathBuf::from(path_arg);
    let command = args.next().unwrap_or_else(|| "outline".to_string());

    let document = load_document(&path)?;
    match command.as_str() {
        "outline" => print_outline(&document),
        "stylesheet" => print!("{}", print_stylesheet(&PrintOptions::default())),
        "html" => println!("{}", html::to_html(&document)),
        other => eprintln!("unknown command: {other}"),
    }
    Ok(())
}

fn load_document(path: &PathBuf) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Document::from_json(&content)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn print_outline(document: &Document) {
    for item in compute_ordinals(document) {
        let indent = "  ".repeat((item.depth as usize).saturating_sub(1));
        let text = item_text(document, &item).unwrap_or_default();
        println!("{indent}{} {}", item.label, text);
    }
}

fn item_text(document: &Document, item: &NumberedItem) -> Option<String> {
    let Block::OrderedList { content, .. } = block_ref(document, &item.list_path)? else {
        return None;
    };
    let first = content.get(item.item_index)?.content.first()?;
    Some(block_plain_text(first))
}
