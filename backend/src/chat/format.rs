//! Line-oriented rendering of model output for the chat transcript.
//!
//! Lossy and not a Markdown parser: each non-blank line becomes one typed
//! block, and block text is always escaped on render.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Block {
    Paragraph(String),
    ListItem(String),
    Bold(String),
}

pub fn parse_response(response: &str) -> Vec<Block> {
    response
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Block {
    if let Some(rest) = line.strip_prefix("**") {
        let rest = rest.trim();
        let text = rest.strip_suffix("**").unwrap_or(rest);
        Block::Bold(text.trim().to_string())
    } else if let Some(rest) = line.strip_prefix('*') {
        Block::ListItem(rest.trim().to_string())
    } else {
        Block::Paragraph(line.trim().to_string())
    }
}

pub fn render_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        let (tag, text) = match block {
            Block::Paragraph(t) => ("p", t),
            Block::ListItem(t) => ("li", t),
            Block::Bold(t) => ("b", t),
        };
        let _ = write!(out, "<{tag}>{}</{tag}>", escape_html(text));
    }
    out
}

/// Terminal rendering: one line per block.
pub fn render_plain(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(t) | Block::Bold(t) => t.clone(),
            Block::ListItem(t) => format!("• {}", t),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
