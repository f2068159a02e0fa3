//! Line-oriented preview renderer for briefs and drafted emails.
//!
//! Converts the constrained markup the generators emit into structured
//! display blocks. Classification is per line and deterministic; blank lines
//! produce no block.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        text: String,
        /// Data source tag from a `[via X]` suffix on `## ` headings.
        #[serde(skip_serializing_if = "Option::is_none")]
        provenance: Option<String>,
    },
    Bullet {
        spans: Vec<Span>,
    },
    Numbered {
        number: u32,
        spans: Vec<Span>,
    },
    Warning {
        text: String,
    },
    Paragraph {
        spans: Vec<Span>,
    },
}

pub fn render_preview(content: &str) -> Vec<Block> {
    content.split('\n').filter_map(render_line).collect()
}

/// Classifies one line. The same line always yields the same block.
fn render_line(line: &str) -> Option<Block> {
    let line = line.trim_end();
    if line.is_empty() {
        return None;
    }
    if let Some(rest) = line.strip_prefix("## ") {
        let (text, provenance) = split_provenance(rest);
        return Some(Block::Heading {
            level: 2,
            text,
            provenance,
        });
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return Some(Block::Heading {
            level: 1,
            text: rest.to_string(),
            provenance: None,
        });
    }
    if let Some(rest) = line.strip_prefix('⚠') {
        return Some(Block::Warning {
            text: rest.trim_start().to_string(),
        });
    }
    if let Some(rest) = line.strip_prefix("- ") {
        return Some(Block::Bullet {
            spans: parse_spans(rest),
        });
    }
    if let Some((number, rest)) = split_numbered(line) {
        return Some(Block::Numbered {
            number,
            spans: parse_spans(rest),
        });
    }
    Some(Block::Paragraph {
        spans: parse_spans(line),
    })
}

/// `"Risks [via Gainsight]"` becomes `("Risks", Some("Gainsight"))`.
fn split_provenance(text: &str) -> (String, Option<String>) {
    if text.ends_with(']') {
        if let Some(idx) = text.rfind("[via ") {
            let source = text[idx + 5..text.len() - 1].to_string();
            return (text[..idx].trim_end().to_string(), Some(source));
        }
    }
    (text.to_string(), None)
}

/// `"3. do the thing"` becomes `(3, "do the thing")`.
fn split_numbered(line: &str) -> Option<(u32, &str)> {
    let dot = line.find(". ")?;
    let digits = &line[..dot];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|n| (n, &line[dot + 2..]))
}

/// Splits `**bold**` runs out of a text line.
fn parse_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("**") {
        match rest[start + 2..].find("**") {
            Some(len) => {
                if start > 0 {
                    spans.push(Span::Text(rest[..start].to_string()));
                }
                spans.push(Span::Bold(rest[start + 2..start + 2 + len].to_string()));
                rest = &rest[start + 2 + len + 2..];
            }
            // Unterminated marker: leave the remainder as plain text.
            None => break,
        }
    }
    if !rest.is_empty() {
        spans.push(Span::Text(rest.to_string()));
    }
    spans
}
