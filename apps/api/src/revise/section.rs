//! Heading-delimited sections of a drafted document.
//!
//! `parse_content_into_sections` and `assemble_sections` are exact inverses:
//! assembling an unmodified parse reproduces the input byte for byte,
//! trailing newlines and blank lines included.

/// Marks a section heading line in drafted briefs and emails.
pub const HEADING_MARKER: &str = "## ";

/// One independently editable block of a document.
#[derive(Debug, Clone)]
pub struct Section {
    /// Full heading line including the marker; empty for a leading preamble.
    pub heading: String,
    pub body: String,
    /// Snapshot taken at parse time; never mutated.
    pub original_body: String,
    pub edited: bool,
    pub accepted: bool,
    pub regenerating: bool,
    /// Whether any body lines follow the heading. This is the one bit the
    /// heading/body string pair cannot encode: a heading at end-of-document
    /// versus a heading followed by a lone newline.
    has_body: bool,
    original_has_body: bool,
}

impl Section {
    fn new(heading: String, body: String, has_body: bool) -> Self {
        Self {
            heading,
            original_body: body.clone(),
            body,
            edited: false,
            accepted: false,
            regenerating: false,
            has_body,
            original_has_body: has_body,
        }
    }

    pub(crate) fn set_body(&mut self, text: String) {
        self.body = text;
        self.has_body = true;
    }

    pub(crate) fn restore_original(&mut self) {
        self.body = self.original_body.clone();
        self.has_body = self.original_has_body;
    }
}

/// Splits a flat document on heading lines. Lines before the first heading
/// become a preamble section with an empty heading; a document with no
/// heading lines is a single such section.
pub fn parse_content_into_sections(content: &str) -> Vec<Section> {
    let mut groups: Vec<(String, Vec<&str>)> = Vec::new();

    for line in content.split('\n') {
        if line.starts_with(HEADING_MARKER) {
            groups.push((line.to_string(), Vec::new()));
        } else {
            match groups.last_mut() {
                Some((_, lines)) => lines.push(line),
                None => groups.push((String::new(), vec![line])),
            }
        }
    }

    groups
        .into_iter()
        .map(|(heading, lines)| {
            let has_body = !lines.is_empty();
            Section::new(heading, lines.join("\n"), has_body)
        })
        .collect()
}

/// Reconstructs the full document text from section state. The single source
/// of truth for what gets saved or previewed.
pub fn assemble_sections(sections: &[Section]) -> String {
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if section.heading.is_empty() {
            out.push_str(&section.body);
        } else {
            out.push_str(&section.heading);
            if section.has_body {
                out.push('\n');
                out.push_str(&section.body);
            }
        }
    }
    out
}
