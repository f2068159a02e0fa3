//! Per-section revision state machine for one open document.
//!
//! Each section carries three independent flags: `edited`, `accepted`, and
//! `regenerating`. Any edit or regeneration clears `accepted`. While a
//! regeneration is in flight the section rejects edits and further
//! regeneration; accept becomes a silent no-op.

use thiserror::Error;

use super::section::{assemble_sections, parse_content_into_sections, Section};

#[derive(Debug, Error, PartialEq)]
pub enum ReviseError {
    #[error("Section {0} is out of bounds")]
    SectionOutOfBounds(usize),

    #[error("Section {0} has a regeneration in flight")]
    RegenerationInFlight(usize),
}

/// Owns the section state for one open brief or email draft. Lives only for
/// the editing session; `save` hands the assembled text back and closing the
/// session discards everything.
#[derive(Debug)]
pub struct DocumentEditor {
    sections: Vec<Section>,
}

impl DocumentEditor {
    pub fn from_content(content: &str) -> Self {
        Self {
            sections: parse_content_into_sections(content),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    fn section_mut(&mut self, index: usize) -> Result<&mut Section, ReviseError> {
        self.sections
            .get_mut(index)
            .ok_or(ReviseError::SectionOutOfBounds(index))
    }

    /// Manual edit. `edited` tracks divergence from the original snapshot,
    /// so editing back to the original text clears it again.
    pub fn edit_section(&mut self, index: usize, text: &str) -> Result<(), ReviseError> {
        let section = self.section_mut(index)?;
        if section.regenerating {
            return Err(ReviseError::RegenerationInFlight(index));
        }
        section.set_body(text.to_string());
        section.edited = section.body != section.original_body;
        section.accepted = false;
        Ok(())
    }

    /// Returns whether the accept took effect. A no-op while regenerating or
    /// when already accepted.
    pub fn accept_section(&mut self, index: usize) -> Result<bool, ReviseError> {
        let section = self.section_mut(index)?;
        if section.regenerating || section.accepted {
            return Ok(false);
        }
        section.accepted = true;
        Ok(true)
    }

    /// Marks the section busy and drops any prior approval. The generated
    /// text lands later via `complete_regeneration`.
    pub fn begin_regeneration(&mut self, index: usize) -> Result<(), ReviseError> {
        let section = self.section_mut(index)?;
        if section.regenerating {
            return Err(ReviseError::RegenerationInFlight(index));
        }
        section.regenerating = true;
        section.accepted = false;
        Ok(())
    }

    /// Applies the generated text. Regeneration always resolves, so this
    /// clears the busy flag unconditionally; the fresh text counts as a new
    /// baseline for the user to react to, not an edit.
    pub fn complete_regeneration(&mut self, index: usize, text: &str) -> Result<(), ReviseError> {
        let section = self.section_mut(index)?;
        section.set_body(text.to_string());
        section.regenerating = false;
        section.edited = false;
        Ok(())
    }

    /// Restores the parse-time snapshot and drops both flags, regardless of
    /// prior state.
    pub fn revert_section(&mut self, index: usize) -> Result<(), ReviseError> {
        let section = self.section_mut(index)?;
        section.restore_original();
        section.edited = false;
        section.accepted = false;
        Ok(())
    }

    // Counts are derived on demand, never stored.

    pub fn accepted_count(&self) -> usize {
        self.sections.iter().filter(|s| s.accepted).count()
    }

    pub fn edited_count(&self) -> usize {
        self.sections.iter().filter(|s| s.edited).count()
    }

    pub fn assemble(&self) -> String {
        assemble_sections(&self.sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "## Overview\nintro text\n## Risks\nrisk text\n## Next Steps\nstep text";

    fn editor() -> DocumentEditor {
        DocumentEditor::from_content(DOC)
    }

    #[test]
    fn test_edit_sets_edited_and_clears_accepted() {
        let mut ed = editor();
        ed.accept_section(1).unwrap();
        ed.edit_section(1, "new risk text").unwrap();

        let section = &ed.sections()[1];
        assert!(section.edited);
        assert!(!section.accepted);
        assert_eq!(section.body, "new risk text");
        assert_eq!(section.original_body, "risk text");
    }

    #[test]
    fn test_edit_back_to_original_clears_edited() {
        let mut ed = editor();
        ed.edit_section(0, "changed").unwrap();
        assert!(ed.sections()[0].edited);
        ed.edit_section(0, "intro text").unwrap();
        assert!(!ed.sections()[0].edited);
    }

    #[test]
    fn test_edit_rejected_while_regenerating() {
        let mut ed = editor();
        ed.begin_regeneration(2).unwrap();
        assert_eq!(
            ed.edit_section(2, "nope"),
            Err(ReviseError::RegenerationInFlight(2))
        );
        assert_eq!(ed.sections()[2].body, "step text");
    }

    #[test]
    fn test_accept_is_noop_while_regenerating() {
        let mut ed = editor();
        ed.begin_regeneration(0).unwrap();
        assert_eq!(ed.accept_section(0), Ok(false));
        assert!(!ed.sections()[0].accepted);
    }

    #[test]
    fn test_accept_is_noop_when_already_accepted() {
        let mut ed = editor();
        assert_eq!(ed.accept_section(0), Ok(true));
        assert_eq!(ed.accept_section(0), Ok(false));
        assert!(ed.sections()[0].accepted);
    }

    #[test]
    fn test_begin_regeneration_clears_accepted_immediately() {
        let mut ed = editor();
        ed.accept_section(1).unwrap();
        ed.begin_regeneration(1).unwrap();

        let section = &ed.sections()[1];
        assert!(section.regenerating);
        assert!(!section.accepted);
    }

    #[test]
    fn test_double_regeneration_rejected() {
        let mut ed = editor();
        ed.begin_regeneration(1).unwrap();
        assert_eq!(
            ed.begin_regeneration(1),
            Err(ReviseError::RegenerationInFlight(1))
        );
    }

    #[test]
    fn test_complete_regeneration_resets_flags_and_replaces_body() {
        let mut ed = editor();
        ed.edit_section(1, "hand edit").unwrap();
        ed.begin_regeneration(1).unwrap();
        ed.complete_regeneration(1, "risk text\nplus a fresh angle").unwrap();

        let section = &ed.sections()[1];
        assert!(!section.regenerating);
        assert!(!section.edited);
        assert!(!section.accepted);
        assert_ne!(section.body, section.original_body);
    }

    #[test]
    fn test_revert_restores_everything() {
        let mut ed = editor();
        ed.edit_section(2, "totally different").unwrap();
        ed.accept_section(2).unwrap();
        ed.revert_section(2).unwrap();

        let section = &ed.sections()[2];
        assert_eq!(section.body, section.original_body);
        assert!(!section.edited);
        assert!(!section.accepted);
    }

    #[test]
    fn test_revert_allowed_while_regenerating() {
        let mut ed = editor();
        ed.edit_section(0, "changed").unwrap();
        ed.begin_regeneration(0).unwrap();
        ed.revert_section(0).unwrap();

        let section = &ed.sections()[0];
        assert_eq!(section.body, "intro text");
        // The in-flight regeneration still resolves later.
        assert!(section.regenerating);
    }

    #[test]
    fn test_counts_are_derived() {
        let mut ed = editor();
        assert_eq!(ed.accepted_count(), 0);
        assert_eq!(ed.edited_count(), 0);

        ed.edit_section(0, "x").unwrap();
        ed.accept_section(1).unwrap();
        ed.accept_section(2).unwrap();
        assert_eq!(ed.edited_count(), 1);
        assert_eq!(ed.accepted_count(), 2);

        ed.revert_section(0).unwrap();
        ed.edit_section(1, "y").unwrap();
        assert_eq!(ed.edited_count(), 1);
        assert_eq!(ed.accepted_count(), 1);
    }

    #[test]
    fn test_assemble_reflects_edits() {
        let mut ed = editor();
        ed.edit_section(1, "rewritten").unwrap();
        assert_eq!(
            ed.assemble(),
            "## Overview\nintro text\n## Risks\nrewritten\n## Next Steps\nstep text"
        );
    }

    #[test]
    fn test_unmodified_editor_assembles_identically() {
        assert_eq!(editor().assemble(), DOC);
    }

    #[test]
    fn test_out_of_bounds_section() {
        let mut ed = editor();
        assert_eq!(
            ed.edit_section(9, "x"),
            Err(ReviseError::SectionOutOfBounds(9))
        );
    }
}
