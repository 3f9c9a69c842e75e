//! Text selection validation
//!
//! A selection is what the user highlights in the OCR text before asking
//! for an annotation.

use thiserror::Error;

/// Longest selection the analysis endpoint accepts, in characters
pub const MAX_SELECTION_CHARS: usize = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please select some text")]
    Empty,

    #[error("Selected text is too long (max {max} characters, got {len})")]
    TooLong { len: usize, max: usize },
}

/// Trim `text` and check it is a usable selection
pub fn validate_selection(text: &str) -> Result<&str, SelectionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SelectionError::Empty);
    }

    let len = trimmed.chars().count();
    if len > MAX_SELECTION_CHARS {
        return Err(SelectionError::TooLong {
            len,
            max: MAX_SELECTION_CHARS,
        });
    }

    Ok(trimmed)
}

/// The current selection; only valid text is ever held
#[derive(Debug, Clone, Default)]
pub struct TextSelection {
    selected: Option<String>,
}

impl TextSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection. An invalid selection leaves the previous one in place.
    pub fn select(&mut self, text: &str) -> Result<&str, SelectionError> {
        let trimmed = validate_selection(text)?;
        Ok(self.selected.insert(trimmed.to_string()).as_str())
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}
