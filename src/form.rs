//! Form draft: the rating and text being composed, plus the edit target.

use crate::feedback::{FeedbackEntry, Rating};

pub const RATING_REQUIRED: &str = "Please select a rating.";
pub const FEEDBACK_REQUIRED: &str = "Feedback is required.";

/// Whether a submit will append or replace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: u64 },
}

impl FormMode {
    /// Label of the submit button
    pub fn submit_label(self) -> &'static str {
        match self {
            FormMode::Create => "Send",
            FormMode::Edit { .. } => "Update",
        }
    }
}

/// Validation messages keyed by field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub rating: Option<&'static str>,
    pub feedback: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.feedback.is_none()
    }
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub rating: Rating,
    pub feedback: String,
}

/// Transient form state, never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    rating: Option<Rating>,
    feedback: String,
    edit_target: Option<u64>,
}

impl FormDraft {
    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn mode(&self) -> FormMode {
        match self.edit_target {
            Some(id) => FormMode::Edit { id },
            None => FormMode::Create,
        }
    }

    pub fn set_rating(&mut self, rating: Rating) {
        self.rating = Some(rating);
    }

    pub fn set_feedback(&mut self, text: impl Into<String>) {
        self.feedback = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.feedback.push(c);
    }

    pub fn pop_char(&mut self) {
        self.feedback.pop();
    }

    pub fn clear_text(&mut self) {
        self.feedback.clear();
    }

    /// Fill the draft from an existing entry and target it for update
    pub fn load_for_edit(&mut self, entry: &FeedbackEntry) {
        self.rating = Some(entry.rating);
        self.feedback = entry.feedback.clone();
        self.edit_target = Some(entry.id);
    }

    /// Back to an empty Create-mode draft
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check both fields. With `trim` set, the accepted text is trimmed,
    /// otherwise it is kept exactly as typed.
    pub fn validate(&self, trim: bool) -> Result<ValidDraft, FieldErrors> {
        let trimmed = self.feedback.trim();
        let errors = FieldErrors {
            rating: self.rating.is_none().then_some(RATING_REQUIRED),
            feedback: trimmed.is_empty().then_some(FEEDBACK_REQUIRED),
        };

        match self.rating {
            Some(rating) if errors.is_empty() => Ok(ValidDraft {
                rating,
                feedback: if trim {
                    trimmed.to_string()
                } else {
                    self.feedback.clone()
                },
            }),
            _ => Err(errors),
        }
    }
}
