use thiserror::Error;

use crate::aggregate::{self, Average};
use crate::config::Config;
use crate::feedback::{FeedbackEntry, IdGenerator, Rating};
use crate::form::{FieldErrors, FormDraft, FormMode};
use crate::input::Action;
use crate::store::Store;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("no feedback entry with id {0}")]
    UnknownEntry(u64),
    #[error("form has errors: {0:?}")]
    Invalid(FieldErrors),
    #[error("no ids left to assign")]
    IdsExhausted,
}

/// Which widget receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Rating,
    Feedback,
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Rating => Focus::Feedback,
            Focus::Feedback => Focus::List,
            Focus::List => Focus::Rating,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Rating => Focus::List,
            Focus::Feedback => Focus::Rating,
            Focus::List => Focus::Feedback,
        }
    }
}

/// What a successful submit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(u64),
    Updated(u64),
}

/// Application state
pub struct App {
    /// Backing storage, written after every list mutation
    store: Box<dyn Store>,
    /// Feedback list in insertion order
    entries: Vec<FeedbackEntry>,
    /// Form being composed
    draft: FormDraft,
    /// Errors from the last failed submit
    errors: FieldErrors,
    ids: IdGenerator,
    /// Cursor in the feedback list
    selected: usize,
    focus: Focus,
    /// One-line message for the status bar
    status: Option<String>,
    should_quit: bool,
    config: Config,
}

impl App {
    pub fn new(store: Box<dyn Store>, config: Config) -> Self {
        let entries = store.load();
        let ids = IdGenerator::seeded_from(&entries);

        Self {
            store,
            entries,
            draft: FormDraft::default(),
            errors: FieldErrors::default(),
            ids,
            selected: 0,
            focus: Focus::Rating,
            status: None,
            should_quit: false,
            config,
        }
    }

    pub fn entries(&self) -> &[FeedbackEntry] {
        &self.entries
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.draft.mode()
    }

    pub fn submit_label(&self) -> &'static str {
        self.mode().submit_label()
    }

    pub fn field_errors(&self) -> FieldErrors {
        self.errors
    }

    pub fn average(&self) -> Average {
        aggregate::average(&self.entries)
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Id of the entry under the list cursor
    pub fn selected_id(&self) -> Option<u64> {
        self.entries.get(self.selected).map(|e| e.id)
    }

    // ----- form -----

    pub fn select_rating(&mut self, rating: Rating) {
        self.draft.set_rating(rating);
        self.errors.rating = None;
    }

    /// Step the selected rating; an unset rating starts at 1
    pub fn step_rating(&mut self, up: bool) {
        let next = match self.draft.rating() {
            Some(r) if up => r.increment(),
            Some(r) => r.decrement(),
            None => Rating::LOWEST,
        };
        self.select_rating(next);
    }

    pub fn set_feedback_text(&mut self, text: impl Into<String>) {
        self.draft.set_feedback(text);
        self.errors.feedback = None;
    }

    pub fn push_char(&mut self, c: char) {
        self.draft.push_char(c);
        self.errors.feedback = None;
    }

    pub fn pop_char(&mut self) {
        self.draft.pop_char();
    }

    pub fn clear_text(&mut self) {
        self.draft.clear_text();
    }

    /// Append pasted text to the review when the review box has focus.
    /// Line breaks become spaces.
    pub fn paste(&mut self, text: &str) {
        if self.focus != Focus::Feedback {
            return;
        }
        let mut feedback = self.draft.feedback().to_string();
        feedback.extend(
            text.chars()
                .filter(|&c| c != '\r')
                .map(|c| if c == '\n' { ' ' } else { c }),
        );
        self.set_feedback_text(feedback);
    }

    /// Load entry `id` into the form and switch to Edit mode
    pub fn begin_edit(&mut self, id: u64) -> Result<(), AppError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(AppError::UnknownEntry(id))?;

        self.draft.load_for_edit(entry);
        self.errors = FieldErrors::default();
        tracing::debug!("Editing feedback {}", id);
        Ok(())
    }

    /// Drop the draft and return to Create mode
    pub fn cancel_edit(&mut self) {
        if let FormMode::Edit { id } = self.mode() {
            tracing::debug!("Cancelled edit of feedback {}", id);
        }
        self.draft.reset();
        self.errors = FieldErrors::default();
    }

    /// Validate the draft and append or update an entry.
    ///
    /// On failure the list, draft and mode are left alone; invalid fields are
    /// kept for display.
    pub fn submit(&mut self) -> Result<SubmitOutcome, AppError> {
        let valid = match self.draft.validate(self.config.behavior.trim_feedback) {
            Ok(valid) => valid,
            Err(errors) => {
                self.errors = errors;
                return Err(AppError::Invalid(errors));
            }
        };

        let outcome = match self.mode() {
            FormMode::Create => {
                let Some(id) = self.ids.next_id() else {
                    tracing::error!("Id space exhausted, feedback not added");
                    self.status = Some("Could not add feedback: no ids left".to_string());
                    return Err(AppError::IdsExhausted);
                };
                self.entries.push(FeedbackEntry {
                    id,
                    rating: valid.rating,
                    feedback: valid.feedback,
                });
                tracing::info!("Added feedback {} (rating {})", id, valid.rating);
                SubmitOutcome::Created(id)
            }
            FormMode::Edit { id } => {
                if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
                    entry.rating = valid.rating;
                    entry.feedback = valid.feedback;
                    tracing::info!("Updated feedback {} (rating {})", id, valid.rating);
                } else {
                    tracing::error!("Edit target {} vanished before submit", id);
                }
                SubmitOutcome::Updated(id)
            }
        };

        self.persist();
        self.draft.reset();
        self.errors = FieldErrors::default();
        Ok(outcome)
    }

    // ----- list -----

    /// Remove entry `id`; returns false if no such entry exists
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return false;
        }

        if self.mode() == (FormMode::Edit { id }) {
            self.cancel_edit();
        }
        if self.selected >= self.entries.len() {
            self.selected = self.entries.len().saturating_sub(1);
        }

        tracing::info!("Deleted feedback {}", id);
        self.persist();
        true
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    #[cfg(test)]
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    fn persist(&mut self) {
        match self.store.save(&self.entries) {
            Ok(()) => self.status = None,
            Err(e) => {
                tracing::warn!("Failed to persist feedback: {}", e);
                self.status = Some(format!("Could not save: {e}"));
            }
        }
    }

    /// Apply one input action
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Escape => {
                if matches!(self.mode(), FormMode::Edit { .. }) {
                    self.cancel_edit();
                } else {
                    self.should_quit = true;
                }
            }
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrevious => self.focus = self.focus.previous(),
            Action::SelectRating(rating) => self.select_rating(rating),
            Action::RatingUp => self.step_rating(true),
            Action::RatingDown => self.step_rating(false),
            Action::InsertChar(c) => self.push_char(c),
            Action::DeleteChar => self.pop_char(),
            Action::ClearText => self.clear_text(),
            Action::Submit => {
                if let Err(e) = self.submit() {
                    tracing::debug!("Submit rejected: {}", e);
                }
            }
            Action::SelectPrevious => self.select_previous(),
            Action::SelectNext => self.select_next(),
            Action::EditSelected => {
                if let Some(id) = self.selected_id() {
                    match self.begin_edit(id) {
                        Ok(()) => self.focus = Focus::Feedback,
                        Err(e) => tracing::error!("{}", e),
                    }
                }
            }
            Action::DeleteSelected => {
                if let Some(id) = self.selected_id() {
                    self.delete(id);
                }
            }
        }
    }
}
