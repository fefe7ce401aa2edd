//! Editor session: the live, editable projection of the active deck.
//!
//! The session owns all mutable editor state. `load` fully replaces it,
//! `collect` reads it back in display order, and the state machine rejects
//! actions that conflict with an in-flight operation instead of letting
//! them interleave.

use deckedit_common::{Deck, SlideRecord};

use crate::error::{LoadError, SaveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    Saving,
}

/// Outcome of the preview-image probe for one slide. Images are display
/// support only; `Missing` renders as a placeholder and never blocks
/// editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Available,
    Missing,
}

/// The four editable text fields of a slide widget, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Concept,
    Explanation,
    SlideContent,
    Timestamp,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Concept,
        Field::Explanation,
        Field::SlideContent,
        Field::Timestamp,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Concept => "concept",
            Field::Explanation => "explanation",
            Field::SlideContent => "slide_content",
            Field::Timestamp => "timestamp",
        }
    }
}

/// One editable widget per slide: four text fields pre-filled from the
/// record plus a read-only preview image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideWidget {
    pub concept: String,
    pub explanation: String,
    pub slide_content: String,
    pub timestamp: String,
    pub image_ref: String,
    pub image: ImageState,
}

impl SlideWidget {
    pub fn new(record: SlideRecord, image_ref: String, image: ImageState) -> Self {
        Self {
            concept: record.concept,
            explanation: record.explanation,
            slide_content: record.slide_content,
            timestamp: record.timestamp,
            image_ref,
            image,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Concept => &self.concept,
            Field::Explanation => &self.explanation,
            Field::SlideContent => &self.slide_content,
            Field::Timestamp => &self.timestamp,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Concept => &mut self.concept,
            Field::Explanation => &mut self.explanation,
            Field::SlideContent => &mut self.slide_content,
            Field::Timestamp => &mut self.timestamp,
        }
    }

    /// The widget's current field values, verbatim.
    pub fn record(&self) -> SlideRecord {
        SlideRecord {
            concept: self.concept.clone(),
            explanation: self.explanation.clone(),
            slide_content: self.slide_content.clone(),
            timestamp: self.timestamp.clone(),
        }
    }
}

/// User-visible outcome of the last load or save action. Load failures
/// replace the editor body inline; save outcomes are acknowledged with a
/// modal-style alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LoadFailed(String),
    Saved(String),
    SaveFailed(String),
    /// An action rejected because a conflicting operation is in flight.
    /// The active deck is untouched.
    Rejected(String),
}

pub struct EditorSession {
    state: SessionState,
    file_name: Option<String>,
    widgets: Vec<SlideWidget>,
    notice: Option<Notice>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            file_name: None,
            widgets: Vec::new(),
            notice: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn widgets(&self) -> &[SlideWidget] {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut [SlideWidget] {
        &mut self.widgets
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// A save action is offered only for a successfully loaded deck that
    /// is not mid-operation.
    pub fn can_save(&self) -> bool {
        self.state == SessionState::Ready && self.file_name.is_some()
    }

    /// Read every widget back into a fresh record array, in display order.
    /// Field values are taken verbatim; no trimming or coercion.
    pub fn collect(&self) -> Deck {
        self.widgets.iter().map(SlideWidget::record).collect()
    }

    fn reject_busy(&mut self) {
        self.notice = Some(Notice::Rejected(
            "another operation is in flight".to_string(),
        ));
    }

    /// Enter `Loading`. Rejected while a save is in flight; a load during
    /// a load simply replaces the pending one's result, so it is rejected
    /// too for determinism. The rejection is surfaced as a notice so the
    /// user sees why nothing happened.
    pub fn begin_load(&mut self) -> Result<(), LoadError> {
        match self.state {
            SessionState::Loading | SessionState::Saving => {
                self.reject_busy();
                Err(LoadError::Busy)
            }
            SessionState::Idle | SessionState::Ready => {
                self.state = SessionState::Loading;
                self.notice = None;
                Ok(())
            }
        }
    }

    /// Install a freshly loaded deck, fully replacing the previous editor
    /// state for the target.
    pub fn finish_load(&mut self, file_name: &str, widgets: Vec<SlideWidget>) {
        self.file_name = Some(file_name.to_string());
        self.widgets = widgets;
        self.notice = None;
        self.state = SessionState::Ready;
    }

    /// Record a failed load: no widgets remain, save becomes unavailable
    /// and the error is surfaced inline in place of the editor.
    pub fn fail_load(&mut self, err: &LoadError) {
        self.file_name = None;
        self.widgets.clear();
        self.notice = Some(Notice::LoadFailed(err.to_string()));
        self.state = SessionState::Idle;
    }

    /// Enter `Saving`, yielding the target file and the collected deck.
    pub fn begin_save(&mut self) -> Result<(String, Deck), SaveError> {
        match self.state {
            SessionState::Loading | SessionState::Saving => {
                self.reject_busy();
                Err(SaveError::Busy)
            }
            SessionState::Idle => Err(SaveError::NothingLoaded),
            SessionState::Ready => {
                let file_name = self
                    .file_name
                    .clone()
                    .ok_or(SaveError::NothingLoaded)?;
                self.state = SessionState::Saving;
                Ok((file_name, self.collect()))
            }
        }
    }

    /// Leave `Saving`. The in-memory deck is left intact either way so a
    /// failed save can be retried as-is.
    pub fn finish_save(&mut self, file_name: &str, result: &Result<(), SaveError>) {
        self.notice = Some(match result {
            Ok(()) => Notice::Saved(format!("saved {file_name}")),
            Err(err) => Notice::SaveFailed(err.to_string()),
        });
        self.state = SessionState::Ready;
    }
}
