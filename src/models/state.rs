use crate::config::MAX_MESSAGE_LENGTH;
use crate::models::billboard::ArtifactReference;
use serde::{Deserialize, Serialize};

/// Lifecycle state of the generation controller. `Error` behaves like
/// `Idle` except an error message is attached for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiState {
    Idle,
    Generating,
    Success,
    Error,
}

/// Read-only snapshot of everything a presentation layer needs to render:
/// lifecycle state, current field values, the owned artifact, and the last
/// error. Derived flags below encode the visibility rules so callers never
/// re-derive them inconsistently.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub state: UiState,
    pub message: String,
    pub font_size: u32,
    pub text_color: String,
    pub artifact: Option<ArtifactReference>,
    pub error: Option<String>,
}

impl ViewState {
    /// The trigger is disabled exactly while a request is in flight.
    pub fn trigger_enabled(&self) -> bool {
        self.state != UiState::Generating
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.state == UiState::Generating {
            "Generating..."
        } else {
            "Generate Billboard"
        }
    }

    /// A failure leaves a prior artifact on screen, so visibility follows
    /// artifact presence rather than lifecycle state.
    pub fn preview_visible(&self) -> bool {
        self.artifact.is_some()
    }

    pub fn download_visible(&self) -> bool {
        self.artifact.is_some()
    }

    pub fn loading_visible(&self) -> bool {
        self.artifact.is_none()
    }

    /// Formatted error banner text, present only after a failure.
    pub fn error_banner(&self) -> Option<String> {
        self.error.as_ref().map(|msg| format!("Error: {}", msg))
    }

    /// Character counter for the current message, independent of lifecycle
    /// state.
    pub fn char_count(&self) -> String {
        format!("{}/{}", self.message.chars().count(), MAX_MESSAGE_LENGTH)
    }
}
