use serde::{Deserialize, Serialize};

/// Message shown when the service reports a failure without a usable error,
/// or when the call itself faults.
pub const GENERIC_FAILURE: &str = "Failed to generate billboard";

/// One generation request, built fresh from the current field values on
/// every `generate()` call. No identity beyond its fields; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub message: String,
    #[serde(rename = "fontSize")]
    pub font_size: u32,
    #[serde(rename = "textColor")]
    pub text_color: String,
}

/// Wire shape of the service reply. Exactly one of `url`/`error` is
/// meaningful per outcome; both are optional so a sloppy reply still parses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReply {
    pub success: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Discriminated outcome after shape-checking a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Generated { url: String },
    Rejected { message: String },
}

impl GenerationReply {
    /// A `success: true` reply missing its `url` counts as a rejection with
    /// the generic message, same as any other malformed shape.
    pub fn into_outcome(self) -> GenerationOutcome {
        match self {
            GenerationReply {
                success: true,
                url: Some(url),
                ..
            } => GenerationOutcome::Generated { url },
            GenerationReply {
                success: false,
                error,
                ..
            } => GenerationOutcome::Rejected {
                message: error.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            },
            _ => GenerationOutcome::Rejected {
                message: GENERIC_FAILURE.to_string(),
            },
        }
    }
}

/// Location of the most recently generated billboard. Exclusively owned by
/// the controller; preview and download only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReference(String);

impl ArtifactReference {
    pub fn new(url: impl Into<String>) -> Self {
        ArtifactReference(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}
