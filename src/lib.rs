pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod logger;
pub mod models;
pub mod render;
pub mod theme;

pub use config::{Config, FormDefaults, ServiceConfig};
pub use controller::RequestLifecycleController;
pub use error::{Result, SignError};
pub use models::{
    ArtifactReference, GenerationOutcome, GenerationReply, GenerationRequest, UiState, ViewState,
};
pub use render::{HttpRenderService, RenderService};
pub use theme::{Theme, ThemeStore};
