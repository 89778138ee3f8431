use crate::{
    error::Result,
    models::billboard::{GenerationReply, GenerationRequest},
};
use async_trait::async_trait;

/// Boundary to the remote rendering service. `render` returns `Err` only
/// for transport or parse faults; a well-formed reply with
/// `success: false` comes back as `Ok` carrying the remote rejection.
#[async_trait]
pub trait RenderService: Send + Sync {
    async fn render(&self, request: &GenerationRequest) -> Result<GenerationReply>;

    /// Fetch the bytes behind an artifact location, for download.
    async fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>>;
}
