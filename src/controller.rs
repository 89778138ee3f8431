use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    config::{FormDefaults, DOWNLOAD_FILE_NAME},
    error::{Result, SignError},
    logger,
    models::billboard::{ArtifactReference, GenerationOutcome, GenerationRequest, GENERIC_FAILURE},
    models::state::{UiState, ViewState},
    render::traits::RenderService,
};
use uuid::Uuid;

/// Governs the generation request lifecycle: when a request may be issued,
/// how in-flight state is surfaced, who owns the artifact reference, and
/// how failures are reported without corrupting view state.
///
/// All mutable state lives behind one mutex; the lock is never held across
/// an `.await`. Each issued request is tagged with an epoch, and `reset()`
/// bumps the epoch, so a result arriving for a superseded request is
/// discarded instead of clobbering state installed after the reset.
pub struct RequestLifecycleController {
    service: Arc<dyn RenderService>,
    defaults: FormDefaults,
    inner: Mutex<Inner>,
}

struct Inner {
    state: UiState,
    message: String,
    font_size: u32,
    text_color: String,
    artifact: Option<ArtifactReference>,
    error: Option<String>,
    epoch: u64,
    in_flight: bool,
}

impl RequestLifecycleController {
    pub fn new(service: Arc<dyn RenderService>, defaults: FormDefaults) -> Self {
        let inner = Inner {
            state: UiState::Idle,
            message: defaults.message.clone(),
            font_size: defaults.font_size,
            text_color: defaults.text_color.clone(),
            artifact: None,
            error: None,
            epoch: 0,
            in_flight: false,
        };

        Self {
            service,
            defaults,
            inner: Mutex::new(inner),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn snapshot(inner: &Inner) -> ViewState {
        ViewState {
            state: inner.state,
            message: inner.message.clone(),
            font_size: inner.font_size,
            text_color: inner.text_color.clone(),
            artifact: inner.artifact.clone(),
            error: inner.error.clone(),
        }
    }

    /// Current view snapshot.
    pub fn view(&self) -> ViewState {
        Self::snapshot(&self.lock())
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.lock().message = message.into();
    }

    pub fn set_font_size(&self, font_size: u32) {
        self.lock().font_size = font_size;
    }

    pub fn set_text_color(&self, text_color: impl Into<String>) {
        self.lock().text_color = text_color.into();
    }

    /// Issue one generation request with the current field values. No
    /// client-side validation; the service is authoritative.
    ///
    /// Refuses with [`SignError::RequestInFlight`] while a request is
    /// outstanding. All other outcomes, including remote rejection and
    /// transport faults, come back as `Ok` with the failure folded into
    /// the returned view; the trigger is re-enabled in every case.
    pub async fn generate(&self) -> Result<ViewState> {
        let request_id = Uuid::new_v4();

        let (request, epoch) = {
            let mut inner = self.lock();
            if inner.in_flight {
                return Err(SignError::RequestInFlight);
            }
            inner.in_flight = true;
            inner.state = UiState::Generating;
            inner.error = None;
            inner.epoch += 1;

            let request = GenerationRequest {
                message: inner.message.clone(),
                font_size: inner.font_size,
                text_color: inner.text_color.clone(),
            };
            (request, inner.epoch)
        };

        log::info!(
            "🖼️  Generating billboard [req:{}] ({} chars, {}px, {})",
            request_id,
            request.message.chars().count(),
            request.font_size,
            request.text_color
        );
        let timer = logger::timer("billboard generation");

        let result = self.service.render(&request).await;
        timer.stop();

        let mut inner = self.lock();
        if inner.epoch != epoch {
            // Superseded by reset() or a later request; its state is not
            // ours to touch.
            log::warn!("Discarding stale generation result [req:{}]", request_id);
            return Ok(Self::snapshot(&inner));
        }
        inner.in_flight = false;

        match result.map(|reply| reply.into_outcome()) {
            Ok(GenerationOutcome::Generated { url }) => {
                log::info!("✅ Billboard generated [req:{}]: {}", request_id, url);
                inner.artifact = Some(ArtifactReference::new(url));
                inner.state = UiState::Success;
            }
            Ok(GenerationOutcome::Rejected { message }) => {
                log::error!("❌ Generation rejected [req:{}]: {}", request_id, message);
                inner.state = UiState::Error;
                inner.error = Some(message);
            }
            Err(e) => {
                log::error!("❌ Generation faulted [req:{}]: {}", request_id, e);
                inner.state = UiState::Error;
                inner.error = Some(GENERIC_FAILURE.to_string());
            }
        }

        Ok(Self::snapshot(&inner))
    }

    /// Restore the fixed defaults, discard the artifact, and clear any
    /// error. Supersedes an outstanding request (its late result will be
    /// discarded) and does not itself generate.
    pub fn reset(&self) -> ViewState {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.in_flight = false;
        inner.state = UiState::Idle;
        inner.message = self.defaults.message.clone();
        inner.font_size = self.defaults.font_size;
        inner.text_color = self.defaults.text_color.clone();
        inner.artifact = None;
        inner.error = None;

        log::info!("🔄 Form reset to defaults");
        Self::snapshot(&inner)
    }

    /// Save the current artifact under the fixed file name inside `dir`.
    /// Silent no-op when no artifact is held.
    pub async fn download(&self, dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        let artifact = self.lock().artifact.clone();
        let Some(artifact) = artifact else {
            log::debug!("Download requested with no artifact; ignoring");
            return Ok(None);
        };

        let bytes = self.service.fetch_artifact(artifact.url()).await?;
        let path = dir.as_ref().join(DOWNLOAD_FILE_NAME);
        tokio::fs::write(&path, &bytes).await?;

        log::info!("💾 Billboard saved to {}", path.display());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::billboard::GenerationReply;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use tokio_test::assert_ok;
    use tokio::sync::Notify;

    const PNG_STUB: &[u8] = &[0x89, b'P', b'N', b'G'];

    /// Scripted service: pops one reply per render call, records requests
    /// and fetches.
    #[derive(Default)]
    struct ScriptedService {
        replies: Mutex<VecDeque<Result<GenerationReply>>>,
        requests: Mutex<Vec<GenerationRequest>>,
        fetched: Mutex<Vec<String>>,
    }

    impl ScriptedService {
        fn push_success(&self, url: &str) {
            self.replies.lock().unwrap().push_back(Ok(GenerationReply {
                success: true,
                url: Some(url.to_string()),
                error: None,
            }));
        }

        fn push_rejection(&self, message: &str) {
            self.replies.lock().unwrap().push_back(Ok(GenerationReply {
                success: false,
                url: None,
                error: Some(message.to_string()),
            }));
        }

        fn push_fault(&self) {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(SignError::RequestError("connection refused".into())));
        }

        fn fetch_count(&self) -> usize {
            self.fetched.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RenderService for ScriptedService {
        async fn render(&self, request: &GenerationRequest) -> Result<GenerationReply> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted reply left")
        }

        async fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>> {
            self.fetched.lock().unwrap().push(url.to_string());
            Ok(PNG_STUB.to_vec())
        }
    }

    /// Service that blocks in render() until the test opens the gate,
    /// for observing the in-flight window.
    struct GatedService {
        gate: Arc<Notify>,
        url: String,
    }

    #[async_trait]
    impl RenderService for GatedService {
        async fn render(&self, _request: &GenerationRequest) -> Result<GenerationReply> {
            self.gate.notified().await;
            Ok(GenerationReply {
                success: true,
                url: Some(self.url.clone()),
                error: None,
            })
        }

        async fn fetch_artifact(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(PNG_STUB.to_vec())
        }
    }

    fn controller(service: Arc<dyn RenderService>) -> RequestLifecycleController {
        RequestLifecycleController::new(service, FormDefaults::default())
    }

    async fn wait_for_generating(c: &RequestLifecycleController) {
        while c.view().state != UiState::Generating {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn successful_generation_installs_the_artifact() {
        let service = Arc::new(ScriptedService::default());
        service.push_success("https://x/img1.png");
        let c = controller(service.clone());

        c.set_message("HELLO");
        c.set_font_size(80);
        c.set_text_color("#000000");

        let view = c.generate().await.unwrap();
        assert_eq!(view.state, UiState::Success);
        assert_eq!(
            view.artifact,
            Some(ArtifactReference::new("https://x/img1.png"))
        );
        assert!(view.preview_visible());
        assert!(view.download_visible());
        assert!(!view.loading_visible());
        assert!(view.error_banner().is_none());
        assert!(view.trigger_enabled());

        let sent = service.requests.lock().unwrap();
        assert_eq!(sent[0].message, "HELLO");
        assert_eq!(sent[0].font_size, 80);
        assert_eq!(sent[0].text_color, "#000000");
    }

    #[tokio::test]
    async fn rejection_surfaces_the_remote_message_and_keeps_prior_artifact() {
        let service = Arc::new(ScriptedService::default());
        service.push_success("https://x/img1.png");
        service.push_rejection("message too long");
        let c = controller(service);

        c.generate().await.unwrap();
        let view = c.generate().await.unwrap();

        assert_eq!(view.state, UiState::Error);
        assert_eq!(view.error_banner().as_deref(), Some("Error: message too long"));
        // The prior artifact stays on screen.
        assert_eq!(
            view.artifact,
            Some(ArtifactReference::new("https://x/img1.png"))
        );
        assert!(view.preview_visible());
        assert!(view.trigger_enabled());
    }

    #[tokio::test]
    async fn transport_fault_maps_to_the_generic_message() {
        let service = Arc::new(ScriptedService::default());
        service.push_fault();
        let c = controller(service);

        let view = c.generate().await.unwrap();
        assert_eq!(view.state, UiState::Error);
        assert_eq!(
            view.error_banner().as_deref(),
            Some("Error: Failed to generate billboard")
        );
        assert!(view.artifact.is_none());
        assert!(view.trigger_enabled());
    }

    #[tokio::test]
    async fn a_failed_generation_can_be_retried() {
        let service = Arc::new(ScriptedService::default());
        service.push_fault();
        service.push_success("https://x/img2.png");
        let c = controller(service);

        assert_eq!(c.generate().await.unwrap().state, UiState::Error);
        let view = c.generate().await.unwrap();
        assert_eq!(view.state, UiState::Success);
        assert!(view.error_banner().is_none());
    }

    #[tokio::test]
    async fn generate_clears_the_previous_error_on_entry() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(GatedService {
            gate: gate.clone(),
            url: "https://x/img1.png".to_string(),
        });
        let c = controller(service);
        {
            let mut inner = c.lock();
            inner.state = UiState::Error;
            inner.error = Some("message too long".to_string());
        }

        let (result, _) = futures::join!(c.generate(), async {
            wait_for_generating(&c).await;

            let view = c.view();
            assert!(view.error_banner().is_none());
            assert!(!view.trigger_enabled());
            assert_eq!(view.trigger_label(), "Generating...");

            gate.notify_one();
        });
        tokio_test::assert_ok!(result);
    }

    #[tokio::test]
    async fn second_generate_while_in_flight_is_refused() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(GatedService {
            gate: gate.clone(),
            url: "https://x/img1.png".to_string(),
        });
        let c = controller(service);

        let (result, _) = futures::join!(c.generate(), async {
            wait_for_generating(&c).await;

            assert!(matches!(
                c.generate().await,
                Err(SignError::RequestInFlight)
            ));

            gate.notify_one();
        });
        let view = tokio_test::assert_ok!(result);
        assert_eq!(view.state, UiState::Success);
    }

    #[tokio::test]
    async fn reset_during_flight_discards_the_late_result() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(GatedService {
            gate: gate.clone(),
            url: "https://x/img1.png".to_string(),
        });
        let c = controller(service);

        let (result, _) = futures::join!(c.generate(), async {
            wait_for_generating(&c).await;

            let view = c.reset();
            assert_eq!(view.state, UiState::Idle);
            assert!(view.loading_visible());
            assert!(!view.preview_visible());

            gate.notify_one();
        });
        tokio_test::assert_ok!(result);

        // The superseded result must not resurrect an artifact.
        let view = c.view();
        assert_eq!(view.state, UiState::Idle);
        assert!(view.artifact.is_none());
        assert!(view.trigger_enabled());
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let service = Arc::new(ScriptedService::default());
        service.push_success("https://x/img1.png");
        let c = controller(service);

        c.set_message("HELLO");
        c.generate().await.unwrap();

        let once = c.reset();
        let twice = c.reset();
        assert_eq!(once, twice);
        assert_eq!(once.state, UiState::Idle);
        assert_eq!(once.message, crate::config::DEFAULT_MESSAGE);
        assert_eq!(once.font_size, crate::config::DEFAULT_FONT_SIZE);
        assert_eq!(once.text_color, crate::config::DEFAULT_TEXT_COLOR);
        assert_eq!(once.char_count(), "101/200");
        assert!(once.artifact.is_none());
        assert!(once.error_banner().is_none());
    }

    #[tokio::test]
    async fn download_without_artifact_is_a_silent_no_op() {
        let service = Arc::new(ScriptedService::default());
        let c = controller(service.clone());
        let dir = tempfile::tempdir().unwrap();

        let saved = c.download(dir.path()).await.unwrap();
        assert!(saved.is_none());
        assert_eq!(service.fetch_count(), 0);
        assert!(!dir.path().join(DOWNLOAD_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn download_saves_under_the_fixed_file_name() {
        let service = Arc::new(ScriptedService::default());
        service.push_success("https://x/img1.png");
        let c = controller(service.clone());
        let dir = tempfile::tempdir().unwrap();

        c.generate().await.unwrap();
        let saved = c.download(dir.path()).await.unwrap();

        let path = dir.path().join(DOWNLOAD_FILE_NAME);
        assert_eq!(saved, Some(path.clone()));
        assert_eq!(std::fs::read(&path).unwrap(), PNG_STUB);
        assert_eq!(
            service.fetched.lock().unwrap().as_slice(),
            &["https://x/img1.png".to_string()]
        );
    }

    #[tokio::test]
    async fn char_count_tracks_input_independent_of_lifecycle() {
        let service = Arc::new(ScriptedService::default());
        service.push_fault();
        let c = controller(service);

        c.set_message("WELCOME TO OREGON");
        assert_eq!(c.view().char_count(), "17/200");

        c.generate().await.unwrap();
        // Still mirrors the input after a failure.
        assert_eq!(c.view().char_count(), "17/200");

        c.set_message("HELLO");
        assert_eq!(c.view().char_count(), "5/200");
    }
}
