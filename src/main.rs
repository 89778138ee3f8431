use std::sync::Arc;

use signgen::{
    display, logger, Config, HttpRenderService, RequestLifecycleController, Theme, ThemeStore,
    UiState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(logger::LoggerConfig::development())?;

    let config = Config::from_env();
    let base_url = config
        .service
        .base_url
        .clone()
        .unwrap_or_else(|| "http://localhost:5000".to_string());
    log::info!("🔄 Connecting to rendering service at {}", base_url);

    if let Some(path) = &config.theme_path {
        let store = ThemeStore::new(path.clone());
        match store.effective(Theme::Light) {
            Ok(theme) => log::info!("🎨 Theme: {:?}", theme),
            Err(e) => log::warn!("⚠️  Could not read theme preference: {}", e),
        }
    }

    let service = Arc::new(HttpRenderService::new(
        config.service.clone().with_base_url(&base_url),
    )?);
    let controller = RequestLifecycleController::new(service, config.defaults.clone());

    let view = controller.view();
    log::info!(
        "📝 Message ({}): {:?}",
        view.char_count(),
        view.message.lines().next().unwrap_or_default()
    );
    log::info!(
        "🔠 Font size: {} | Color: {}",
        display::font_size_label(view.font_size),
        view.text_color
    );

    // One generation runs automatically at startup with the default fields.
    log::info!("🖼️  Running startup generation...");
    let view = match controller.generate().await {
        Ok(view) => view,
        Err(e) => {
            log::error!("❌ Could not issue the startup generation: {}", e);
            return Err(e.into());
        }
    };

    match view.state {
        UiState::Success => {
            if let Some(artifact) = &view.artifact {
                log::info!("✅ Billboard ready: {}", artifact.url());
            }
            match controller.download(std::env::current_dir()?).await {
                Ok(Some(path)) => log::info!("💾 Saved to {}", path.display()),
                Ok(None) => {}
                Err(e) => log::error!("❌ Download failed: {}", e),
            }
        }
        UiState::Error => {
            if let Some(banner) = view.error_banner() {
                log::error!("{}", banner);
            }
            log::warn!("💡 Is the rendering service running at {}?", base_url);
        }
        _ => {}
    }

    Ok(())
}
