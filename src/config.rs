use std::env;

/// Fixed default values the form is restored to by `reset()`. These match
/// the sign the service ships with.
pub const DEFAULT_MESSAGE: &str = "WELCOME TO OREGON\nMAKE THIS SIGN SAY ANYTHING\nTHERE ARE FOUR LINES IN HERE\nFEEL THE FREEDOM, IT BURNS";
pub const DEFAULT_FONT_SIZE: u32 = 80;
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Display cap for the character counter. Not enforced client-side; the
/// service is authoritative for acceptance.
pub const MAX_MESSAGE_LENGTH: usize = 200;

/// File name used for every artifact download.
pub const DOWNLOAD_FILE_NAME: &str = "uncle-sam-billboard.png";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: None,
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("SIGNGEN_BASE_URL").ok();
        let timeout_secs = env::var("SIGNGEN_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        ServiceConfig {
            base_url,
            timeout_secs,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// Default field values the controller starts from and `reset()` restores.
#[derive(Debug, Clone)]
pub struct FormDefaults {
    pub message: String,
    pub font_size: u32,
    pub text_color: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        FormDefaults {
            message: DEFAULT_MESSAGE.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            text_color: DEFAULT_TEXT_COLOR.to_string(),
        }
    }
}

impl FormDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_text_color(mut self, text_color: impl Into<String>) -> Self {
        self.text_color = text_color.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    pub defaults: FormDefaults,
    /// Where `ThemeStore` keeps the persisted theme preference.
    pub theme_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service: ServiceConfig::default(),
            defaults: FormDefaults::default(),
            theme_path: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            service: ServiceConfig::from_env(),
            defaults: FormDefaults::default(),
            theme_path: env::var("SIGNGEN_THEME_PATH").ok(),
        }
    }

    pub fn with_service(mut self, service: ServiceConfig) -> Self {
        self.service = service;
        self
    }

    pub fn with_defaults(mut self, defaults: FormDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_theme_path(mut self, path: impl Into<String>) -> Self {
        self.theme_path = Some(path.into());
        self
    }
}
