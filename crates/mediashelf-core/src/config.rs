//! Configuration module
//!
//! `ClientConfig` is built once at startup and handed to the API client and
//! the session at construction time. Nothing in the library reads the
//! environment on its own; only binaries call [`ClientConfig::from_env`].

use std::env;
use std::path::PathBuf;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Client configuration shared by the API client and the session
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the remote file service, without trailing slash
    pub api_base_url: String,
    /// Base used to resolve server-relative media URLs. Falls back to `api_base_url`.
    pub media_base_url: Option<String>,
    pub request_timeout_secs: u64,
    /// Whether video and audio views request autoplay
    pub autoplay: bool,
    /// Directory downloads are saved into
    pub download_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            media_base_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            autoplay: true,
            download_dir: PathBuf::from("."),
        }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: trim_base(&api_base_url.into()),
            ..Self::default()
        }
    }

    pub fn with_media_base_url(mut self, media_base_url: impl Into<String>) -> Self {
        self.media_base_url = Some(trim_base(&media_base_url.into()));
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Load from the process environment (after `.env`, if present).
    ///
    /// MEDIASHELF_API_URL, MEDIASHELF_MEDIA_URL, MEDIASHELF_TIMEOUT_SECS,
    /// MEDIASHELF_AUTOPLAY, MEDIASHELF_DOWNLOAD_DIR. All optional.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` is this over `std::env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("MEDIASHELF_API_URL") {
            config.api_base_url = trim_base(&url);
        }
        if let Some(url) = lookup("MEDIASHELF_MEDIA_URL") {
            config.media_base_url = Some(trim_base(&url));
        }
        if let Some(secs) = lookup("MEDIASHELF_TIMEOUT_SECS") {
            config.request_timeout_secs = secs.trim().parse().map_err(|_| {
                anyhow::anyhow!("MEDIASHELF_TIMEOUT_SECS must be an integer, got '{}'", secs)
            })?;
        }
        if let Some(flag) = lookup("MEDIASHELF_AUTOPLAY") {
            config.autoplay = parse_bool(&flag).ok_or_else(|| {
                anyhow::anyhow!("MEDIASHELF_AUTOPLAY must be true or false, got '{}'", flag)
            })?;
        }
        if let Some(dir) = lookup("MEDIASHELF_DOWNLOAD_DIR") {
            config.download_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        validate_base_url("api_base_url", &self.api_base_url)?;
        if let Some(media) = &self.media_base_url {
            validate_base_url("media_base_url", media)?;
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("request_timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    /// Base for server-relative media URLs
    pub fn media_base(&self) -> &str {
        self.media_base_url.as_deref().unwrap_or(&self.api_base_url)
    }

    /// Resolve a stored file URL: absolute URLs pass through, anything else
    /// is treated as a path on the media host.
    pub fn resolve_media_url(&self, raw: &str) -> String {
        if raw.starts_with("http") {
            raw.to_string()
        } else if raw.starts_with('/') {
            format!("{}{}", self.media_base(), raw)
        } else {
            format!("{}/{}", self.media_base(), raw)
        }
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn validate_base_url(field: &str, url: &str) -> Result<(), anyhow::Error> {
    if url.is_empty() {
        return Err(anyhow::anyhow!("{} must not be empty", field));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow::anyhow!(
            "{} must start with http:// or https://, got '{}'",
            field,
            url
        ));
    }
    Ok(())
}
