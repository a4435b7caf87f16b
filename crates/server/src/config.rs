use std::{collections::HashMap, fmt, fs, time::Duration};

use anyhow::Context;
use mail_integration::DEFAULT_RESEND_API_URL;
use server_api::{DEFAULT_MAIL_FROM, DEFAULT_MAIL_TO, DEFAULT_SUBJECT_TAG};
use url::Url;

#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    /// `None` puts the server in degraded mode: every submission answers 500.
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub mail_from: String,
    pub mail_to: String,
    pub subject_tag: String,
    pub mail_timeout_secs: u64,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            resend_api_key: None,
            resend_api_url: DEFAULT_RESEND_API_URL.into(),
            mail_from: DEFAULT_MAIL_FROM.into(),
            mail_to: DEFAULT_MAIL_TO.into(),
            subject_tag: DEFAULT_SUBJECT_TAG.into(),
            mail_timeout_secs: 10,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("server_bind", &self.server_bind)
            .field(
                "resend_api_key",
                &self.resend_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("resend_api_url", &self.resend_api_url)
            .field("mail_from", &self.mail_from)
            .field("mail_to", &self.mail_to)
            .field("subject_tag", &self.subject_tag)
            .field("mail_timeout_secs", &self.mail_timeout_secs)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl Settings {
    pub fn resend_api_url(&self) -> anyhow::Result<Url> {
        Url::parse(self.resend_api_url.trim())
            .with_context(|| format!("invalid resend api url '{}'", self.resend_api_url))
    }

    pub fn mail_timeout(&self) -> Duration {
        Duration::from_secs(self.mail_timeout_secs)
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the flat `server.toml` map, then environment; later sources win.
pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("resend_api_url") {
                settings.resend_api_url = v.clone();
            }
            if let Some(v) = file_cfg.get("mail_from") {
                settings.mail_from = v.clone();
            }
            if let Some(v) = file_cfg.get("mail_to") {
                settings.mail_to = v.clone();
            }
            if let Some(v) = file_cfg.get("subject_tag") {
                settings.subject_tag = v.clone();
            }
            if let Some(v) = file_cfg.get("mail_timeout_secs").and_then(|v| v.parse().ok()) {
                settings.mail_timeout_secs = v;
            }
            if let Some(v) = file_cfg.get("max_body_bytes").and_then(|v| v.parse().ok()) {
                settings.max_body_bytes = v;
            }
        }
    }

    let lookup = |keys: &[&str]| keys.iter().filter_map(|key| env(key)).last();

    if let Some(v) = lookup(&["SERVER_BIND", "APP__BIND_ADDR"]) {
        settings.server_bind = v;
    }
    if let Some(v) = lookup(&["RESEND_API_KEY", "APP__RESEND_API_KEY"]) {
        settings.resend_api_key = Some(v);
    }
    if let Some(v) = lookup(&["RESEND_API_URL", "APP__RESEND_API_URL"]) {
        settings.resend_api_url = v;
    }
    if let Some(v) = lookup(&["CONTACT_MAIL_FROM", "APP__MAIL_FROM"]) {
        settings.mail_from = v;
    }
    if let Some(v) = lookup(&["CONTACT_MAIL_TO", "APP__MAIL_TO"]) {
        settings.mail_to = v;
    }
    if let Some(v) = lookup(&["APP__SUBJECT_TAG"]) {
        settings.subject_tag = v;
    }
    if let Some(v) = lookup(&["APP__MAIL_TIMEOUT_SECS"]).and_then(|v| v.parse().ok()) {
        settings.mail_timeout_secs = v;
    }
    if let Some(v) = lookup(&["APP__MAX_BODY_BYTES"]).and_then(|v| v.parse().ok()) {
        settings.max_body_bytes = v;
    }

    settings.resend_api_key = settings
        .resend_api_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
