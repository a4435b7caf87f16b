use super::{load_settings_from, Settings};

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_file_or_env() {
    let settings = load_settings_from(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert!(settings.resend_api_key.is_none());
    assert_eq!(settings.subject_tag, "New Portfolio Contact");
}

#[test]
fn file_values_apply_and_env_wins() {
    let file = r#"
bind_addr = "0.0.0.0:8080"
mail_to = "file@example.com"
max_body_bytes = "1024"
"#;
    let settings = load_settings_from(
        Some(file),
        env_from(&[("CONTACT_MAIL_TO", "env@example.com")]),
    );
    assert_eq!(settings.server_bind, "0.0.0.0:8080");
    assert_eq!(settings.mail_to, "env@example.com");
    assert_eq!(settings.max_body_bytes, 1024);
}

#[test]
fn prefixed_env_overrides_plain_env() {
    let settings = load_settings_from(
        None,
        env_from(&[("SERVER_BIND", "127.0.0.1:1"), ("APP__BIND_ADDR", "127.0.0.1:2")]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:2");
}

#[test]
fn blank_api_key_counts_as_missing() {
    let settings = load_settings_from(None, env_from(&[("RESEND_API_KEY", "   ")]));
    assert!(settings.resend_api_key.is_none());

    let settings = load_settings_from(None, env_from(&[("RESEND_API_KEY", " re_123 ")]));
    assert_eq!(settings.resend_api_key.as_deref(), Some("re_123"));
}

#[test]
fn unparsable_numbers_keep_defaults() {
    let settings = load_settings_from(
        None,
        env_from(&[("APP__MAIL_TIMEOUT_SECS", "soon")]),
    );
    assert_eq!(settings.mail_timeout_secs, Settings::default().mail_timeout_secs);
}

#[test]
fn malformed_file_is_ignored() {
    let settings = load_settings_from(Some("this is = = not toml"), env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn invalid_api_url_is_an_error() {
    let settings = load_settings_from(
        None,
        env_from(&[("RESEND_API_URL", "not a url")]),
    );
    assert!(settings.resend_api_url().is_err());
    assert!(Settings::default().resend_api_url().is_ok());
}

#[test]
fn debug_output_redacts_api_key() {
    let settings = load_settings_from(None, env_from(&[("RESEND_API_KEY", "re_secret")]));
    let rendered = format!("{settings:?}");
    assert!(!rendered.contains("re_secret"));
    assert!(rendered.contains("<redacted>"));
}
