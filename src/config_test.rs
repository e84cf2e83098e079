//! Tests for configuration validation.

use secrecy::ExposeSecret;

use crate::config::{Config, ConfigError};

#[test]
fn base_url_gets_single_trailing_slash() {
    let config = Config::new("token", "https://api.example.com/v2").unwrap();
    assert_eq!(config.base_url().as_str(), "https://api.example.com/v2/");

    let config = Config::new("token", "https://api.example.com/v2///").unwrap();
    assert_eq!(config.base_url().as_str(), "https://api.example.com/v2/");
}

#[test]
fn empty_api_key_is_rejected() {
    let err = Config::new("  ", "https://api.example.com/v2").unwrap_err();
    assert!(matches!(err, ConfigError::MissingApiKey));
}

#[test]
fn empty_base_url_is_rejected() {
    let err = Config::new("token", "").unwrap_err();
    assert!(matches!(err, ConfigError::MissingBaseUrl));
}

#[test]
fn relative_base_url_is_rejected() {
    let err = Config::new("token", "api.example.com/v2").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
}

#[test]
fn non_http_scheme_is_rejected() {
    let err = Config::new("token", "ftp://api.example.com").unwrap_err();
    match err {
        ConfigError::InvalidBaseUrl { reason, .. } => assert!(reason.contains("ftp")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn api_key_is_not_leaked_by_debug() {
    let config = Config::new("super-secret-token", "https://api.example.com").unwrap();
    assert_eq!(config.api_key().expose_secret(), "super-secret-token");
    assert!(!format!("{config:?}").contains("super-secret-token"));
}
