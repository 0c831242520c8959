use hn_front::config::{ExtractorConfig, DEFAULT_URL};
use hn_front::ExtractError;
use std::io::Write;

#[test]
fn test_load_explicit_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "limit": 8,
            "navigation_timeout_secs": 12,
            "proxy": {{ "enabled": true, "type": "http", "host": "10.1.1.1", "port": 3128 }}
        }}"#
    )
    .unwrap();

    let config = ExtractorConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.limit, 8);
    assert_eq!(config.navigation_timeout_secs, 12);
    assert_eq!(config.url, DEFAULT_URL);
    assert_eq!(
        config.proxy.server_arg().as_deref(),
        Some("http://10.1.1.1:3128")
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let err = ExtractorConfig::load(Some(&missing)).unwrap_err();
    assert!(matches!(err, ExtractError::Config(_)));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ limit: five }}").unwrap();
    let err = ExtractorConfig::from_json_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), "config_error");
}

#[test]
fn test_wrong_type_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "limit": -3 }}"#).unwrap();
    assert!(ExtractorConfig::from_json_file(file.path()).is_err());
}
