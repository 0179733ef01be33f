//! Integration tests for configuration loader

use std::io::Write;

use obscreen_infra::config;
use obscreen_infra::ObscreenClient;
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_json_config_builds_client() {
    let path = write_config(
        r#"{
            "instance_url": "https://screens.example.org/",
            "api_key": "json-key",
            "timeout_secs": 12,
            "user_agent": "lobby-sync"
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config");
    assert_eq!(config.timeout_secs, 12);
    assert_eq!(config.user_agent.as_deref(), Some("lobby-sync"));

    let client = ObscreenClient::new(&config).expect("client");
    assert_eq!(client.base_url(), "https://screens.example.org");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_toml_config_with_defaults() {
    let path = write_config("api_key = \"toml-key\"\naccept_invalid_certs = true\n", "toml");

    let config = config::load_from_file(Some(path.clone())).expect("config");
    assert_eq!(config.instance_url, "https://demo.obscreen.io");
    assert!(config.accept_invalid_certs);
    assert!(!config.continue_on_fail);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_debug_output_hides_api_key() {
    let path = write_config(r#"{"api_key": "very-secret"}"#, "json");

    let config = config::load_from_file(Some(path.clone())).expect("config");
    assert!(!format!("{config:?}").contains("very-secret"));

    std::fs::remove_file(path).ok();
}
