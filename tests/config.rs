use std::fs;

use admin_console::models::config::ServerConfig;

#[test]
fn loads_defaults_and_environment_overrides() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.yaml"),
        "address: 0.0.0.0\nport: 8080\ntemplates_dir: templates/**/*\n",
    )
    .unwrap();
    fs::write(dir.path().join("staging.yaml"), "port: 9090\nmock_total_users: 42\n").unwrap();

    let config = ServerConfig::load(dir.path(), "staging").unwrap();

    assert_eq!(config.address, "0.0.0.0");
    assert_eq!(config.port, 9090);
    assert_eq!(config.templates_dir, "templates/**/*");
    assert_eq!(config.assets_dir, "./assets");
    assert_eq!(config.mock_total_users, 42);
}

#[test]
fn missing_environment_file_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("default.yaml"),
        "address: 127.0.0.1\nport: 8000\ntemplates_dir: templates/**/*\n",
    )
    .unwrap();

    let config = ServerConfig::load(dir.path(), "local").unwrap();
    assert_eq!(config.port, 8000);
    assert_eq!(config.mock_total_users, 150);
    assert_eq!(config.cache_ttl_secs, 300);
    assert_eq!(config.cache_capacity, 256);
}

#[test]
fn missing_default_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ServerConfig::load(dir.path(), "local").is_err());
}
