//! Integration tests for layered configuration loading

use super::test_utils::EnvGuard;
use apigw::cli::RunContext;
use apigw::config::{ClientConfig, ClientOverrides, ConfigLoader, CONFIG_FILE_ENV};
use apigw::error::{ErrorKind, ExitCode};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const APIHOST_ENV: &str = "APIGW_CLIENT__APIHOST";
const NAMESPACE_ENV: &str = "APIGW_CLIENT__NAMESPACE";
const INSECURE_ENV: &str = "APIGW_CLIENT__INSECURE";

/// Write `client` as the `[client]` table of a TOML file.
fn write_client_config(dir: &Path, name: &str, client: &ClientConfig) -> PathBuf {
    let mut table = toml::Table::new();
    table.insert(
        "client".to_string(),
        toml::Value::try_from(client).unwrap(),
    );
    let path = dir.join(name);
    std::fs::write(&path, toml::to_string(&table).unwrap()).unwrap();
    path
}

fn client(apihost: &str, namespace: &str) -> ClientConfig {
    ClientConfig {
        apihost: apihost.to_string(),
        namespace: namespace.to_string(),
        ..ClientConfig::default()
    }
}

#[test]
fn test_defaults_without_any_file() {
    let temp = TempDir::new().unwrap();
    let absent = temp.path().join("absent.toml");
    let _env = EnvGuard::set(&[
        (CONFIG_FILE_ENV, absent.to_str()),
        (APIHOST_ENV, None),
        (NAMESPACE_ENV, None),
        (INSECURE_ENV, None),
    ]);

    let config = ConfigLoader::load(None).unwrap();
    assert_eq!(config.client.apihost, "");
    assert_eq!(config.client.namespace(), "_");
    assert_eq!(config.client.api_version, "v1");
    assert_eq!(config.client.timeout_secs, 60);
    assert!(!config.client.insecure);
    assert!(config.output.color);
}

#[test]
fn test_global_file_then_explicit_file() {
    let temp = TempDir::new().unwrap();
    let global = write_client_config(temp.path(), "global.toml", &client("global.example.com", "team"));
    let explicit = write_client_config(temp.path(), "explicit.toml", &client("explicit.example.com", "team"));
    let _env = EnvGuard::set(&[
        (CONFIG_FILE_ENV, global.to_str()),
        (APIHOST_ENV, None),
        (NAMESPACE_ENV, None),
        (INSECURE_ENV, None),
    ]);

    let config = ConfigLoader::load(None).unwrap();
    assert_eq!(config.client.apihost, "global.example.com");
    assert_eq!(config.client.namespace, "team");

    let config = ConfigLoader::load(Some(explicit.as_path())).unwrap();
    assert_eq!(config.client.apihost, "explicit.example.com");
}

#[test]
fn test_environment_beats_files() {
    let temp = TempDir::new().unwrap();
    let global = write_client_config(temp.path(), "global.toml", &client("global.example.com", "team"));
    let _env = EnvGuard::set(&[
        (CONFIG_FILE_ENV, global.to_str()),
        (APIHOST_ENV, Some("env.example.com")),
        (NAMESPACE_ENV, None),
        (INSECURE_ENV, Some("true")),
    ]);

    let config = ConfigLoader::load(None).unwrap();
    assert_eq!(config.client.apihost, "env.example.com");
    assert_eq!(config.client.namespace, "team");
    assert!(config.client.insecure);
}

#[test]
fn test_flags_beat_environment() {
    let temp = TempDir::new().unwrap();
    let absent = temp.path().join("absent.toml");
    let _env = EnvGuard::set(&[
        (CONFIG_FILE_ENV, absent.to_str()),
        (APIHOST_ENV, Some("env.example.com")),
        (NAMESPACE_ENV, Some("env-namespace")),
        (INSECURE_ENV, None),
    ]);

    let overrides = ClientOverrides {
        apihost: Some("flag.example.com".to_string()),
        no_color: true,
        ..ClientOverrides::default()
    };
    let context = RunContext::new(None, &overrides).unwrap();
    assert_eq!(context.config().client.apihost, "flag.example.com");
    assert_eq!(context.config().client.namespace(), "env-namespace");
    assert!(!context.config().output.color);
}

#[test]
fn test_missing_explicit_file_is_config_error() {
    let temp = TempDir::new().unwrap();
    let absent = temp.path().join("absent.toml");
    let _env = EnvGuard::set(&[(CONFIG_FILE_ENV, absent.to_str())]);

    let err = ConfigLoader::load(Some(temp.path().join("missing.toml").as_path())).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Config(_)));
    assert_eq!(err.exit_code(), ExitCode::General);
}
