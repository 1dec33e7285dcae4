//! Configuration layering: global file, explicit file, environment, and CLI flags.

use pagesctl::cli::RunContext;
use pagesctl::config::{global_config_path, ConfigLoader, DEFAULT_API_BASE_URL};
use std::fs;
use tempfile::TempDir;

use super::test_utils::with_isolated_env;

fn write_global(contents: &str) {
    let path = global_config_path().expect("home directory is set");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_global_file_is_loaded_and_env_overrides_it() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, &[("PAGESCTL_API__TOKEN", "env-token")], || {
        write_global(
            r#"
account_id = "global-account"

[api]
token = "global-token"
timeout_secs = 12
"#,
        );

        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config.account_id.as_deref(), Some("global-account"));
        assert_eq!(config.api.token.as_deref(), Some("env-token"));
        assert_eq!(config.api.timeout_secs, 12);
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    });
}

#[test]
fn test_explicit_file_over_global_and_env_over_both() {
    let test_dir = TempDir::new().unwrap();
    let explicit = test_dir.path().join("explicit.toml");
    fs::write(
        &explicit,
        "account_id = \"explicit-account\"\n[api]\ntimeout_secs = 20\n",
    )
    .unwrap();

    with_isolated_env(&test_dir, &[("PAGESCTL_API__TIMEOUT_SECS", "7")], || {
        write_global("account_id = \"global-account\"\n");

        let config = ConfigLoader::load(Some(explicit.as_path())).unwrap();
        assert_eq!(config.account_id.as_deref(), Some("explicit-account"));
        assert_eq!(config.api.timeout_secs, 7);
    });
}

#[test]
fn test_no_config_anywhere_uses_defaults() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, &[], || {
        let config = ConfigLoader::load(None).unwrap();
        assert!(config.account_id.is_none());
        assert!(config.api.token.is_none());
        assert_eq!(config.api.timeout_secs, 30);
    });
}

#[test]
fn test_run_context_account_flag_wins_over_config() {
    let test_dir = TempDir::new().unwrap();
    let explicit = test_dir.path().join("pagesctl.toml");
    fs::write(&explicit, "account_id = \"from-file\"\n[api]\ntoken = \"t\"\n").unwrap();

    with_isolated_env(&test_dir, &[], || {
        let from_file = RunContext::new(Some(explicit.clone()), None).unwrap();
        assert_eq!(
            from_file.invocation().account_id.as_deref(),
            Some("from-file")
        );

        let from_flag = RunContext::new(Some(explicit.clone()), Some("from-flag".to_string())).unwrap();
        assert_eq!(
            from_flag.invocation().account_id.as_deref(),
            Some("from-flag")
        );
        assert_eq!(from_flag.config().api.token.as_deref(), Some("t"));
    });
}

#[test]
fn test_run_context_rejects_missing_explicit_config() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, &[], || {
        let missing = test_dir.path().join("missing.toml");
        let err = RunContext::new(Some(missing), None).err().unwrap();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("Config file not found"));
    });
}
