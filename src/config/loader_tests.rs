//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

// ===== Paths =====

#[test]
fn default_config_path_ends_with_commentview_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("commentview") && path_str.ends_with("config.toml"),
        "got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_commentview_log() {
    let path = default_log_path();
    assert!(path.to_string_lossy().ends_with("commentview.log"), "got: {:?}", path);
}

// ===== load_config_file =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let path = write_temp(
        "commentview_test_config.toml",
        r#"
container_width = 320
log_file_path = "/tmp/cv.log"

[layout]
details_height = 60
markup_fallback_height = 80

[insets.large]
top = 12
left = 8
bottom = 12
right = 8
"#,
    );

    let config = load_config_file(&path)
        .expect("Should parse valid TOML")
        .expect("File exists");

    assert_eq!(config.container_width, Some(320));
    assert_eq!(config.log_file_path, Some(PathBuf::from("/tmp/cv.log")));
    let layout = config.layout.expect("layout table present");
    assert_eq!(layout.details_height, Some(60));
    assert_eq!(layout.markup_fallback_height, Some(80));
    assert_eq!(layout.reactions_height, None);
    assert_eq!(
        config.insets.and_then(|insets| insets.large),
        Some(Insets::new(12, 8, 12, 8))
    );

    fs::remove_file(path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let path = write_temp("commentview_test_invalid.toml", "container_width = [unclosed");

    let result = load_config_file(&path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "got: {:?}",
        result
    );

    fs::remove_file(path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
    assert!(result.is_err(), "unknown top-level keys are rejected");

    let result: Result<ConfigFile, _> = toml::from_str("[layout]\nbogus = 1");
    assert!(result.is_err(), "unknown layout keys are rejected");
}

#[test]
fn partial_insets_default_missing_edges_to_zero() {
    let config: ConfigFile =
        toml::from_str("[insets.large_tail]\nleft = 4").expect("valid partial insets");
    assert_eq!(
        config.insets.and_then(|insets| insets.large_tail),
        Some(Insets::new(0, 4, 0, 0))
    );
}

// ===== merge_config =====

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let file = ConfigFile {
        container_width: Some(280),
        layout: Some(LayoutSection {
            reactions_height: Some(44),
            text_line_height: Some(18),
            ..LayoutSection::default()
        }),
        insets: Some(InsetsSection {
            large: Some(Insets::new(1, 2, 3, 4)),
            large_tail: None,
        }),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.container_width, 280);
    assert_eq!(resolved.metrics.reactions_height, 44);
    assert_eq!(resolved.metrics.text_line_height, 18);
    assert_eq!(resolved.metrics.details_height, defaults.metrics.details_height);
    assert_eq!(resolved.insets.large, Insets::new(1, 2, 3, 4));
    assert_eq!(resolved.insets.large_tail, defaults.insets.large_tail);
    assert_eq!(resolved.log_file_path, defaults.log_file_path);
}

#[test]
fn controller_config_carries_layout() {
    let resolved = merge_config(Some(ConfigFile {
        layout: Some(LayoutSection {
            image_fallback_height: Some(150),
            ..LayoutSection::default()
        }),
        ..ConfigFile::default()
    }));
    let controller = resolved.controller_config();
    assert_eq!(controller.metrics.image_fallback_height, 150);
    assert_eq!(controller.insets, resolved.insets);
}

// ===== Env and CLI overrides =====

#[test]
#[serial(commentview_log)]
fn apply_env_overrides_respects_commentview_log() {
    let _guard = EnvGuard::new(LOG_ENV_VAR);
    env::set_var(LOG_ENV_VAR, "/var/tmp/env.log");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(result.log_file_path, PathBuf::from("/var/tmp/env.log"));
    assert_eq!(result.container_width, DEFAULT_CONTAINER_WIDTH);
}

#[test]
#[serial(commentview_log)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(LOG_ENV_VAR);
    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
fn apply_cli_overrides_replaces_width_and_log() {
    let result = apply_cli_overrides(
        ResolvedConfig::default(),
        Some(200),
        Some(PathBuf::from("/tmp/cli.log")),
    )
    .expect("positive width");
    assert_eq!(result.container_width, 200);
    assert_eq!(result.log_file_path, PathBuf::from("/tmp/cli.log"));
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None, None), Ok(base));
}

#[test]
fn apply_cli_overrides_rejects_zero_width() {
    assert_eq!(
        apply_cli_overrides(ResolvedConfig::default(), Some(0), None),
        Err(ConfigError::ZeroWidth)
    );
}

// ===== Precedence =====

#[test]
#[serial(commentview_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let explicit = write_temp("commentview_explicit.toml", "container_width = 111");
    let from_env = write_temp("commentview_env.toml", "container_width = 222");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .expect("readable")
        .expect("present");
    assert_eq!(config.container_width, Some(111), "explicit path wins over env");

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(commentview_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let from_env = write_temp("commentview_env_only.toml", "container_width = 222");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(None)
        .expect("readable")
        .expect("present");
    assert_eq!(config.container_width, Some(222));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial(commentview_config)]
fn load_config_with_precedence_env_pointing_at_missing_file_yields_none() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    env::set_var(CONFIG_ENV_VAR, "/nonexistent/commentview/config.toml");

    assert_eq!(load_config_with_precedence(None), Ok(None));
}

#[test]
#[serial(commentview_config, commentview_log)]
fn precedence_chain_full_defaults_to_cli() {
    let _config_guard = EnvGuard::new(CONFIG_ENV_VAR);
    let _log_guard = EnvGuard::new(LOG_ENV_VAR);
    let path = write_temp(
        "commentview_chain.toml",
        "container_width = 300\nlog_file_path = \"/tmp/file.log\"",
    );
    env::set_var(LOG_ENV_VAR, "/tmp/env.log");

    let file = load_config_with_precedence(Some(path.clone())).expect("readable");
    let merged = merge_config(file);
    assert_eq!(merged.log_file_path, PathBuf::from("/tmp/file.log"));

    let with_env = apply_env_overrides(merged);
    assert_eq!(with_env.log_file_path, PathBuf::from("/tmp/env.log"));

    let final_config = apply_cli_overrides(with_env, Some(250), None).expect("positive width");
    assert_eq!(final_config.container_width, 250);
    assert_eq!(final_config.log_file_path, PathBuf::from("/tmp/env.log"));

    fs::remove_file(path).ok();
}
