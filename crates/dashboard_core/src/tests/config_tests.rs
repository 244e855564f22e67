use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_point_at_local_backend() {
    let settings = Settings::default();
    assert_eq!(settings.backend_url, "http://127.0.0.1:5000");
    assert_eq!(settings.request_timeout_secs, None);
    assert!(settings.fetch_benchmark_on_start);
}

#[test]
fn file_settings_override_defaults_field_by_field() {
    let mut settings = Settings::default();
    apply_file_settings(
        &mut settings,
        r#"
            backend_url = "http://engine.internal:8080"
            fetch_benchmark_on_start = false
        "#,
    )
    .expect("parse toml");

    assert_eq!(settings.backend_url, "http://engine.internal:8080");
    assert!(!settings.fetch_benchmark_on_start);
    assert_eq!(settings.request_timeout_secs, None);
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file_settings(&mut settings, "bind_addr = \"0.0.0.0:1\"").is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_alias() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[
            ("VEDABYTE_BACKEND_URL", "http://alias:1"),
            ("APP__BACKEND_URL", "http://prefixed:2"),
            ("APP__REQUEST_TIMEOUT_SECS", "15"),
            ("APP__FETCH_BENCHMARK_ON_START", "off"),
        ]),
    );

    assert_eq!(settings.backend_url, "http://prefixed:2");
    assert_eq!(settings.request_timeout_secs, Some(15));
    assert!(!settings.fetch_benchmark_on_start);
}

#[test]
fn invalid_env_values_are_ignored() {
    let mut settings = Settings::default();
    settings.request_timeout_secs = Some(3);
    apply_env_overrides(
        &mut settings,
        lookup_from(&[
            ("APP__REQUEST_TIMEOUT_SECS", "soon"),
            ("APP__FETCH_BENCHMARK_ON_START", "maybe"),
        ]),
    );

    assert_eq!(settings.request_timeout_secs, Some(3));
    assert!(settings.fetch_benchmark_on_start);
}

#[test]
fn zero_timeout_restores_transport_default() {
    let mut settings = Settings::default();
    settings.request_timeout_secs = Some(30);
    apply_env_overrides(&mut settings, lookup_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]));
    assert_eq!(settings.request_timeout_secs, None);
}

#[test]
fn loads_explicit_config_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("vedabyte_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("vedabyte.toml");
    fs::write(&path, "request_timeout_secs = 7\n").expect("write config");

    let settings = load_settings_from(Some(&path));
    if env::var_os("APP__REQUEST_TIMEOUT_SECS").is_none() {
        assert_eq!(settings.request_timeout_secs, Some(7));
    }

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_explicit_file_falls_back_to_defaults() {
    let path = env::temp_dir().join("vedabyte_config_test_does_not_exist.toml");
    let settings = load_settings_from(Some(&path));
    if env::var_os("APP__REQUEST_TIMEOUT_SECS").is_none() {
        assert_eq!(settings.request_timeout_secs, None);
    }
}
