use fedi_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = FediConfig::from_toml("").unwrap();

    // Instance defaults
    assert_eq!(config.instance.host, "localhost");
    assert!(config.instance.account_domain.is_none());

    // Cache defaults
    assert_eq!(config.cache.account_capacity, 1_024);
    assert_eq!(config.cache.status_capacity, 4_096);

    // Resolver defaults
    assert_eq!(config.resolver.fetch_timeout_ms, 10_000);
    assert!(config.resolver.thread_backfill);
    assert_eq!(config.resolver.backfill_timeout_ms, 30_000);
    assert!(config.resolver.single_flight);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[instance]
host = "gts.example.org"
account_domain = "example.org"

[resolver]
thread_backfill = false
"#;
    let config = FediConfig::from_toml(toml).unwrap();
    assert_eq!(config.instance.host, "gts.example.org");
    assert_eq!(config.instance.account_domain.as_deref(), Some("example.org"));
    assert!(!config.resolver.thread_backfill);
    // Non-overridden fields keep defaults
    assert_eq!(config.resolver.fetch_timeout_ms, 10_000);
}

#[test]
fn config_rejects_empty_host() {
    let err = FediConfig::from_toml("[instance]\nhost = \"  \"\n").unwrap_err();
    assert!(err.to_string().contains("instance.host"));
}

#[test]
fn config_rejects_zero_fetch_timeout() {
    let err = FediConfig::from_toml("[resolver]\nfetch_timeout_ms = 0\n").unwrap_err();
    assert!(err.to_string().contains("fetch_timeout_ms"));
}

#[test]
fn config_rejects_malformed_toml() {
    assert!(FediConfig::from_toml("[instance\nhost = 1").is_err());
}

#[test]
fn local_host_matches_host_and_account_domain_case_insensitively() {
    let instance = InstanceConfig::new("gts.example.org", Some("example.org".into()));
    assert!(instance.is_local_host("gts.example.org"));
    assert!(instance.is_local_host("GTS.Example.org"));
    assert!(instance.is_local_host("example.org"));
    assert!(!instance.is_local_host("remote.example"));
    assert!(!instance.is_local_host(""));
}
