//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use trace_config::{ConfigError, TraceConfig};
use trace_core::enums::ReviewPolicy;

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/traceability/changes.db"

[review]
default_page_limit = 25
policy = "strict"
"#,
        )?;

        let config: TraceConfig = Figment::from(Serialized::defaults(TraceConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/traceability/changes.db");
        assert_eq!(config.review.default_page_limit, 25);
        assert_eq!(config.review.policy, ReviewPolicy::Strict);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[review]
policy = "overwrite"
"#,
        )?;

        let config: TraceConfig = Figment::from(Serialized::defaults(TraceConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, ".traceability/traceability.db");
        assert_eq!(config.review.default_page_limit, 10);
        assert_eq!(config.review.policy, ReviewPolicy::Overwrite);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".traceability")?;
        jail.create_file(
            ".traceability/config.toml",
            r#"
[database]
path = ":memory:"
"#,
        )?;

        let config = TraceConfig::load().expect("config loads");
        assert!(config.database.is_in_memory());
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[review]
default_page_limit = 25
"#,
        )?;
        jail.set_env("TRACEABILITY_REVIEW__DEFAULT_PAGE_LIMIT", "50");

        let config: TraceConfig = Figment::from(Serialized::defaults(TraceConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("TRACEABILITY_").split("__"))
            .extract()?;

        assert_eq!(config.review.default_page_limit, 50);
        Ok(())
    });
}

#[test]
fn unknown_policy_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[review]
policy = "sometimes"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(TraceConfig::default()))
            .merge(Toml::file("config.toml"));
        let result = TraceConfig::from_figment(&figment);
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}

#[test]
fn zero_page_limit_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[review]
default_page_limit = 0
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(TraceConfig::default()))
            .merge(Toml::file("config.toml"));
        let result = TraceConfig::from_figment(&figment);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}
