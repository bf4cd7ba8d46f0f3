use figment::Jail;
use trace_config::TraceConfig;
use trace_core::enums::ReviewPolicy;

#[test]
fn env_sets_database_path() {
    Jail::expect_with(|jail| {
        jail.set_env("TRACEABILITY_DATABASE__PATH", "/tmp/changes.db");

        let config = TraceConfig::load().expect("config loads");
        assert_eq!(config.database.path, "/tmp/changes.db");
        Ok(())
    });
}

#[test]
fn env_sets_review_policy() {
    Jail::expect_with(|jail| {
        jail.set_env("TRACEABILITY_REVIEW__POLICY", "strict");

        let config = TraceConfig::load().expect("config loads");
        assert_eq!(config.review.policy, ReviewPolicy::Strict);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".traceability")?;
        jail.create_file(
            ".traceability/config.toml",
            r#"
[review]
default_page_limit = 5
"#,
        )?;
        jail.set_env("TRACEABILITY_REVIEW__DEFAULT_PAGE_LIMIT", "40");

        let config = TraceConfig::load().expect("config loads");
        assert_eq!(config.review.default_page_limit, 40);
        Ok(())
    });
}
