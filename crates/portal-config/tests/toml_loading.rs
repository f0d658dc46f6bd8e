//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use portal_config::PortalConfig;
use portal_core::SyncKind;

#[test]
fn loads_gateway_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[gateway]
base_url = "https://portal.example.ac.id/api"
request_timeout_secs = 30
session_cookie = "PHPSESSID=abc"

[gateway.endpoints]
grades = "grades/by-term/"
"#,
        )?;

        let config: PortalConfig = Figment::from(Serialized::defaults(PortalConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.gateway.request_timeout_secs, 30);
        assert!(config.gateway.has_session());
        assert_eq!(
            config.gateway.endpoint_url(SyncKind::Grades).as_deref(),
            Some("https://portal.example.ac.id/api/grades/by-term/")
        );
        assert_eq!(config.gateway.endpoints.schedule, portal_config::EndpointPaths::default().schedule);
        Ok(())
    });
}

#[test]
fn loads_store_and_display_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
path = ":memory:"

[display]
date_format = "%Y-%m-%d"
currency_prefix = "IDR"
"#,
        )?;

        let config: PortalConfig = Figment::from(Serialized::defaults(PortalConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.store.is_in_memory());
        assert_eq!(config.display.date_format, "%Y-%m-%d");
        assert_eq!(config.display.currency_prefix, "IDR");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[gateway]
request_timeout_secs = 30
"#,
        )?;
        jail.set_env("PORTAL_GATEWAY__REQUEST_TIMEOUT_SECS", "5");
        jail.set_env("PORTAL_GATEWAY__ENDPOINTS__COURSE", "courses/");

        let config: PortalConfig = Figment::from(Serialized::defaults(PortalConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("PORTAL_").split("__"))
            .extract()?;

        assert_eq!(config.gateway.request_timeout_secs, 5);
        assert_eq!(config.gateway.endpoints.course, "courses/");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".portal")?;
        jail.create_file(
            ".portal/config.toml",
            r#"
[store]
path = "local.db"
"#,
        )?;

        let config = PortalConfig::load().expect("config loads");
        assert_eq!(config.store.path, "local.db");
        Ok(())
    });
}

#[test]
fn load_rejects_zero_timeout_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("PORTAL_GATEWAY__REQUEST_TIMEOUT_SECS", "0");
        assert!(PortalConfig::load().is_err());
        Ok(())
    });
}

#[test]
fn load_rejects_bad_date_format_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".portal")?;
        jail.create_file(
            ".portal/config.toml",
            r#"
[display]
date_format = "%d %Q %Y"
"#,
        )?;
        let err = PortalConfig::load().unwrap_err();
        assert!(err.to_string().contains("display.date_format"));
        Ok(())
    });
}
