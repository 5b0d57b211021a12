use anyhow::{Result, bail};

use super::{AppConfig, defaults};

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if cfg.auth.secret_key.len() < defaults::MIN_SECRET_KEY_LEN {
        errors.push(format!(
            "auth.secret_key must be at least {} characters",
            defaults::MIN_SECRET_KEY_LEN
        ));
    }

    if !cfg!(debug_assertions) && cfg.auth.secret_key == defaults::DEV_SECRET_KEY {
        errors.push("auth.secret_key is required in release builds".to_string());
    }

    if !(1..=defaults::MAX_SESSION_TTL_HOURS).contains(&cfg.auth.session_ttl_hours) {
        errors.push(format!(
            "auth.session_ttl_hours must be between 1 and {}",
            defaults::MAX_SESSION_TTL_HOURS
        ));
    }

    if cfg.weather.city.trim().is_empty() {
        errors.push("weather.city must not be empty".to_string());
    }

    let base_url = cfg.weather.base_url.trim().to_ascii_lowercase();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push("weather.base_url must start with http:// or https://".to_string());
    }

    if cfg.weather.timeout_secs == 0 {
        errors.push("weather.timeout_secs must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::AppConfig;

    #[test]
    fn defaults_are_valid() {
        validate(&AppConfig::default()).expect("default config should validate");
    }

    #[test]
    fn collects_every_problem_into_one_error() {
        let mut cfg = AppConfig::default();
        cfg.database.url = " ".to_string();
        cfg.database.min_idle = 20;
        cfg.auth.secret_key = "short".to_string();
        cfg.weather.timeout_secs = 0;

        let message = validate(&cfg).expect_err("config should fail").to_string();

        assert!(message.contains("database.url must not be empty"));
        assert!(message.contains("database.min_idle (20)"));
        assert!(message.contains("auth.secret_key must be at least"));
        assert!(message.contains("weather.timeout_secs must be > 0"));
    }

    #[test]
    fn rejects_out_of_range_session_ttl() {
        for hours in [0, -5, 24 * 365 + 1, i64::MAX] {
            let mut cfg = AppConfig::default();
            cfg.auth.session_ttl_hours = hours;

            let message = validate(&cfg).expect_err("config should fail").to_string();
            assert!(message.contains("auth.session_ttl_hours"), "{hours}");
        }

        let mut cfg = AppConfig::default();
        cfg.auth.session_ttl_hours = 24 * 365;
        validate(&cfg).expect("a one-year session should validate");
    }

    #[test]
    fn rejects_non_http_weather_base_url() {
        let mut cfg = AppConfig::default();
        cfg.weather.base_url = "ftp://weather.example".to_string();

        let message = validate(&cfg).expect_err("config should fail").to_string();
        assert!(message.contains("weather.base_url"));
    }

    #[test]
    fn weather_is_disabled_without_api_key() {
        let mut cfg = AppConfig::default();
        assert!(!cfg.weather.enabled());

        cfg.weather.api_key = "abc123".to_string();
        assert!(cfg.weather.enabled());
    }
}
