// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "userinfo";
pub const CONFIG_PATH_ENV: &str = "USERINFO_CONFIG_PATH";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_TIMEOUT: &str = "10s";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub countries: Countries,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            countries: Countries::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Countries {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub timeout: Option<String>,
}

impl Default for Countries {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            endpoint: Some(userinfo_countries::DEFAULT_ENDPOINT.to_owned()),
            timeout: Some(DEFAULT_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` at the top and keep values under [countries] and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(endpoint) = &self.countries.endpoint
            && endpoint.trim().is_empty()
        {
            bail!(
                "countries.endpoint in {} must not be empty; remove it to use {}",
                path.display(),
                userinfo_countries::DEFAULT_ENDPOINT
            );
        }

        if let Some(timeout) = &self.countries.timeout {
            parse_duration(timeout).with_context(|| {
                format!("countries.timeout in {} is invalid", path.display())
            })?;
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            bail!(
                "log.level in {} must be one of {}, got {:?}",
                path.display(),
                LOG_LEVELS.join("|"),
                level
            );
        }

        if let Some(file) = &self.log.file
            && file.trim().is_empty()
        {
            bail!(
                "log.file in {} must not be empty; remove it to log under the data directory",
                path.display()
            );
        }

        Ok(())
    }

    pub fn countries_enabled(&self) -> bool {
        self.countries.enabled.unwrap_or(true)
    }

    pub fn countries_endpoint(&self) -> &str {
        self.countries
            .endpoint
            .as_deref()
            .unwrap_or(userinfo_countries::DEFAULT_ENDPOINT)
    }

    pub fn countries_timeout(&self) -> Result<Duration> {
        parse_duration(self.countries.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn log_level(&self) -> String {
        self.log
            .level
            .as_deref()
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_ascii_lowercase()
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(file) = &self.log.file {
            return Ok(PathBuf::from(file));
        }
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].file to an absolute path")
        })?;
        Ok(data_root.join(APP_NAME).join(format!("{APP_NAME}.log")))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# userinfo config\n# Place this file at: {}\n\nversion = 1\n\n[countries]\n# Set to false (or pass --offline) to use the built-in country list.\nenabled = true\nendpoint = \"{}\"\ntimeout = \"{}\"\n\n[log]\n# RUST_LOG overrides this when set.\nlevel = \"{}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/userinfo/userinfo.log)\n# file = \"/absolute/path/to/userinfo.log\"\n",
            path.display(),
            userinfo_countries::DEFAULT_ENDPOINT,
            DEFAULT_TIMEOUT,
            DEFAULT_LOG_LEVEL,
        )
    }
}

/// Accepts `<N>ms`, `<N>s` or `<N>m`. Zero is rejected.
pub fn parse_duration(raw: &str) -> Result<Duration> {
    let trimmed = raw.trim();
    let (digits, unit_millis) = if let Some(value) = trimmed.strip_suffix("ms") {
        (value, 1)
    } else if let Some(value) = trimmed.strip_suffix('s') {
        (value, 1_000)
    } else if let Some(value) = trimmed.strip_suffix('m') {
        (value, 60_000)
    } else {
        bail!(
            "invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 10s)"
        );
    };

    let amount: u64 = digits
        .trim()
        .parse()
        .with_context(|| format!("invalid duration {raw:?}"))?;
    let millis = amount
        .checked_mul(unit_millis)
        .ok_or_else(|| anyhow!("duration {raw:?} is too large"))?;
    if millis == 0 {
        bail!("duration {raw:?} must be positive");
    }
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::{CONFIG_PATH_ENV, Config, parse_duration};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert!(config.countries_enabled());
        assert_eq!(
            config.countries_endpoint(),
            "https://restcountries.com/v3.1/all?fields=name"
        );
        assert_eq!(config.countries_timeout()?, Duration::from_secs(10));
        assert_eq!(config.log_level(), "info");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[countries]\nenabled = false\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[countries] and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[countries]\nenabled = false\nendpoint = \"http://localhost:8080/all\"\ntimeout = \"750ms\"\n[log]\nlevel = \"DEBUG\"\nfile = \"/var/tmp/userinfo.log\"\n",
        )?;

        let config = Config::load(&path)?;
        assert!(!config.countries_enabled());
        assert_eq!(config.countries_endpoint(), "http://localhost:8080/all");
        assert_eq!(config.countries_timeout()?, Duration::from_millis(750));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_file()?, PathBuf::from("/var/tmp/userinfo.log"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[countries]\nendpont = \"x\"\n")?;
        let error = Config::load(&path).expect_err("typo should fail");
        assert!(format!("{error:#}").contains("endpont"));
        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() -> Result<()> {
        for (content, needle) in [
            (
                "version = 1\n[countries]\ntimeout = \"0s\"\n",
                "countries.timeout",
            ),
            (
                "version = 1\n[countries]\ntimeout = \"soon\"\n",
                "countries.timeout",
            ),
            ("version = 1\n[countries]\nendpoint = \"  \"\n", "countries.endpoint"),
            ("version = 1\n[log]\nlevel = \"loud\"\n", "log.level"),
            ("version = 1\n[log]\nfile = \"\"\n", "log.file"),
        ] {
            let (_temp, path) = write_config(content)?;
            let error = Config::load(&path).expect_err("invalid value should fail");
            assert!(
                error.to_string().contains(needle),
                "{content:?} -> {error:#}"
            );
        }
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(CONFIG_PATH_ENV, &override_path);
        }
        let resolved = Config::default_path();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        assert_eq!(resolved?, override_path);
        Ok(())
    }

    #[test]
    fn default_path_lives_under_app_dir_without_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("userinfo/config.toml"), "got {}", path.display());
        Ok(())
    }

    #[test]
    fn default_log_file_lives_under_data_dir() -> Result<()> {
        let path = Config::default().log_file()?;
        assert!(path.ends_with("userinfo/userinfo.log"), "got {}", path.display());
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_loader() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, Config::example_config(&path))?;

        let config = Config::load(&path)?;
        assert!(config.countries_enabled());
        assert_eq!(config.log_level(), "info");
        Ok(())
    }

    #[test]
    fn parse_duration_units() -> Result<()> {
        assert_eq!(parse_duration("250ms")?, Duration::from_millis(250));
        assert_eq!(parse_duration("10s")?, Duration::from_secs(10));
        assert_eq!(parse_duration(" 2m ")?, Duration::from_secs(120));
        for bad in ["", "10", "s", "-1s", "0ms", "1h"] {
            assert!(parse_duration(bad).is_err(), "{bad:?} should fail");
        }
        Ok(())
    }
}
