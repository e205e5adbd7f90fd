// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use fieldops_app::ViewKind;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "fieldops";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT: &str = "10s";
const DEFAULT_REFETCH_INTERVAL: &str = "30s";
const DEFAULT_MAX_ROWS: usize = 50;
const DEFAULT_LOG_FILTER: &str = "warn";

pub const CONFIG_PATH_ENV: &str = "FIELDOPS_CONFIG_PATH";
pub const API_URL_ENV: &str = "FIELDOPS_API_URL";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Api {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
    pub refetch_interval: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ui {
    pub default_view: Option<String>,
    pub max_rows: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Log {
    pub filter: Option<String>,
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
                    "config file {} is not versioned. Add `version = 1` and put values under [api], [ui], and [log]",
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
        for (key, raw) in [
            ("api.timeout", &self.api.timeout),
            ("api.refetch_interval", &self.api.refetch_interval),
        ] {
            if let Some(raw) = raw {
                let parsed = parse_duration(raw)
                    .with_context(|| format!("{key} in {}", path.display()))?;
                if parsed <= Duration::ZERO {
                    bail!(
                        "{key} in {} must be positive, got {}",
                        path.display(),
                        raw
                    );
                }
            }
        }

        if let Some(base_url) = &self.api.base_url
            && base_url.trim().is_empty()
        {
            bail!(
                "api.base_url in {} must not be empty; remove it to use {API_URL_ENV}",
                path.display()
            );
        }

        if let Some(view) = &self.ui.default_view {
            parse_view(view).with_context(|| format!("ui.default_view in {}", path.display()))?;
        }

        if let Some(max_rows) = self.ui.max_rows
            && max_rows <= 0
        {
            bail!(
                "ui.max_rows in {} must be positive, got {}",
                path.display(),
                max_rows
            );
        }

        if let Some(filter) = &self.log.filter {
            EnvFilter::try_new(filter).with_context(|| {
                format!("log.filter {filter:?} in {} is not a valid filter", path.display())
            })?;
        }

        Ok(())
    }

    /// `[api].base_url`, then `FIELDOPS_API_URL`, then the local default.
    pub fn api_base_url(&self) -> String {
        let configured = self
            .api
            .base_url
            .clone()
            .or_else(|| env::var(API_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        configured.trim().trim_end_matches('/').to_owned()
    }

    pub fn api_timeout(&self) -> Result<Duration> {
        parse_duration(self.api.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn refetch_interval(&self) -> Result<Duration> {
        parse_duration(
            self.api
                .refetch_interval
                .as_deref()
                .unwrap_or(DEFAULT_REFETCH_INTERVAL),
        )
    }

    pub fn default_view(&self) -> Result<ViewKind> {
        match &self.ui.default_view {
            Some(view) => parse_view(view),
            None => Ok(ViewKind::Orders),
        }
    }

    pub fn max_rows(&self) -> usize {
        self.ui
            .max_rows
            .and_then(|rows| usize::try_from(rows).ok())
            .unwrap_or(DEFAULT_MAX_ROWS)
    }

    pub fn log_filter(&self) -> &str {
        self.log.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# fieldops config\n# Place this file at: {}\n\nversion = 1\n\n[api]\n# Falls back to ${} when unset.\nbase_url = \"{}\"\ntimeout = \"{}\"\n# How often --watch refetches the view.\nrefetch_interval = \"{}\"\n\n[ui]\n# One of: {}\ndefault_view = \"orders\"\nmax_rows = {}\n\n[log]\n# tracing filter directives; RUST_LOG takes precedence.\nfilter = \"{}\"\n",
            path.display(),
            API_URL_ENV,
            DEFAULT_API_BASE_URL,
            DEFAULT_TIMEOUT,
            DEFAULT_REFETCH_INTERVAL,
            view_names(),
            DEFAULT_MAX_ROWS,
            DEFAULT_LOG_FILTER,
        )
    }
}

pub fn parse_view(raw: &str) -> Result<ViewKind> {
    ViewKind::parse(raw)
        .ok_or_else(|| anyhow!("unknown view {raw:?}; expected one of: {}", view_names()))
}

fn view_names() -> String {
    ViewKind::ALL
        .iter()
        .map(|kind| kind.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn parse_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}
