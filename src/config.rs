//! Panel configuration.
//!
//! Built in three layers, each overriding the previous one:
//!
//! 1. defaults ([`PanelConfig::default`])
//! 2. environment ([`PanelConfig::from_env`])
//! 3. command-line flags ([`PanelConfig::apply_cli`])

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliOverrides;
use crate::error::ConfigError;
use crate::i18n::Locale;
use crate::poller::REFRESH_INTERVAL;

pub const ENV_ADAPTER_URL: &str = "RTCDBG_ADAPTER_URL";
pub const ENV_REFRESH_MS: &str = "RTCDBG_REFRESH_MS";
pub const ENV_LOCALE: &str = "RTCDBG_LOCALE";

/// Where adapter data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterSource {
    /// The built-in synthetic call
    Simulated,
    /// An HTTP bridge at this base URL
    Bridge(String),
}

/// Runtime configuration.
///
/// ```
/// use rtc_debug_panel::config::{AdapterSource, PanelConfig};
/// use std::time::Duration;
///
/// let config = PanelConfig::new()
///     .with_adapter(AdapterSource::Bridge("http://localhost:4000".into()))
///     .with_refresh(Duration::from_millis(250));
/// assert_eq!(config.refresh, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub adapter: AdapterSource,
    /// Poll period (default 500ms)
    pub refresh: Duration,
    pub locale: Locale,
    /// Print one snapshot and exit instead of running the TUI
    pub once: bool,
    /// Log file; `None` discards logs
    pub log_file: Option<PathBuf>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            adapter: AdapterSource::Simulated,
            refresh: REFRESH_INTERVAL,
            locale: Locale::default(),
            once: false,
            log_file: default_log_file(),
        }
    }
}

/// `<cache dir>/rtcdbg/rtcdbg.log`
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("rtcdbg").join("rtcdbg.log"))
}

fn parse_refresh_ms(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

impl PanelConfig {
    /// Defaults: simulated session, 500 ms, English.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the adapter source.
    pub fn with_adapter(mut self, adapter: AdapterSource) -> Self {
        self.adapter = adapter;
        self
    }

    /// Set the poll period.
    pub fn with_refresh(mut self, refresh: Duration) -> Self {
        self.refresh = refresh;
        self
    }

    /// Set the startup locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Print one snapshot and exit instead of running the TUI.
    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Log destination; `None` discards logs.
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Overlay variables read through `lookup`. Empty values are ignored.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_ADAPTER_URL) {
            self.adapter = AdapterSource::Bridge(url.trim().to_string());
        }
        if let Some(raw) = get(ENV_REFRESH_MS) {
            self.refresh = parse_refresh_ms(ENV_REFRESH_MS, &raw)?;
        }
        if let Some(raw) = get(ENV_LOCALE) {
            self.locale = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_LOCALE.to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }

    /// Overlay command-line flags. `--demo` wins over any bridge URL.
    pub fn apply_cli(mut self, cli: &CliOverrides) -> Self {
        if let Some(url) = &cli.adapter_url {
            self.adapter = AdapterSource::Bridge(url.clone());
        }
        if cli.demo {
            self.adapter = AdapterSource::Simulated;
        }
        if let Some(ms) = cli.refresh_ms {
            self.refresh = Duration::from_millis(ms);
        }
        if let Some(locale) = cli.locale {
            self.locale = locale;
        }
        self.once |= cli.once;
        self
    }
}
