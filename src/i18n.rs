//! Translated panel labels.
//!
//! Only the labels that are not raw adapter data are translated: buttons and
//! a few section titles. Changing the locale notifies subscribers so views
//! re-render with the new text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use crate::error::ConfigError;
use crate::store::{Notifier, Subscription};

pub const RESTART_ICE_BUTTON: &str = "rtcDebugPanel.restartIceButton";
pub const CONNECT_SIGNALING_BUTTON: &str = "rtcDebugPanel.connectSignalingButton";
pub const DISCONNECT_SIGNALING_BUTTON: &str = "rtcDebugPanel.disconnectSignalingButton";
pub const HELP_FOOTER: &str = "rtcDebugPanel.helpFooter";
pub const PAUSED_BADGE: &str = "rtcDebugPanel.paused";
pub const WAITING_FOR_DATA: &str = "rtcDebugPanel.waitingForData";
pub const LOCAL_SECTION: &str = "rtcDebugPanel.local";
pub const LOG_SECTION: &str = "rtcDebugPanel.log";
pub const REMOTE_SECTION: &str = "rtcDebugPanel.remote";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Es];

    /// Short language code (`en`, `es`).
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// The next locale in [`Locale::ALL`], wrapping around.
    pub fn next(&self) -> Locale {
        let idx = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Translate a message id. Unknown ids come back unchanged.
    pub fn message<'a>(&self, id: &'a str) -> &'a str {
        let translated = match (self, id) {
            (Locale::En, RESTART_ICE_BUTTON) => "Restart ICE",
            (Locale::En, CONNECT_SIGNALING_BUTTON) => "Connect",
            (Locale::En, DISCONNECT_SIGNALING_BUTTON) => "Disconnect",
            (Locale::En, HELP_FOOTER) => {
                "↑/↓ move  Tab column  Enter toggle/press  ? docs  l language  p pause  q quit"
            }
            (Locale::En, PAUSED_BADGE) => "PAUSED",
            (Locale::En, WAITING_FOR_DATA) => "Waiting for data...",
            (Locale::En, LOCAL_SECTION) => "Local",
            (Locale::En, LOG_SECTION) => "Log",
            (Locale::En, REMOTE_SECTION) => "Remote",
            (Locale::Es, RESTART_ICE_BUTTON) => "Reiniciar ICE",
            (Locale::Es, CONNECT_SIGNALING_BUTTON) => "Conectar",
            (Locale::Es, DISCONNECT_SIGNALING_BUTTON) => "Desconectar",
            (Locale::Es, HELP_FOOTER) => {
                "↑/↓ mover  Tab columna  Enter abrir/pulsar  ? docs  l idioma  p pausa  q salir"
            }
            (Locale::Es, PAUSED_BADGE) => "EN PAUSA",
            (Locale::Es, WAITING_FOR_DATA) => "Esperando datos...",
            (Locale::Es, LOCAL_SECTION) => "Local",
            (Locale::Es, LOG_SECTION) => "Registro",
            (Locale::Es, REMOTE_SECTION) => "Remoto",
            _ => return id,
        };
        translated
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            "es" | "es-es" | "es_es" => Ok(Locale::Es),
            other => Err(ConfigError::InvalidValue {
                key: "locale".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Fired when the active locale changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleChanged(pub Locale);

/// Current locale plus change notifications. Clones share state.
#[derive(Clone, Default)]
pub struct Localizer {
    current: Arc<RwLock<Locale>>,
    notifier: Notifier<LocaleChanged>,
}

impl Localizer {
    pub fn new(locale: Locale) -> Self {
        Self {
            current: Arc::new(RwLock::new(locale)),
            notifier: Notifier::new(),
        }
    }

    /// Active locale.
    pub fn locale(&self) -> Locale {
        self.current.read().map(|l| *l).unwrap_or_default()
    }

    /// Switch locale; notifies only on an actual change.
    pub fn set_locale(&self, locale: Locale) {
        let changed = match self.current.write() {
            Ok(mut current) if *current != locale => {
                *current = locale;
                true
            }
            _ => false,
        };
        if changed {
            tracing::debug!(locale = %locale, "locale changed");
            self.notifier.notify(&LocaleChanged(locale));
        }
    }

    /// Switch to the next locale and return it.
    pub fn cycle(&self) -> Locale {
        let next = self.locale().next();
        self.set_locale(next);
        next
    }

    /// Translate `id` in the active locale.
    pub fn t<'a>(&self, id: &'a str) -> &'a str {
        self.locale().message(id)
    }

    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&LocaleChanged) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_known_and_unknown_ids() {
        assert_eq!(Locale::En.message(RESTART_ICE_BUTTON), "Restart ICE");
        assert_eq!(Locale::Es.message(RESTART_ICE_BUTTON), "Reiniciar ICE");
        assert_eq!(Locale::Es.message("some.unknown.id"), "some.unknown.id");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("ES".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_change_notifies_once() {
        let localizer = Localizer::new(Locale::En);
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let _sub = localizer.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        localizer.set_locale(Locale::En);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        assert_eq!(localizer.cycle(), Locale::Es);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(localizer.t(CONNECT_SIGNALING_BUTTON), "Conectar");
    }
}
