//! Session configuration and RON overrides.
//!
//! Every field has a default matching the ticketing app as currently shipped;
//! an override only needs to name what differs.

use cleaner_core::WatcherTimings;
use cleaner_engine::{CleanerConfig, DomError};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid session config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid session config: {0}")]
    Selector(#[from] DomError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub button_style: String,
    pub notification_style: String,
    /// Time a notification stays fully visible.
    pub notification_ms: u64,
    /// Delay between fading a notification and removing it.
    pub fade_ms: u64,
    /// Script sources whose errors are swallowed.
    pub suppressed_sources: Vec<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            button_style: "background: #ebeff3; border: none; border-radius: 7px; \
                           font-size: 24px; width: 100%; height: 40px; color: inherit; \
                           cursor: pointer; padding: 0; margin: 0; text-align: center; \
                           display: flex; align-items: center; justify-content: center; \
                           gap: 8px;"
                .to_string(),
            notification_style: "position: fixed; bottom: 20px; left: 90px; \
                                 background: #333; color: white; padding: 10px 16px; \
                                 border-radius: 6px; z-index: 999999; opacity: 0; \
                                 transition: opacity 0.3s; font-size: 14px; \
                                 font-weight: 500;"
                .to_string(),
            notification_ms: 1_750,
            fade_ms: 300,
            suppressed_sources: vec!["freshconnect-sidebar-core.js".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cleaner: CleanerConfig,
    pub timings: WatcherTimings,
    pub ui: UiConfig,
}

impl SessionConfig {
    /// Parses a RON override such as `(timings: (debounce_ms: 3000))`.
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.cleaner.validate()?;
        Ok(config)
    }
}
