//! Shell configuration shared by the site builder and the browser bindings.
//!
//! The builder embeds this as JSON in every page; the bindings read it back
//! on mount, so both sides agree on breakpoints and the storage key.

use serde::{Deserialize, Serialize};

use crate::scroll::{RESTORE_SETTLE_DELAY, SCROLL_STORAGE_KEY};
use crate::viewport::Breakpoint;

/// Tunables for the navigation shell (`[shell]` in moonui.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Side panel breakpoint in CSS pixels
    #[serde(default = "default_breakpoint")]
    pub breakpoint: f64,

    /// Header breakpoint below which the top-bar menu trigger shows
    #[serde(default = "default_menu_breakpoint")]
    pub menu_breakpoint: f64,

    /// Session storage key for the panel scroll offset
    #[serde(default = "default_scroll_key")]
    pub scroll_key: String,

    /// Settle delay before restoring the panel scroll offset
    #[serde(default = "default_restore_delay_ms")]
    pub restore_delay_ms: u32,
}

fn default_breakpoint() -> f64 {
    Breakpoint::PANEL.px()
}
fn default_menu_breakpoint() -> f64 {
    Breakpoint::MENU.px()
}
fn default_scroll_key() -> String {
    SCROLL_STORAGE_KEY.to_string()
}
fn default_restore_delay_ms() -> u32 {
    RESTORE_SETTLE_DELAY.as_millis() as u32
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            breakpoint: default_breakpoint(),
            menu_breakpoint: default_menu_breakpoint(),
            scroll_key: default_scroll_key(),
            restore_delay_ms: default_restore_delay_ms(),
        }
    }
}

/// Errors from invalid shell configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Breakpoint `{name}` must be a positive width, got {value}")]
    InvalidBreakpoint { name: &'static str, value: f64 },

    #[error("Scroll storage key must not be empty")]
    EmptyScrollKey,

    #[error("Invalid shell config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShellConfig {
    pub fn panel_breakpoint(&self) -> Breakpoint {
        Breakpoint::new(self.breakpoint)
    }

    pub fn menu_breakpoint(&self) -> Breakpoint {
        Breakpoint::new(self.menu_breakpoint)
    }

    /// Check that the values can drive a working shell.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("breakpoint", self.breakpoint),
            ("menu_breakpoint", self.menu_breakpoint),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidBreakpoint { name, value });
            }
        }

        if self.scroll_key.trim().is_empty() {
            return Err(ConfigError::EmptyScrollKey);
        }

        Ok(())
    }

    /// Serialize for embedding in a page.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate an embedded config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_breakpoints() {
        let config = ShellConfig::default();

        assert_eq!(config.breakpoint, 1024.0);
        assert_eq!(config.menu_breakpoint, 768.0);
        assert_eq!(config.scroll_key, "sidebar-scroll-position");
        assert_eq!(config.restore_delay_ms, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = ShellConfig::from_json(r#"{"breakpoint": 900}"#).unwrap();

        assert_eq!(config.breakpoint, 900.0);
        assert_eq!(config.menu_breakpoint, 768.0);
    }

    #[test]
    fn rejects_bad_values() {
        let config = ShellConfig {
            breakpoint: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBreakpoint { name: "breakpoint", .. })
        ));

        let config = ShellConfig {
            scroll_key: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyScrollKey)));

        assert!(matches!(
            ShellConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
