//! Kiosk configuration supplied by the shell at start-up.
//!
//! The defaults reproduce the values the kiosk shipped with, so a shell that
//! passes `KioskConfig::default()` behaves exactly like the hard-wired build.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capabilities::{HttpError, ValidatedUrl};

pub const DEFAULT_BASE_URL: &str = "https://studio--studio-6864668644-fa8e7.us-central1.hosted.app/";
pub const DEFAULT_MACHINE_ID: &str = "vm-001";
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 15_000;

pub const DEFAULT_SCROLL_STEP_PX: f32 = 1.5;
pub const DEFAULT_SCROLL_TICK_MS: u64 = 16;
pub const DEFAULT_PAUSED_POLL_MS: u64 = 100;
pub const DEFAULT_CARD_WIDTH_PX: f32 = 349.0;
pub const DEFAULT_VISIBLE_CELLS: usize = 4;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] HttpError),

    #[error("machine id {id:?} is not usable: {reason}")]
    MachineId { id: String, reason: &'static str },

    #[error("idle timeout must be greater than zero")]
    ZeroIdleTimeout,

    #[error("scroll setting `{field}` is out of range: {value}")]
    Scroll { field: &'static str, value: String },

    #[error("malformed configuration: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub step_px: f32,
    pub speed_factor: f32,
    pub tick_ms: u64,
    pub paused_poll_ms: u64,
    pub card_width_px: f32,
    pub visible_cells: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            step_px: DEFAULT_SCROLL_STEP_PX,
            speed_factor: 1.0,
            tick_ms: DEFAULT_SCROLL_TICK_MS,
            paused_poll_ms: DEFAULT_PAUSED_POLL_MS,
            card_width_px: DEFAULT_CARD_WIDTH_PX,
            visible_cells: DEFAULT_VISIBLE_CELLS,
        }
    }
}

impl ScrollConfig {
    /// Pixels advanced on every scrolling tick.
    #[must_use]
    pub fn pixels_per_tick(&self) -> f32 {
        self.step_px * self.speed_factor
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = |field: &'static str, value: f32| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Scroll { field, value: value.to_string() })
            }
        };
        non_negative("step_px", self.step_px)?;
        non_negative("speed_factor", self.speed_factor)?;

        if !(self.card_width_px.is_finite() && self.card_width_px > 0.0) {
            return Err(ConfigError::Scroll {
                field: "card_width_px",
                value: self.card_width_px.to_string(),
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Scroll { field: "tick_ms", value: "0".into() });
        }
        if self.paused_poll_ms == 0 {
            return Err(ConfigError::Scroll { field: "paused_poll_ms", value: "0".into() });
        }
        if self.visible_cells == 0 {
            return Err(ConfigError::Scroll { field: "visible_cells", value: "0".into() });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    pub base_url: String,
    pub machine_id: String,
    pub idle_timeout_ms: u64,
    pub scroll: ScrollConfig,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            machine_id: DEFAULT_MACHINE_ID.to_string(),
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            scroll: ScrollConfig::default(),
        }
    }
}

impl KioskConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ValidatedUrl::new(self.base_url.as_str())?;

        let id = self.machine_id.as_str();
        if id.trim().is_empty() {
            return Err(ConfigError::MachineId { id: id.to_string(), reason: "empty" });
        }
        if id.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#')) {
            return Err(ConfigError::MachineId {
                id: id.to_string(),
                reason: "contains a reserved URL character",
            });
        }

        if self.idle_timeout_ms == 0 {
            return Err(ConfigError::ZeroIdleTimeout);
        }

        self.scroll.validate()
    }

    /// `GET {base_url}/api/machines/{machine_id}`
    pub fn machine_endpoint(&self) -> Result<ValidatedUrl, ConfigError> {
        let base = ValidatedUrl::new(self.base_url.as_str())?;
        Ok(base.join_path(&format!("api/machines/{}", self.machine_id))?)
    }
}
