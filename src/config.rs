//! Node configuration parameters
//!
//! All tunable timing and policy parameters for the monitoring node.
//! Defaults reproduce the field firmware; a JSON override can be baked in
//! at build time through `ENVNODE_CONFIG`.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// How the frame builder treats the light value between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightRetention {
    /// Keep the last light reading until a newer one arrives, the same way
    /// temperature and humidity are kept.
    LastKnown,
    /// Use the light field of the most recently received sample. A
    /// climate-only sample leaves the frame without a light value.
    LastMessage,
}

/// Core node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    // --- Producers ---
    /// Climate (temperature/humidity) sampling period (milliseconds)
    pub climate_interval_ms: u32,
    /// Light sampling period (milliseconds)
    pub light_interval_ms: u32,
    /// RTC sampling period (milliseconds)
    pub clock_interval_ms: u32,

    // --- Reporter / alarm ---
    /// Per-queue receive timeout of the reporter loop (milliseconds)
    pub report_rx_timeout_ms: u32,
    /// Raw light level above which the alarm is raised
    pub light_alarm_threshold: u16,
    /// Alarm temperature threshold (Celsius, exclusive)
    pub alarm_temperature_c: f32,
    /// Alarm humidity threshold (percent, exclusive)
    pub alarm_humidity_pct: f32,
    /// How long the indicator stays lit per alarm (milliseconds)
    pub alarm_hold_ms: u32,

    // --- Frames ---
    /// Per-queue receive timeout of the frame builder (milliseconds)
    pub frame_rx_timeout_ms: u32,
    /// Pause after every frame builder cycle (milliseconds)
    pub frame_period_ms: u32,
    /// Pause after every printed frame (milliseconds)
    pub frame_report_period_ms: u32,
    /// Light handling policy of the frame builder
    pub light_retention: LightRetention,

    // --- Press counter ---
    /// Press counter print period (milliseconds)
    pub press_report_interval_ms: u32,

    // --- Power cycling ---
    /// Period of the supervisor liveness message (milliseconds)
    pub liveness_interval_ms: u32,
    /// Liveness intervals spent awake before deep sleep
    pub awake_intervals: u32,
    /// Deep sleep duration before the timer wake (seconds)
    pub sleep_secs: u32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            // Producers
            climate_interval_ms: 2000,
            light_interval_ms: 1000,
            clock_interval_ms: 1000,

            // Reporter / alarm
            report_rx_timeout_ms: 100,
            light_alarm_threshold: 500, // 5000 on the high-ambient variant
            alarm_temperature_c: 24.0,
            alarm_humidity_pct: 70.0,
            alarm_hold_ms: 500,

            // Frames
            frame_rx_timeout_ms: 1000,
            frame_period_ms: 5000,
            frame_report_period_ms: 5000,
            light_retention: LightRetention::LastKnown,

            // Press counter
            press_report_interval_ms: 1000,

            // Power cycling
            liveness_interval_ms: 10_000,
            awake_intervals: 1,
            sleep_secs: 30,
        }
    }
}

/// Largest light threshold accepted: a 12-bit ADC tops out at 4095, the
/// high-ambient variant deliberately sits above that at 5000.
const MAX_LIGHT_THRESHOLD: u16 = 10_000;

impl NodeConfig {
    /// Parse a JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Resolve the effective config from an optional JSON override.
    /// A missing or invalid override falls back to the defaults.
    pub fn from_override(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(cfg) => {
                log::info!("Config: override applied");
                cfg
            }
            Err(e) => {
                log::warn!("Config: override rejected ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Range-check every field. Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            (self.climate_interval_ms, "climate_interval_ms must be > 0"),
            (self.light_interval_ms, "light_interval_ms must be > 0"),
            (self.clock_interval_ms, "clock_interval_ms must be > 0"),
            (self.report_rx_timeout_ms, "report_rx_timeout_ms must be > 0"),
            (self.frame_rx_timeout_ms, "frame_rx_timeout_ms must be > 0"),
            (self.frame_period_ms, "frame_period_ms must be > 0"),
            (self.frame_report_period_ms, "frame_report_period_ms must be > 0"),
            (self.press_report_interval_ms, "press_report_interval_ms must be > 0"),
            (self.liveness_interval_ms, "liveness_interval_ms must be > 0"),
        ];
        for (value, msg) in periods {
            if value == 0 {
                return Err(ConfigError::ValidationFailed(msg));
            }
        }
        if self.alarm_hold_ms == 0 {
            return Err(ConfigError::ValidationFailed("alarm_hold_ms must be > 0"));
        }
        if self.light_alarm_threshold > MAX_LIGHT_THRESHOLD {
            return Err(ConfigError::ValidationFailed(
                "light_alarm_threshold must be 0–10000",
            ));
        }
        if !self.alarm_temperature_c.is_finite() || !self.alarm_humidity_pct.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "alarm thresholds must be finite",
            ));
        }
        if !(0.0..=100.0).contains(&self.alarm_humidity_pct) {
            return Err(ConfigError::ValidationFailed(
                "alarm_humidity_pct must be 0–100",
            ));
        }
        if self.awake_intervals == 0 {
            return Err(ConfigError::ValidationFailed("awake_intervals must be > 0"));
        }
        if self.sleep_secs == 0 {
            return Err(ConfigError::ValidationFailed("sleep_secs must be > 0"));
        }
        Ok(())
    }

    pub fn sleep_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.sleep_secs))
    }
}

/// Milliseconds to [`Duration`], used by every task loop.
pub fn ms(value: u32) -> Duration {
    Duration::from_millis(u64::from(value))
}
