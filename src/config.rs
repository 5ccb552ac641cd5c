//! System configuration parameters
//!
//! Everything here is fixed at build time.  [`MonitorConfig::default()`] is
//! assembled from the constants below and [`crate::pins`]; there is no
//! runtime override.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins::{self, PinId};

/// How long the buzzer sounds for one alarm episode.
pub const ALARM_DURATION_MS: u32 = 3000;

/// Capacity of the status buffer, terminator included.
pub const STATUS_CAPACITY: usize = 128;

/// Main-loop sleep between event queue drains.
pub const EVENT_LOOP_INTERVAL_MS: u32 = 10;

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Pins ---
    /// Motion sensor input
    pub sensor_gpio: PinId,
    /// Buzzer output
    pub buzzer_gpio: PinId,
    /// Arm/disarm button input
    pub button_gpio: PinId,

    // --- Timing ---
    /// Alarm episode length (milliseconds)
    pub alarm_duration_ms: u32,
    /// Event loop poll interval (milliseconds)
    pub event_loop_interval_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sensor_gpio: pins::MOTION_SENSOR_GPIO,
            buzzer_gpio: pins::BUZZER_GPIO,
            button_gpio: pins::BUTTON_GPIO,

            alarm_duration_ms: ALARM_DURATION_MS,
            event_loop_interval_ms: EVENT_LOOP_INTERVAL_MS,
        }
    }
}

impl MonitorConfig {
    /// Reject configurations the monitor cannot run with.
    pub fn validate(&self) -> Result<()> {
        let pins = [self.sensor_gpio, self.buzzer_gpio, self.button_gpio];
        if pins.iter().any(|&p| !(0..pins::GPIO_COUNT).contains(&p)) {
            return Err(Error::Config("pin number out of range"));
        }
        if self.sensor_gpio == self.buzzer_gpio
            || self.sensor_gpio == self.button_gpio
            || self.buzzer_gpio == self.button_gpio
        {
            return Err(Error::Config("sensor, buzzer and button must use distinct pins"));
        }
        if self.alarm_duration_ms == 0 {
            return Err(Error::Config("alarm duration must be non-zero"));
        }
        if self.event_loop_interval_ms >= self.alarm_duration_ms {
            return Err(Error::Config("event loop interval must be shorter than the alarm"));
        }
        Ok(())
    }
}
