//! Alarm episodes.
//!
//! One sensor trigger while armed produces exactly one fixed-length buzzer
//! burst.  Triggers that arrive while a burst is sounding are coalesced: they
//! neither extend nor restart the timer.
//!
//! ```text
//!            trigger && armed            timer fired
//!   Idle ─────────────────────▶ Sounding ───────────▶ Idle
//!     ▲                            │
//!     └──── schedule refused ──────┘
//! ```
//!
//! `active` is claimed with a compare-and-swap before any pin or timer call,
//! so two racing triggers can never both start an episode.

use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use super::mode::ModeController;
use super::ports::{GpioPort, PinState, TimerPort};
use crate::pins::PinId;

/// Owns the "alarm sounding" flag and the buzzer output.
pub struct AlarmController {
    buzzer_gpio: PinId,
    duration_ms: u32,
    active: AtomicBool,
}

impl AlarmController {
    pub const fn new(buzzer_gpio: PinId, duration_ms: u32) -> Self {
        Self {
            buzzer_gpio,
            duration_ms,
            active: AtomicBool::new(false),
        }
    }

    /// Handle one falling edge from the motion sensor.
    /// Returns `true` if this edge started a new episode.
    pub fn on_sensor_trigger(
        &self,
        mode: &ModeController,
        gpio: &mut impl GpioPort,
        timer: &mut impl TimerPort,
    ) -> bool {
        if !mode.mode().is_armed() {
            debug!("alarm: motion ignored (disarmed)");
            return false;
        }
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("alarm: motion coalesced into running episode");
            return false;
        }

        gpio.write(self.buzzer_gpio, PinState::High);
        if let Err(e) = timer.schedule(self.duration_ms) {
            // Without a pending timer nothing would ever silence the buzzer.
            gpio.write(self.buzzer_gpio, PinState::Low);
            self.active.store(false, Ordering::Release);
            warn!("alarm: timer schedule failed ({}), episode dropped", e);
            return false;
        }

        info!("alarm: motion detected, buzzer on for {} ms", self.duration_ms);
        true
    }

    /// Handle expiry of the episode timer.  Unconditional: silences the
    /// buzzer whatever the mode is now.
    pub fn on_timer_fire(&self, gpio: &mut impl GpioPort) {
        gpio.write(self.buzzer_gpio, PinState::Low);
        self.active.store(false, Ordering::Release);
        info!("alarm: episode over, buzzer off");
    }

    /// Teardown: stop a pending timer without running the expiry path.
    /// Returns `true` if a timer was pending.
    pub fn cancel(&self, timer: &mut impl TimerPort) -> bool {
        timer.cancel()
    }

    /// Whether an episode is in progress.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}
