//! Application service: the hexagonal core.
//!
//! [`SecurityMonitor`] owns the mode and alarm controllers, the status read
//! channel, and the hardware lease.  It is the single consumer of the event
//! queue: interrupt and timer context only enqueue, the main loop calls
//! [`handle_event`](SecurityMonitor::handle_event).  All I/O flows through
//! port traits injected at call sites, making the whole service testable
//! with mock adapters.
//!
//! ```text
//!   GpioPort ◀──▶ ┌────────────────────────────┐
//!                 │      SecurityMonitor       │
//! TimerPort ◀──── │  Mode · Alarm · ReadChannel│ ◀── Event queue
//!                 └────────────────────────────┘
//! ```

use log::{info, warn};

use super::alarm::AlarmController;
use super::lifecycle::HardwareLease;
use super::mode::{Mode, ModeController};
use super::ports::{GpioPort, InterruptPort, PinState, TimerPort};
use super::read_channel::{ReadChannel, ReadTarget};
use super::status::StatusReporter;
use crate::config::MonitorConfig;
use crate::error::{ReadError, Result};
use crate::events::Event;

// ───────────────────────────────────────────────────────────────
// SecurityMonitor
// ───────────────────────────────────────────────────────────────

/// The monitor orchestrates all domain logic.
#[must_use = "a running monitor must be stopped with `shutdown`"]
pub struct SecurityMonitor {
    config: MonitorConfig,
    mode: ModeController,
    alarm: AlarmController,
    channel: ReadChannel,
    lease: HardwareLease,
}

impl SecurityMonitor {
    // ── Lifecycle ─────────────────────────────────────────────

    /// Validate the config, claim hardware, and start Armed with the buzzer
    /// off.  Any failure aborts startup with nothing left acquired.
    pub fn start(
        config: MonitorConfig,
        gpio: &mut impl GpioPort,
        irq: &mut impl InterruptPort,
    ) -> Result<Self> {
        config.validate()?;
        let lease = HardwareLease::acquire(&config, gpio, irq)?;

        let monitor = Self {
            mode: ModeController::new(),
            alarm: AlarmController::new(config.buzzer_gpio, config.alarm_duration_ms),
            channel: ReadChannel::new(StatusReporter::new(config.sensor_gpio, config.buzzer_gpio)),
            lease,
            config,
        };
        info!("SecurityMonitor started ({:?})", monitor.mode());
        Ok(monitor)
    }

    /// Stop: cancel a pending alarm timer, silence the buzzer, then release
    /// interrupts and pins.
    pub fn shutdown(
        self,
        gpio: &mut impl GpioPort,
        irq: &mut impl InterruptPort,
        timer: &mut impl TimerPort,
    ) {
        if self.alarm.cancel(timer) {
            info!("shutdown: pending alarm timer cancelled");
        }
        gpio.write(self.config.buzzer_gpio, PinState::Low);
        self.lease.release(gpio, irq);
        info!("SecurityMonitor stopped");
    }

    // ── Event dispatch ────────────────────────────────────────

    /// Apply one queued event.  `StatusRequested` is served by the console
    /// adapter, which calls [`read_status`](Self::read_status) itself.
    pub fn handle_event(
        &self,
        event: Event,
        gpio: &mut impl GpioPort,
        timer: &mut impl TimerPort,
    ) {
        match event {
            Event::MotionDetected => {
                self.on_sensor_trigger(gpio, timer);
            }
            Event::ButtonPressed => {
                self.toggle_mode();
            }
            Event::AlarmTimeout => self.on_timer_fire(gpio),
            Event::StatusRequested => {}
        }
    }

    /// Button: flip armed/disarmed.
    pub fn toggle_mode(&self) -> Mode {
        let mode = self.mode.toggle();
        info!("Button: mode → {:?}", mode);
        mode
    }

    /// Motion sensor edge.  Returns `true` if an alarm episode started.
    pub fn on_sensor_trigger(&self, gpio: &mut impl GpioPort, timer: &mut impl TimerPort) -> bool {
        self.alarm.on_sensor_trigger(&self.mode, gpio, timer)
    }

    /// Alarm timer expiry.
    pub fn on_timer_fire(&self, gpio: &mut impl GpioPort) {
        if !self.alarm.is_active() {
            warn!("alarm timer fired with no episode running");
        }
        self.alarm.on_timer_fire(gpio);
    }

    // ── Status ────────────────────────────────────────────────

    /// Re-render and return the status text.
    pub fn render(&mut self, gpio: &mut impl GpioPort) -> &str {
        self.channel.render(&self.mode, gpio)
    }

    /// One call of the offset-based read protocol.
    pub fn read_status<T: ReadTarget + ?Sized>(
        &mut self,
        gpio: &mut impl GpioPort,
        target: &mut T,
        count: usize,
        offset: &mut u64,
    ) -> Result<usize> {
        Ok(self.channel.read(&self.mode, gpio, target, count, offset)?)
    }

    /// The status channel is read-only; always fails.
    pub fn write_status(&mut self, data: &[u8]) -> core::result::Result<usize, ReadError> {
        self.channel.write(data)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    /// Whether an alarm episode is in progress.
    pub fn alarm_active(&self) -> bool {
        self.alarm.is_active()
    }
}
