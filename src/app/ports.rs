//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SecurityMonitor (domain)
//! ```
//!
//! Driven adapters (GPIO, edge interrupts, the one-shot timer) implement
//! these traits.  The [`SecurityMonitor`](super::service::SecurityMonitor)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! Interrupt and timer callbacks do not call back into the domain.  The
//! adapters translate them into [`Event`](crate::events::Event)s on the
//! [`EventQueue`](crate::events::EventQueue); the main loop feeds those to
//! the monitor.

pub use embedded_hal::digital::PinState;

use crate::error::{GpioError, IrqError, TimerError};
use crate::events::Event;
use crate::pins::PinId;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain ↔ pins)
// ───────────────────────────────────────────────────────────────

/// Pin direction requested at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    /// Output whose driven level can still be read back.
    Output,
}

/// Digital pin access.
///
/// Every pin must be [`acquire`](Self::acquire)d before it is configured,
/// read or written, and [`release`](Self::release)d exactly once afterwards.
pub trait GpioPort {
    /// Claim exclusive ownership of `pin`.  `label` names the owner in logs.
    fn acquire(&mut self, pin: PinId, label: &'static str) -> Result<(), GpioError>;

    /// Give `pin` back.  Releasing a pin that is not owned is a no-op.
    fn release(&mut self, pin: PinId);

    /// Configure the pin direction.
    fn set_direction(&mut self, pin: PinId, direction: Direction) -> Result<(), GpioError>;

    /// Sample the live level.  For outputs this is the level being driven.
    fn read(&mut self, pin: PinId) -> PinState;

    /// Drive an output.
    fn write(&mut self, pin: PinId, level: PinState);
}

// ───────────────────────────────────────────────────────────────
// Interrupt port (driven adapter: pin edges → event queue)
// ───────────────────────────────────────────────────────────────

/// What an edge interrupt on a registered pin means to the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSource {
    MotionSensor,
    Button,
}

impl EdgeSource {
    /// Event pushed when this source fires.
    pub const fn event(self) -> Event {
        match self {
            Self::MotionSensor => Event::MotionDetected,
            Self::Button => Event::ButtonPressed,
        }
    }
}

/// Falling-edge interrupt registration.
pub trait InterruptPort {
    /// Attach a falling-edge handler to `pin`.  Each edge pushes
    /// `source.event()` onto the event queue.
    fn register_falling_edge(&mut self, pin: PinId, source: EdgeSource) -> Result<(), IrqError>;

    /// Detach the handler.  No-op when nothing is registered on `pin`.
    fn unregister(&mut self, pin: PinId);
}

// ───────────────────────────────────────────────────────────────
// Timer port (driven adapter: one-shot → event queue)
// ───────────────────────────────────────────────────────────────

/// Single-shot alarm timer.  Expiry pushes
/// [`Event::AlarmTimeout`](crate::events::Event::AlarmTimeout), which the
/// event queue never drops.
pub trait TimerPort {
    /// Arm the one-shot to expire after `delay_ms`.
    fn schedule(&mut self, delay_ms: u32) -> Result<(), TimerError>;

    /// Disarm a pending one-shot so it never expires.
    /// Returns `true` if one was pending.
    fn cancel(&mut self) -> bool;
}
