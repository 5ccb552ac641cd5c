//! Arm / disarm mode.

use core::sync::atomic::{AtomicU8, Ordering};

/// Operating mode.  Armed watches the motion sensor; Disarmed ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Armed = 0,
    Disarmed = 1,
}

impl Mode {
    fn from_raw(raw: u8) -> Self {
        if raw & 1 == 0 { Self::Armed } else { Self::Disarmed }
    }

    pub fn is_armed(self) -> bool {
        self == Self::Armed
    }
}

/// Owns the mode flag.  Toggled by the button, read by everyone else.
///
/// Lock-free and allocation-free, so it is usable from interrupt context.
pub struct ModeController {
    mode: AtomicU8,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeController {
    /// Starts Armed.
    pub const fn new() -> Self {
        Self {
            mode: AtomicU8::new(Mode::Armed as u8),
        }
    }

    /// Flip Armed ↔ Disarmed and return the new mode.
    pub fn toggle(&self) -> Mode {
        let previous = self.mode.fetch_xor(1, Ordering::AcqRel);
        Mode::from_raw(previous ^ 1)
    }

    pub fn mode(&self) -> Mode {
        Mode::from_raw(self.mode.load(Ordering::Acquire))
    }
}
