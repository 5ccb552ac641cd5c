//! Status text rendering.
//!
//! The status is a fixed three-line report:
//!
//! ```text
//! Security System ON \n
//! ALARM Status: off\n
//! Sensor Status: on \n
//! ```
//!
//! The trailing spaces on lines 1 and 3 are part of the format that
//! existing clients match on.  Lines 2 and 3 are sampled live from the
//! buzzer and sensor pins, not from the alarm flag.

use core::fmt::{self, Write};

use super::mode::{Mode, ModeController};
use super::ports::{GpioPort, PinState};
use crate::config::STATUS_CAPACITY;
use crate::pins::PinId;

/// Fixed-capacity text buffer with an explicit length.
///
/// Holds at most `STATUS_CAPACITY - 1` bytes of text; the remaining byte is
/// the terminator slot that clients of the read channel expect.  Bytes past
/// `len` are always zero.  Writes past capacity are silently truncated at a
/// char boundary.
pub struct StatusBuffer {
    bytes: [u8; STATUS_CAPACITY],
    len: usize,
}

impl Default for StatusBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBuffer {
    /// Longest text the buffer will hold.
    pub const MAX_TEXT: usize = STATUS_CAPACITY - 1;

    pub const fn new() -> Self {
        Self {
            bytes: [0; STATUS_CAPACITY],
            len: 0,
        }
    }

    pub fn clear(&mut self) {
        self.bytes[..self.len].fill(0);
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The rendered text.
    pub fn as_str(&self) -> &str {
        // Only whole `&str`s (cut at char boundaries) are ever copied in.
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    /// The whole zero-padded backing array.
    pub fn padded(&self) -> &[u8; STATUS_CAPACITY] {
        &self.bytes
    }
}

impl Write for StatusBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = Self::MAX_TEXT - self.len;
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.bytes[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

fn on_off(level: PinState) -> &'static str {
    match level {
        PinState::High => "on",
        PinState::Low => "off",
    }
}

/// Renders the status report into its owned [`StatusBuffer`].
pub struct StatusReporter {
    sensor_gpio: PinId,
    buzzer_gpio: PinId,
    buffer: StatusBuffer,
}

impl StatusReporter {
    pub const fn new(sensor_gpio: PinId, buzzer_gpio: PinId) -> Self {
        Self {
            sensor_gpio,
            buzzer_gpio,
            buffer: StatusBuffer::new(),
        }
    }

    /// Rebuild the report from the current mode and live pin levels.
    pub fn render(&mut self, mode: &ModeController, gpio: &mut impl GpioPort) -> &StatusBuffer {
        let label = match mode.mode() {
            Mode::Armed => "Security System ON",
            Mode::Disarmed => "Security System OFF",
        };
        let alarm = on_off(gpio.read(self.buzzer_gpio));
        let sensor = on_off(gpio.read(self.sensor_gpio));

        self.buffer.clear();
        // StatusBuffer::write_str never fails; it truncates.
        let _ = write!(
            self.buffer,
            "{label} \nALARM Status: {alarm}\nSensor Status: {sensor} \n"
        );
        &self.buffer
    }

    /// The most recent render.
    pub fn last(&self) -> &StatusBuffer {
        &self.buffer
    }
}
