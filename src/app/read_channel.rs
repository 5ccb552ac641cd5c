//! Offset-based read protocol over the status text.
//!
//! Every read re-renders first, so clients always see live state.  The
//! protocol is deliberately all-or-nothing, matching what deployed clients
//! were written against:
//!
//! | offset            | result                                               |
//! |-------------------|------------------------------------------------------|
//! | `>= rendered len` | `Ok(0)`, nothing copied (end of stream)              |
//! | anything else     | copy `min(count, 128)` bytes from byte 0 of the      |
//! |                   | zero-padded buffer, advance offset by rendered len,  |
//! |                   | return rendered len                                  |
//!
//! A client reading with `count >= rendered len` therefore gets the full
//! text on the first call and end-of-stream on the second.  A client reading
//! in smaller chunks gets a truncated prefix, then end-of-stream.

use log::warn;

use super::mode::ModeController;
use super::ports::GpioPort;
use super::status::StatusReporter;
use crate::config::STATUS_CAPACITY;
use crate::error::ReadError;

/// Destination of a read: the client-side buffer.
pub trait ReadTarget {
    /// Copy `src` into the client.  Fails with [`ReadError::CopyFault`] if
    /// the client cannot accept all of it.
    fn copy_out(&mut self, src: &[u8]) -> Result<(), ReadError>;
}

impl ReadTarget for [u8] {
    fn copy_out(&mut self, src: &[u8]) -> Result<(), ReadError> {
        let dst = self.get_mut(..src.len()).ok_or(ReadError::CopyFault)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl<const N: usize> ReadTarget for heapless::Vec<u8, N> {
    fn copy_out(&mut self, src: &[u8]) -> Result<(), ReadError> {
        self.clear();
        self.extend_from_slice(src).map_err(|()| ReadError::CopyFault)
    }
}

/// Read-only view of the status text for external clients.
pub struct ReadChannel {
    reporter: StatusReporter,
}

impl ReadChannel {
    pub const fn new(reporter: StatusReporter) -> Self {
        Self { reporter }
    }

    /// One read call.  `offset` is the caller's stream position.
    pub fn read<T: ReadTarget + ?Sized>(
        &mut self,
        mode: &ModeController,
        gpio: &mut impl GpioPort,
        target: &mut T,
        count: usize,
        offset: &mut u64,
    ) -> Result<usize, ReadError> {
        let rendered = self.reporter.render(mode, gpio);
        let len = rendered.len();

        if *offset >= len as u64 {
            return Ok(0);
        }

        let count = count.min(STATUS_CAPACITY);
        if let Err(e) = target.copy_out(&rendered.padded()[..count]) {
            warn!("status read: {}", e);
            return Err(e);
        }

        *offset += len as u64;
        Ok(len)
    }

    /// Render without reading.
    pub fn render(&mut self, mode: &ModeController, gpio: &mut impl GpioPort) -> &str {
        self.reporter.render(mode, gpio).as_str()
    }

    /// The channel accepts no writes.
    pub fn write(&mut self, _data: &[u8]) -> Result<usize, ReadError> {
        Err(ReadError::ReadOnly)
    }

    /// Text of the most recent render.
    pub fn last_rendered(&self) -> &str {
        self.reporter.last().as_str()
    }
}
