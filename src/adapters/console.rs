//! Line-oriented status console.
//!
//! A client types `status`; the reader thread turns that into
//! [`Event::StatusRequested`] and the main loop answers by reading the
//! status channel until end-of-stream, the way `cat` would, and writing the
//! text to the console output.
//!
//! ```text
//!   stdin ──▶ reader thread ──▶ EventQueue ──▶ main loop ──▶ serve() ──▶ stdout
//! ```

use std::io::{self, BufRead, Write};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::app::ports::GpioPort;
use crate::app::service::SecurityMonitor;
use crate::config::STATUS_CAPACITY;
use crate::events::{Event, EventQueue};

const READER_STACK_SIZE: usize = 4096;

/// Console commands understood by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Status,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "status" | "s" => Some(Self::Status),
            _ => None,
        }
    }
}

pub struct StatusConsole {
    queue: &'static EventQueue,
}

impl StatusConsole {
    pub const fn new(queue: &'static EventQueue) -> Self {
        Self { queue }
    }

    /// Interpret one input line.  Returns `true` if a request was queued.
    pub fn handle_line(&self, line: &str) -> bool {
        if line.trim().is_empty() {
            return false;
        }
        match Command::parse(line) {
            Some(Command::Status) => {
                if self.queue.push(Event::StatusRequested) {
                    true
                } else {
                    warn!("console: event queue full, status request dropped");
                    false
                }
            }
            None => {
                warn!("console: unknown command {:?}", line.trim());
                false
            }
        }
    }

    /// Read lines until EOF, queueing a request per `status` line.
    /// Returns the number of requests queued.
    pub fn pump(&self, reader: impl BufRead) -> io::Result<usize> {
        let mut queued = 0;
        for line in reader.lines() {
            if self.handle_line(&line?) {
                queued += 1;
            }
        }
        Ok(queued)
    }

    /// Run [`pump`](Self::pump) on a dedicated thread.
    pub fn spawn_reader<R>(self, reader: R) -> io::Result<JoinHandle<()>>
    where
        R: BufRead + Send + 'static,
    {
        thread::Builder::new()
            .name("console".into())
            .stack_size(READER_STACK_SIZE)
            .spawn(move || match self.pump(reader) {
                Ok(n) => info!("console: input closed after {} requests", n),
                Err(e) => warn!("console: input error: {}", e),
            })
    }

    /// Answer one request: read the status channel until it reports
    /// end-of-stream and write the text to `out`.  Returns bytes written.
    ///
    /// A failed channel read ends the response early; it is logged, not
    /// returned, since the client can simply ask again.
    pub fn serve(
        monitor: &mut SecurityMonitor,
        gpio: &mut impl GpioPort,
        out: &mut impl Write,
    ) -> io::Result<usize> {
        let mut buf = [0u8; STATUS_CAPACITY];
        let mut offset = 0u64;
        let mut written = 0;
        loop {
            let n = match monitor.read_status(gpio, &mut buf[..], STATUS_CAPACITY, &mut offset) {
                Ok(0) => break,
                Ok(n) => n.min(buf.len()),
                Err(e) => {
                    warn!("console: {}", e);
                    break;
                }
            };
            out.write_all(&buf[..n])?;
            written += n;
        }
        out.flush()?;
        debug!("console: served {} bytes", written);
        Ok(written)
    }
}
