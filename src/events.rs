//! Interrupt-driven event system.
//!
//! Events are produced by:
//! - GPIO ISRs (motion sensor edge, button edge)
//! - The alarm one-shot timer callback
//! - The console reader thread (status requests)
//!
//! Events are consumed by the main loop, which hands them to the
//! [`SecurityMonitor`](crate::app::service::SecurityMonitor) one at a time.
//! Edge and console events are bounded and delivered in FIFO order.  The
//! alarm expiry has a reserved slot of its own, so a flood of edges can
//! never crowd it out, and it is delivered ahead of queued edges.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ GPIO ISR    │────▶│              │     │              │
//! │ Console     │────▶│  Event Queue │────▶│  Main Loop   │
//! │             │     │  (bounded)   │     │  (consumer)  │
//! └─────────────┘     ├──────────────┤     │              │
//! ┌─────────────┐     │  expiry slot │     │              │
//! │ Timer cb    │────▶│  (reserved)  │────▶│              │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

/// Maximum number of pending events.
pub const EVENT_QUEUE_CAP: usize = 16;

/// System event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// Falling edge on the motion sensor input.
    MotionDetected = 0,
    /// Falling edge on the arm/disarm button.
    ButtonPressed = 1,
    /// The alarm one-shot expired.
    AlarmTimeout = 2,
    /// A console client asked for the status text.
    StatusRequested = 3,
}

/// Bounded multi-producer queue between interrupt context and the main loop.
///
/// `push` never blocks: the critical section is held only for the copy of a
/// one-byte event, so it is safe from ISRs and timer callbacks alike.
///
/// [`Event::AlarmTimeout`] bypasses the channel and sets `expired` instead.
/// At most one alarm timer is pending at a time, so one slot is enough and
/// the timeout is never dropped.
pub struct EventQueue {
    channel: Channel<CriticalSectionRawMutex, Event, EVENT_QUEUE_CAP>,
    expired: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            expired: Signal::new(),
        }
    }

    /// Push an event into the queue.
    /// Safe to call from ISR context.
    /// Returns `false` if the queue is full (event dropped).  An
    /// [`Event::AlarmTimeout`] is always accepted.
    pub fn push(&self, event: Event) -> bool {
        match event {
            Event::AlarmTimeout => {
                self.expired.signal(());
                true
            }
            other => self.channel.try_send(other).is_ok(),
        }
    }

    /// Pop the next event, or `None` if the queue is empty.  A pending
    /// alarm expiry comes first.
    pub fn pop(&self) -> Option<Event> {
        if self.expired.try_take().is_some() {
            return Some(Event::AlarmTimeout);
        }
        self.channel.try_receive().ok()
    }

    /// Drain all pending events into a callback.
    /// Returns the number of events handled.
    pub fn drain(&self, mut handler: impl FnMut(Event)) -> usize {
        let mut handled = 0;
        while let Some(event) = self.pop() {
            handler(event);
            handled += 1;
        }
        handled
    }

    /// Check if the event queue is empty.
    pub fn is_empty(&self) -> bool {
        !self.expired.signaled() && self.channel.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.channel.len() + usize::from(self.expired.signaled())
    }

    /// Discard everything pending.
    pub fn clear(&self) {
        self.expired.reset();
        self.channel.clear();
    }
}

/// Process-wide queue that interrupt handlers and the timer callback feed.
pub static EVENTS: EventQueue = EventQueue::new();
