//! One-shot alarm timer using ESP-IDF's esp_timer API.
//!
//! Implements [`TimerPort`].  Expiry pushes [`Event::AlarmTimeout`] into the
//! event queue's reserved expiry slot, which is never full; the main loop
//! turns it into a buzzer-off.  On simulation
//! targets the deadline is an [`Instant`](std::time::Instant) checked by
//! [`AlarmTimer::poll`] from the main loop.
//!
//! The esp_timer callback runs in the ESP timer task (not ISR), but it
//! still does nothing beyond the queue push.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use log::debug;
#[cfg(target_os = "espidf")]
use log::info;

use crate::app::ports::TimerPort;
use crate::error::TimerError;
use crate::events::{Event, EventQueue};

#[cfg(target_os = "espidf")]
unsafe extern "C" fn alarm_expired_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `&'static EventQueue` given to esp_timer_create.
    let queue = unsafe { &*(arg as *const EventQueue) };
    queue.push(Event::AlarmTimeout);
}

pub struct AlarmTimer {
    #[cfg(target_os = "espidf")]
    handle: esp_timer_handle_t,
    #[cfg(not(target_os = "espidf"))]
    queue: &'static EventQueue,
    #[cfg(not(target_os = "espidf"))]
    deadline: Option<std::time::Instant>,
}

impl AlarmTimer {
    /// Create the (disarmed) one-shot.
    #[cfg(target_os = "espidf")]
    pub fn new(queue: &'static EventQueue) -> Result<Self, TimerError> {
        let args = esp_timer_create_args_t {
            callback: Some(alarm_expired_cb),
            arg: core::ptr::from_ref(queue).cast_mut().cast(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"alarm".as_ptr(),
            skip_unhandled_events: false,
        };
        let mut handle: esp_timer_handle_t = core::ptr::null_mut();
        // SAFETY: `args` lives for the call; esp_timer copies it.
        let ret = unsafe { esp_timer_create(&args, &mut handle) };
        if ret != ESP_OK {
            return Err(TimerError::Platform(ret));
        }
        info!("alarm timer: created");
        Ok(Self { handle })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(queue: &'static EventQueue) -> Result<Self, TimerError> {
        Ok(Self {
            queue,
            deadline: None,
        })
    }

    /// Whether a one-shot is armed and has not yet expired.
    #[cfg(target_os = "espidf")]
    pub fn is_pending(&self) -> bool {
        // SAFETY: handle is valid for the lifetime of `self`.
        unsafe { esp_timer_is_active(self.handle) }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Simulation only: push [`Event::AlarmTimeout`] if the deadline has
    /// passed.  Returns `true` when it fired.
    #[cfg(not(target_os = "espidf"))]
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(at) if std::time::Instant::now() >= at => {
                self.deadline = None;
                self.queue.push(Event::AlarmTimeout);
                true
            }
            _ => false,
        }
    }
}

impl TimerPort for AlarmTimer {
    #[cfg(target_os = "espidf")]
    fn schedule(&mut self, delay_ms: u32) -> Result<(), TimerError> {
        if self.is_pending() {
            return Err(TimerError::AlreadyPending);
        }
        // SAFETY: handle is valid for the lifetime of `self`.
        let ret = unsafe { esp_timer_start_once(self.handle, u64::from(delay_ms) * 1000) };
        if ret != ESP_OK {
            return Err(TimerError::Platform(ret));
        }
        debug!("alarm timer: armed for {} ms", delay_ms);
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn schedule(&mut self, delay_ms: u32) -> Result<(), TimerError> {
        if self.is_pending() {
            return Err(TimerError::AlreadyPending);
        }
        let delay = std::time::Duration::from_millis(u64::from(delay_ms));
        self.deadline = Some(std::time::Instant::now() + delay);
        debug!("alarm timer(sim): armed for {} ms", delay_ms);
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn cancel(&mut self) -> bool {
        // SAFETY: handle is valid; stopping an idle timer returns
        // ESP_ERR_INVALID_STATE and has no effect.
        let stopped = unsafe { esp_timer_stop(self.handle) } == ESP_OK;
        if stopped {
            debug!("alarm timer: cancelled");
        }
        stopped
    }

    #[cfg(not(target_os = "espidf"))]
    fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

#[cfg(target_os = "espidf")]
impl Drop for AlarmTimer {
    fn drop(&mut self) {
        // SAFETY: handle was created in `new` and is deleted exactly once.
        unsafe {
            esp_timer_stop(self.handle);
            esp_timer_delete(self.handle);
        }
    }
}
