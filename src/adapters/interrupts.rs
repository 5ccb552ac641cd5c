//! Falling-edge interrupt adapter.
//!
//! Implements [`InterruptPort`] on top of the ESP-IDF per-pin GPIO ISR
//! service.  Each handler does exactly one thing: push the source's
//! [`Event`] onto the queue it was registered with.  No logging, no
//! allocation, no domain calls from interrupt context.
//!
//! On simulation targets the registrations are kept in a table and edges
//! are injected with [`EspInterrupts::fire_edge`].

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use heapless::Vec;
use log::{debug, info};

use crate::app::ports::{EdgeSource, InterruptPort};
use crate::error::IrqError;
use crate::events::EventQueue;
#[cfg(target_os = "espidf")]
use crate::events::Event;
use crate::pins::{GPIO_COUNT, PinId};

/// The monitor registers one handler per edge source.
const MAX_HANDLERS: usize = 2;

// ── ISR trampolines ───────────────────────────────────────────

/// SAFETY: `arg` is the `&'static EventQueue` passed to
/// `gpio_isr_handler_add`; `EventQueue::push` is ISR-safe.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn motion_isr(arg: *mut core::ffi::c_void) {
    let queue = unsafe { &*(arg as *const EventQueue) };
    queue.push(Event::MotionDetected);
}

/// SAFETY: same contract as [`motion_isr`].
#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_isr(arg: *mut core::ffi::c_void) {
    let queue = unsafe { &*(arg as *const EventQueue) };
    queue.push(Event::ButtonPressed);
}

// ── Adapter ───────────────────────────────────────────────────

pub struct EspInterrupts {
    queue: &'static EventQueue,
    registered: Vec<(PinId, EdgeSource), MAX_HANDLERS>,
}

impl EspInterrupts {
    /// Install the GPIO ISR service.  Already-installed is accepted.
    #[cfg(target_os = "espidf")]
    pub fn new(queue: &'static EventQueue) -> Result<Self, IrqError> {
        // SAFETY: one-time service install from the main task.
        // ESP_ERR_INVALID_STATE means another component installed it first.
        let ret = unsafe { gpio_install_isr_service(0) };
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(IrqError::Platform(ret));
        }
        info!("irq: GPIO ISR service ready");
        Ok(Self {
            queue,
            registered: Vec::new(),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(queue: &'static EventQueue) -> Result<Self, IrqError> {
        info!("irq(sim): edges injected via fire_edge()");
        Ok(Self {
            queue,
            registered: Vec::new(),
        })
    }

    /// Pins with a handler attached, in registration order.
    pub fn registered(&self) -> impl Iterator<Item = PinId> + '_ {
        self.registered.iter().map(|&(pin, _)| pin)
    }

    fn slot(&self, pin: PinId) -> Option<usize> {
        self.registered.iter().position(|&(p, _)| p == pin)
    }

    /// Simulation only: deliver a falling edge on `pin`.
    /// Returns `false` if no handler is attached.
    #[cfg(not(target_os = "espidf"))]
    pub fn fire_edge(&self, pin: PinId) -> bool {
        match self.slot(pin) {
            Some(i) => self.queue.push(self.registered[i].1.event()),
            None => false,
        }
    }

    #[cfg(target_os = "espidf")]
    fn attach(&self, pin: PinId, source: EdgeSource) -> Result<(), IrqError> {
        let handler: unsafe extern "C" fn(*mut core::ffi::c_void) = match source {
            EdgeSource::MotionSensor => motion_isr,
            EdgeSource::Button => button_isr,
        };
        let arg = core::ptr::from_ref(self.queue).cast_mut().cast();
        // SAFETY: pin is range-checked by the caller; the queue outlives
        // every handler because it is 'static.
        unsafe {
            let ret = gpio_set_intr_type(pin, gpio_int_type_t_GPIO_INTR_NEGEDGE);
            if ret != ESP_OK {
                return Err(IrqError::Platform(ret));
            }
            let ret = gpio_isr_handler_add(pin, Some(handler), arg);
            if ret != ESP_OK {
                gpio_set_intr_type(pin, gpio_int_type_t_GPIO_INTR_DISABLE);
                return Err(IrqError::Platform(ret));
            }
            let ret = gpio_intr_enable(pin);
            if ret != ESP_OK {
                gpio_isr_handler_remove(pin);
                gpio_set_intr_type(pin, gpio_int_type_t_GPIO_INTR_DISABLE);
                return Err(IrqError::Platform(ret));
            }
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn attach(&self, _pin: PinId, _source: EdgeSource) -> Result<(), IrqError> {
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn detach(&self, pin: PinId) {
        // SAFETY: the handler on `pin` was added by `attach`.
        unsafe {
            gpio_intr_disable(pin);
            gpio_isr_handler_remove(pin);
            gpio_set_intr_type(pin, gpio_int_type_t_GPIO_INTR_DISABLE);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn detach(&self, _pin: PinId) {}
}

impl InterruptPort for EspInterrupts {
    fn register_falling_edge(&mut self, pin: PinId, source: EdgeSource) -> Result<(), IrqError> {
        if !(0..GPIO_COUNT).contains(&pin) {
            return Err(IrqError::InvalidPin);
        }
        if self.slot(pin).is_some() {
            return Err(IrqError::AlreadyRegistered);
        }
        if self.registered.is_full() {
            return Err(IrqError::NoSlot);
        }
        self.attach(pin, source)?;
        // Capacity checked above.
        let _ = self.registered.push((pin, source));
        debug!("irq: {:?} falling edge on gpio {}", source, pin);
        Ok(())
    }

    fn unregister(&mut self, pin: PinId) {
        let Some(i) = self.slot(pin) else { return };
        self.detach(pin);
        self.registered.remove(i);
        debug!("irq: gpio {} handler removed", pin);
    }
}

impl Drop for EspInterrupts {
    fn drop(&mut self) {
        while let Some((pin, _)) = self.registered.pop() {
            self.detach(pin);
        }
    }
}
