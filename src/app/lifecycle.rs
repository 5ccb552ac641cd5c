//! Startup acquisition and teardown of hardware handles.
//!
//! [`HardwareLease::acquire`] claims the three pins and the two edge
//! interrupts in a fixed order.  If any step fails, everything obtained so
//! far is released in reverse order before the error is returned, so a
//! failed start never leaks a pin and never releases one it did not get.

use heapless::Vec;
use log::{error, info};

use super::ports::{Direction, EdgeSource, GpioPort, InterruptPort, PinState};
use crate::config::MonitorConfig;
use crate::error::{Error, Result};
use crate::pins::PinId;

/// Handles currently held.  Only what is listed here is ever released.
#[must_use = "a lease must be released with `release`"]
#[derive(Debug)]
pub struct HardwareLease {
    pins: Vec<PinId, 3>,
    irqs: Vec<PinId, 2>,
}

impl HardwareLease {
    /// Claim and configure every pin and interrupt the monitor needs.
    pub fn acquire(
        config: &MonitorConfig,
        gpio: &mut impl GpioPort,
        irq: &mut impl InterruptPort,
    ) -> Result<Self> {
        let mut lease = Self {
            pins: Vec::new(),
            irqs: Vec::new(),
        };

        let steps = [
            (config.sensor_gpio, "motion-sensor", Direction::Input),
            (config.buzzer_gpio, "buzzer", Direction::Output),
            (config.button_gpio, "button", Direction::Input),
        ];
        for (pin, label, direction) in steps {
            if let Err(e) = lease.claim_pin(gpio, pin, label, direction) {
                error!("startup: {}, rolling back", e);
                lease.release(gpio, irq);
                return Err(e);
            }
        }
        gpio.write(config.buzzer_gpio, PinState::Low);

        let edges = [
            (config.button_gpio, EdgeSource::Button),
            (config.sensor_gpio, EdgeSource::MotionSensor),
        ];
        for (pin, source) in edges {
            if let Err(cause) = irq.register_falling_edge(pin, source) {
                let e = Error::Irq { pin, cause };
                error!("startup: {}, rolling back", e);
                lease.release(gpio, irq);
                return Err(e);
            }
            // Capacity matches `edges`.
            let _ = lease.irqs.push(pin);
        }

        info!("startup: pins {:?} and edge irqs {:?} held", lease.pins, lease.irqs);
        Ok(lease)
    }

    fn claim_pin(
        &mut self,
        gpio: &mut impl GpioPort,
        pin: PinId,
        label: &'static str,
        direction: Direction,
    ) -> Result<()> {
        gpio.acquire(pin, label)
            .map_err(|cause| Error::Gpio { pin, cause })?;
        // Capacity matches the number of pins claimed in `acquire`.
        let _ = self.pins.push(pin);
        gpio.set_direction(pin, direction)
            .map_err(|cause| Error::Gpio { pin, cause })
    }

    /// Unregister interrupts, then release pins, newest first.
    pub fn release(mut self, gpio: &mut impl GpioPort, irq: &mut impl InterruptPort) {
        while let Some(pin) = self.irqs.pop() {
            irq.unregister(pin);
        }
        while let Some(pin) = self.pins.pop() {
            gpio.release(pin);
        }
    }

    /// Pins held, in acquisition order.
    pub fn pins(&self) -> &[PinId] {
        &self.pins
    }

    /// Pins with a registered edge interrupt, in registration order.
    pub fn irqs(&self) -> &[PinId] {
        &self.irqs
    }
}
