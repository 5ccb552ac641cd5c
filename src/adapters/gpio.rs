//! ESP32 GPIO adapter.
//!
//! Implements [`GpioPort`] for the on-chip GPIO matrix.
//!
//! - **`target_os = "espidf"`**: raw ESP-IDF driver calls (`gpio_reset_pin`,
//!   `gpio_set_direction`, `gpio_get_level`, `gpio_set_level`).
//! - **`not(target_os = "espidf")`**: an in-memory level table for host-side
//!   simulation; inputs can be driven with [`EspGpio::set_input_level`].
//!
//! Ownership is tracked in a bitmask on both targets, so double-acquire and
//! release-without-acquire behave the same in simulation as on the device.
//! Outputs are configured input/output so `read` returns the driven level.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use log::{debug, warn};

use crate::app::ports::{Direction, GpioPort, PinState};
use crate::error::GpioError;
use crate::pins::{GPIO_COUNT, PinId};

pub struct EspGpio {
    owned: u64,
    #[cfg(not(target_os = "espidf"))]
    levels: u64,
}

impl Default for EspGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl EspGpio {
    pub fn new() -> Self {
        Self {
            owned: 0,
            #[cfg(not(target_os = "espidf"))]
            levels: 0,
        }
    }

    fn mask(pin: PinId) -> Result<u64, GpioError> {
        if (0..GPIO_COUNT).contains(&pin) {
            Ok(1u64 << pin)
        } else {
            Err(GpioError::InvalidPin)
        }
    }

    fn is_owned(&self, pin: PinId) -> bool {
        Self::mask(pin).is_ok_and(|m| self.owned & m != 0)
    }

    /// Simulation only: drive the level an input pin reads back.
    #[cfg(not(target_os = "espidf"))]
    pub fn set_input_level(&mut self, pin: PinId, level: PinState) {
        if let Ok(m) = Self::mask(pin) {
            match level {
                PinState::High => self.levels |= m,
                PinState::Low => self.levels &= !m,
            }
        }
    }
}

impl GpioPort for EspGpio {
    fn acquire(&mut self, pin: PinId, label: &'static str) -> Result<(), GpioError> {
        let m = Self::mask(pin)?;
        if self.owned & m != 0 {
            return Err(GpioError::AlreadyOwned);
        }
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: pin is range-checked above; resetting an unowned pin
            // only returns it to its default input state.
            let ret = unsafe { gpio_reset_pin(pin) };
            if ret != ESP_OK {
                return Err(GpioError::Platform(ret));
            }
        }
        self.owned |= m;
        debug!("gpio: {} acquired by {}", pin, label);
        Ok(())
    }

    fn release(&mut self, pin: PinId) {
        let Ok(m) = Self::mask(pin) else { return };
        if self.owned & m == 0 {
            warn!("gpio: release of unowned pin {} ignored", pin);
            return;
        }
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: the pin is owned by us and range-checked.
            unsafe { gpio_reset_pin(pin) };
        }
        #[cfg(not(target_os = "espidf"))]
        {
            self.levels &= !m;
        }
        self.owned &= !m;
        debug!("gpio: {} released", pin);
    }

    fn set_direction(&mut self, pin: PinId, direction: Direction) -> Result<(), GpioError> {
        if !self.is_owned(pin) {
            return Err(GpioError::NotOwned);
        }
        #[cfg(target_os = "espidf")]
        {
            let mode = match direction {
                Direction::Input => gpio_mode_t_GPIO_MODE_INPUT,
                Direction::Output => gpio_mode_t_GPIO_MODE_INPUT_OUTPUT,
            };
            // SAFETY: the pin is owned by us and range-checked.
            let ret = unsafe { gpio_set_direction(pin, mode) };
            if ret != ESP_OK {
                return Err(GpioError::Platform(ret));
            }
        }
        debug!("gpio: {} set to {:?}", pin, direction);
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn read(&mut self, pin: PinId) -> PinState {
        // SAFETY: read-only register access.
        PinState::from(unsafe { gpio_get_level(pin) } != 0)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read(&mut self, pin: PinId) -> PinState {
        PinState::from(Self::mask(pin).is_ok_and(|m| self.levels & m != 0))
    }

    fn write(&mut self, pin: PinId, level: PinState) {
        if !self.is_owned(pin) {
            warn!("gpio: write to unowned pin {} ignored", pin);
            return;
        }
        #[cfg(target_os = "espidf")]
        {
            let high = u32::from(level == PinState::High);
            // SAFETY: the pin is owned by us and configured as output.
            unsafe { gpio_set_level(pin, high) };
        }
        #[cfg(not(target_os = "espidf"))]
        self.set_input_level(pin, level);
    }
}
