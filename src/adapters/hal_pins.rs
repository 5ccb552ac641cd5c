//! [`GpioPort`] over `embedded-hal` 1.0 pin drivers.
//!
//! Lets the monitor run on any board support crate that hands out typed
//! pins: the motion sensor and button as [`InputPin`]s, the buzzer as a
//! [`StatefulOutputPin`] so its driven level can be read back for the
//! status text.  Pin numbers are only used to route port calls to the
//! right driver.

use embedded_hal::digital::{InputPin, PinState, StatefulOutputPin};
use log::warn;

use crate::app::ports::{Direction, GpioPort};
use crate::config::MonitorConfig;
use crate::error::GpioError;
use crate::pins::PinId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Sensor,
    Buzzer,
    Button,
}

/// The three typed pins plus per-pin ownership flags.
pub struct HalPins<S, B, A> {
    sensor: S,
    button: B,
    buzzer: A,
    ids: [(PinId, Slot); 3],
    owned: [bool; 3],
}

impl<S, B, A> HalPins<S, B, A>
where
    S: InputPin,
    B: InputPin,
    A: StatefulOutputPin,
{
    /// Bind typed pins to the numbers in `config`.
    pub fn new(config: &MonitorConfig, sensor: S, button: B, buzzer: A) -> Self {
        Self {
            sensor,
            button,
            buzzer,
            ids: [
                (config.sensor_gpio, Slot::Sensor),
                (config.buzzer_gpio, Slot::Buzzer),
                (config.button_gpio, Slot::Button),
            ],
            owned: [false; 3],
        }
    }

    /// Hand the pin drivers back.
    pub fn into_inner(self) -> (S, B, A) {
        (self.sensor, self.button, self.buzzer)
    }

    fn index(&self, pin: PinId) -> Result<(usize, Slot), GpioError> {
        self.ids
            .iter()
            .enumerate()
            .find(|(_, (id, _))| *id == pin)
            .map(|(i, &(_, slot))| (i, slot))
            .ok_or(GpioError::InvalidPin)
    }
}

impl<S, B, A> GpioPort for HalPins<S, B, A>
where
    S: InputPin,
    B: InputPin,
    A: StatefulOutputPin,
{
    fn acquire(&mut self, pin: PinId, _label: &'static str) -> Result<(), GpioError> {
        let (i, _) = self.index(pin)?;
        if self.owned[i] {
            return Err(GpioError::AlreadyOwned);
        }
        self.owned[i] = true;
        Ok(())
    }

    fn release(&mut self, pin: PinId) {
        if let Ok((i, _)) = self.index(pin) {
            self.owned[i] = false;
        }
    }

    fn set_direction(&mut self, pin: PinId, direction: Direction) -> Result<(), GpioError> {
        let (i, slot) = self.index(pin)?;
        if !self.owned[i] {
            return Err(GpioError::NotOwned);
        }
        match (slot, direction) {
            (Slot::Sensor | Slot::Button, Direction::Input) | (Slot::Buzzer, Direction::Output) => {
                Ok(())
            }
            _ => Err(GpioError::DirectionUnsupported),
        }
    }

    fn read(&mut self, pin: PinId) -> PinState {
        let level = match self.index(pin) {
            Ok((_, Slot::Sensor)) => self.sensor.is_high().map_err(|_| ()),
            Ok((_, Slot::Button)) => self.button.is_high().map_err(|_| ()),
            Ok((_, Slot::Buzzer)) => self.buzzer.is_set_high().map_err(|_| ()),
            Err(_) => return PinState::Low,
        };
        match level {
            Ok(high) => PinState::from(high),
            Err(_) => {
                warn!("gpio {}: read failed, reporting low", pin);
                PinState::Low
            }
        }
    }

    fn write(&mut self, pin: PinId, level: PinState) {
        match self.index(pin) {
            Ok((i, Slot::Buzzer)) if self.owned[i] => {
                if self.buzzer.set_state(level).is_err() {
                    warn!("gpio {}: write failed", pin);
                }
            }
            _ => warn!("gpio {}: not a writable pin", pin),
        }
    }
}
