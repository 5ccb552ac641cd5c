//! In-crate fakes for unit tests.

use std::collections::HashMap;

use super::ports::{Direction, EdgeSource, GpioPort, InterruptPort, PinState, TimerPort};
use crate::error::{GpioError, IrqError, TimerError};
use crate::pins::PinId;

#[derive(Default)]
pub struct FakeGpio {
    levels: HashMap<PinId, PinState>,
    pub owned: Vec<PinId>,
    pub directions: HashMap<PinId, Direction>,
    pub fail_acquire: Option<PinId>,
}

impl FakeGpio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_level(&mut self, pin: PinId, level: PinState) {
        self.levels.insert(pin, level);
    }

    pub fn level(&self, pin: PinId) -> PinState {
        self.levels.get(&pin).copied().unwrap_or(PinState::Low)
    }
}

impl GpioPort for FakeGpio {
    fn acquire(&mut self, pin: PinId, _label: &'static str) -> Result<(), GpioError> {
        if self.fail_acquire == Some(pin) || self.owned.contains(&pin) {
            return Err(GpioError::AlreadyOwned);
        }
        self.owned.push(pin);
        Ok(())
    }

    fn release(&mut self, pin: PinId) {
        self.owned.retain(|&p| p != pin);
    }

    fn set_direction(&mut self, pin: PinId, direction: Direction) -> Result<(), GpioError> {
        self.directions.insert(pin, direction);
        Ok(())
    }

    fn read(&mut self, pin: PinId) -> PinState {
        self.level(pin)
    }

    fn write(&mut self, pin: PinId, level: PinState) {
        self.levels.insert(pin, level);
    }
}

#[derive(Default)]
pub struct FakeIrq {
    pub registered: Vec<(PinId, EdgeSource)>,
    pub fail_on: Option<PinId>,
}

impl InterruptPort for FakeIrq {
    fn register_falling_edge(&mut self, pin: PinId, source: EdgeSource) -> Result<(), IrqError> {
        if self.fail_on == Some(pin) {
            return Err(IrqError::Platform(-1));
        }
        self.registered.push((pin, source));
        Ok(())
    }

    fn unregister(&mut self, pin: PinId) {
        self.registered.retain(|&(p, _)| p != pin);
    }
}

#[derive(Default)]
pub struct FakeTimer {
    pub pending: Option<u32>,
    pub schedules: usize,
    pub refuse: bool,
}

impl TimerPort for FakeTimer {
    fn schedule(&mut self, delay_ms: u32) -> Result<(), TimerError> {
        if self.refuse {
            return Err(TimerError::Platform(-1));
        }
        if self.pending.is_some() {
            return Err(TimerError::AlreadyPending);
        }
        self.pending = Some(delay_ms);
        self.schedules += 1;
        Ok(())
    }

    fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
