//! Mock hardware adapters for integration tests.
//!
//! All three mocks append to one shared [`Journal`], so tests can assert on
//! the exact cross-adapter order of pin, interrupt and timer calls without
//! touching real GPIO registers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use sentrybox::app::ports::{
    Direction, EdgeSource, GpioPort, InterruptPort, PinState, TimerPort,
};
use sentrybox::error::{GpioError, IrqError, TimerError};
use sentrybox::pins::PinId;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwCall {
    Acquire(PinId),
    Release(PinId),
    SetDirection(PinId, Direction),
    Write(PinId, PinState),
    Register(PinId, EdgeSource),
    Unregister(PinId),
    Schedule(u32),
    Cancel { was_pending: bool },
}

pub type Journal = Rc<RefCell<Vec<HwCall>>>;

// ── MockGpio ──────────────────────────────────────────────────

pub struct MockGpio {
    journal: Journal,
    levels: HashMap<PinId, PinState>,
    pub owned: Vec<PinId>,
    pub fail_acquire: Option<(PinId, GpioError)>,
    pub fail_direction: Option<PinId>,
}

#[allow(dead_code)]
impl MockGpio {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            levels: HashMap::new(),
            owned: Vec::new(),
            fail_acquire: None,
            fail_direction: None,
        }
    }

    /// Drive an input from the outside world.
    pub fn set_level(&mut self, pin: PinId, level: PinState) {
        self.levels.insert(pin, level);
    }

    pub fn level(&self, pin: PinId) -> PinState {
        self.levels.get(&pin).copied().unwrap_or(PinState::Low)
    }

    /// Every level written to `pin`, oldest first.
    pub fn writes_to(&self, pin: PinId) -> Vec<PinState> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|c| match *c {
                HwCall::Write(p, level) if p == pin => Some(level),
                _ => None,
            })
            .collect()
    }
}

impl GpioPort for MockGpio {
    fn acquire(&mut self, pin: PinId, _label: &'static str) -> Result<(), GpioError> {
        if let Some((p, e)) = self.fail_acquire {
            if p == pin {
                return Err(e);
            }
        }
        if self.owned.contains(&pin) {
            return Err(GpioError::AlreadyOwned);
        }
        self.journal.borrow_mut().push(HwCall::Acquire(pin));
        self.owned.push(pin);
        Ok(())
    }

    fn release(&mut self, pin: PinId) {
        self.journal.borrow_mut().push(HwCall::Release(pin));
        self.owned.retain(|&p| p != pin);
    }

    fn set_direction(&mut self, pin: PinId, direction: Direction) -> Result<(), GpioError> {
        if self.fail_direction == Some(pin) {
            return Err(GpioError::DirectionUnsupported);
        }
        self.journal
            .borrow_mut()
            .push(HwCall::SetDirection(pin, direction));
        Ok(())
    }

    fn read(&mut self, pin: PinId) -> PinState {
        self.level(pin)
    }

    fn write(&mut self, pin: PinId, level: PinState) {
        self.journal.borrow_mut().push(HwCall::Write(pin, level));
        self.levels.insert(pin, level);
    }
}

// ── MockIrq ───────────────────────────────────────────────────

pub struct MockIrq {
    journal: Journal,
    pub registered: Vec<(PinId, EdgeSource)>,
    pub fail_on: Option<(PinId, IrqError)>,
}

impl MockIrq {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            registered: Vec::new(),
            fail_on: None,
        }
    }
}

impl InterruptPort for MockIrq {
    fn register_falling_edge(&mut self, pin: PinId, source: EdgeSource) -> Result<(), IrqError> {
        if let Some((p, e)) = self.fail_on {
            if p == pin {
                return Err(e);
            }
        }
        self.journal.borrow_mut().push(HwCall::Register(pin, source));
        self.registered.push((pin, source));
        Ok(())
    }

    fn unregister(&mut self, pin: PinId) {
        self.journal.borrow_mut().push(HwCall::Unregister(pin));
        self.registered.retain(|&(p, _)| p != pin);
    }
}

// ── MockTimer ─────────────────────────────────────────────────

pub struct MockTimer {
    journal: Journal,
    pub pending: Option<u32>,
    pub refuse: Option<TimerError>,
}

#[allow(dead_code)]
impl MockTimer {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            pending: None,
            refuse: None,
        }
    }

    /// Number of successful `schedule` calls so far.
    pub fn schedules(&self) -> usize {
        self.journal
            .borrow()
            .iter()
            .filter(|c| matches!(c, HwCall::Schedule(_)))
            .count()
    }

    /// Expire the pending one-shot.  Returns `true` if one was pending;
    /// the caller delivers the timeout to the monitor.
    pub fn expire(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

impl TimerPort for MockTimer {
    fn schedule(&mut self, delay_ms: u32) -> Result<(), TimerError> {
        if let Some(e) = self.refuse {
            return Err(e);
        }
        if self.pending.is_some() {
            return Err(TimerError::AlreadyPending);
        }
        self.journal.borrow_mut().push(HwCall::Schedule(delay_ms));
        self.pending = Some(delay_ms);
        Ok(())
    }

    fn cancel(&mut self) -> bool {
        let was_pending = self.pending.take().is_some();
        self.journal
            .borrow_mut()
            .push(HwCall::Cancel { was_pending });
        was_pending
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// Three mocks sharing one journal.
pub struct Rig {
    pub journal: Journal,
    pub gpio: MockGpio,
    pub irq: MockIrq,
    pub timer: MockTimer,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        let journal = Journal::default();
        Self {
            gpio: MockGpio::new(journal.clone()),
            irq: MockIrq::new(journal.clone()),
            timer: MockTimer::new(journal.clone()),
            journal,
        }
    }

    pub fn calls(&self) -> Vec<HwCall> {
        self.journal.borrow().clone()
    }

    pub fn clear_journal(&self) {
        self.journal.borrow_mut().clear();
    }
}
