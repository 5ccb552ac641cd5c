//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the SentryBox monitor:
//! arm/disarm mode, alarm episodes, and the status read channel.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod alarm;
pub mod lifecycle;
pub mod mode;
pub mod ports;
pub mod read_channel;
pub mod service;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;
