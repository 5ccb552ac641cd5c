//! Unified error types for the SentryBox firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! startup path's error handling uniform.  All variants are `Copy` so they
//! can be returned from port calls without allocation.

use core::fmt;

use crate::pins::PinId;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A pin could not be acquired or configured.
    Gpio { pin: PinId, cause: GpioError },
    /// An edge interrupt could not be registered.
    Irq { pin: PinId, cause: IrqError },
    /// The alarm timer could not be created or armed.
    Timer(TimerError),
    /// A status read failed.
    Read(ReadError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio { pin, cause } => write!(f, "gpio {pin}: {cause}"),
            Self::Irq { pin, cause } => write!(f, "irq on gpio {pin}: {cause}"),
            Self::Timer(e) => write!(f, "timer: {e}"),
            Self::Read(e) => write!(f, "read: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// The pin is already owned by someone else.
    AlreadyOwned,
    /// The pin number does not exist on this chip / board.
    InvalidPin,
    /// The pin was not acquired before use.
    NotOwned,
    /// The pin cannot be driven in the requested direction.
    DirectionUnsupported,
    /// The platform driver returned an error code.
    Platform(i32),
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyOwned => write!(f, "already owned"),
            Self::InvalidPin => write!(f, "invalid pin"),
            Self::NotOwned => write!(f, "not acquired"),
            Self::DirectionUnsupported => write!(f, "direction unsupported"),
            Self::Platform(rc) => write!(f, "driver error (rc={rc})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Interrupt errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqError {
    /// A handler is already attached to this pin.
    AlreadyRegistered,
    /// The pin cannot raise interrupts.
    InvalidPin,
    /// No free handler slots remain.
    NoSlot,
    /// The platform driver returned an error code.
    Platform(i32),
}

impl fmt::Display for IrqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRegistered => write!(f, "handler already registered"),
            Self::InvalidPin => write!(f, "pin cannot raise interrupts"),
            Self::NoSlot => write!(f, "no free handler slot"),
            Self::Platform(rc) => write!(f, "driver error (rc={rc})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Timer errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// A one-shot is already pending.
    AlreadyPending,
    /// The platform driver returned an error code.
    Platform(i32),
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPending => write!(f, "timer already pending"),
            Self::Platform(rc) => write!(f, "driver error (rc={rc})"),
        }
    }
}

impl From<TimerError> for Error {
    fn from(e: TimerError) -> Self {
        Self::Timer(e)
    }
}

// ---------------------------------------------------------------------------
// Read-channel errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// The client buffer could not take the copy.
    CopyFault,
    /// The status channel does not accept writes.
    ReadOnly,
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CopyFault => write!(f, "copy to client failed"),
            Self::ReadOnly => write!(f, "channel is read-only"),
        }
    }
}

impl From<ReadError> for Error {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
