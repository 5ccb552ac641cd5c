//! GPIO pin assignments for the SentryBox main board.
//!
//! Single source of truth: every adapter references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

/// GPIO number as understood by the ESP-IDF driver (`gpio_num_t`).
pub type PinId = i32;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// PIR motion sensor output.  The sensor drives the line actively; a falling
/// edge marks a detection.
pub const MOTION_SENSOR_GPIO: PinId = 4;

/// Momentary arm/disarm push-button (the devkit BOOT button).
/// Active-low with the on-board pull-up; fires on the falling edge.
pub const BUTTON_GPIO: PinId = 0;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Active buzzer driven through an NPN low-side switch.  HIGH = sounding.
pub const BUZZER_GPIO: PinId = 5;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// One past the highest GPIO number on the ESP32-S3 (GPIO 0 – 48).
pub const GPIO_COUNT: PinId = 49;
