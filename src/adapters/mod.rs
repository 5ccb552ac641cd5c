//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements     | Connects to                      |
//! |--------------|----------------|----------------------------------|
//! | `gpio`       | GpioPort       | ESP32 GPIO matrix                |
//! | `hal_pins`   | GpioPort       | embedded-hal 1.0 typed pins      |
//! | `interrupts` | InterruptPort  | ESP-IDF GPIO ISR service         |
//! | `timer`      | TimerPort      | ESP-IDF esp_timer one-shot       |
//! | `console`    | (none)         | Line console (status requests)   |
//! | `time`       | (none)         | ESP32 system timer (uptime)      |

pub mod console;
pub mod gpio;
pub mod hal_pins;
pub mod interrupts;
pub mod time;
pub mod timer;
