//! Fuzz target: `ReadChannel::read`
//!
//! Interprets the input as a sequence of 11-byte records
//! (`flags: u8`, `count: u16`, `offset: u64`); the flags drive pin levels,
//! the mode and the client buffer size.  Every read must either end the
//! stream or report the rendered length, and must never panic.
//!
//! cargo fuzz run fuzz_read_channel

#![no_main]

use libfuzzer_sys::fuzz_target;
use sentrybox::adapters::gpio::EspGpio;
use sentrybox::app::mode::ModeController;
use sentrybox::app::ports::{Direction, GpioPort, PinState};
use sentrybox::app::read_channel::ReadChannel;
use sentrybox::app::status::StatusReporter;
use sentrybox::config::{MonitorConfig, STATUS_CAPACITY};
use sentrybox::error::ReadError;

fuzz_target!(|data: &[u8]| {
    let config = MonitorConfig::default();
    let mut gpio = EspGpio::new();
    if gpio.acquire(config.buzzer_gpio, "buzzer").is_err()
        || gpio.set_direction(config.buzzer_gpio, Direction::Output).is_err()
    {
        return;
    }
    let mode = ModeController::new();
    let mut channel =
        ReadChannel::new(StatusReporter::new(config.sensor_gpio, config.buzzer_gpio));
    let mut client = [0u8; 2 * STATUS_CAPACITY];

    for chunk in data.chunks_exact(11) {
        let flags = chunk[0];
        if flags & 0x01 != 0 {
            mode.toggle();
        }
        gpio.set_input_level(config.sensor_gpio, PinState::from(flags & 0x02 != 0));
        gpio.write(config.buzzer_gpio, PinState::from(flags & 0x04 != 0));

        let count = usize::from(u16::from_le_bytes([chunk[1], chunk[2]]));
        let start = u64::from_le_bytes(chunk[3..11].try_into().unwrap());
        // Vary the client buffer size so short buffers exercise the fault path.
        let window = usize::from(flags >> 3) * 8;
        let target = &mut client[..window.min(2 * STATUS_CAPACITY)];

        let mut offset = start;
        match channel.read(&mode, &mut gpio, target, count, &mut offset) {
            Ok(0) => assert_eq!(offset, start),
            Ok(n) => {
                assert_eq!(n, channel.last_rendered().len());
                assert!(n < STATUS_CAPACITY);
                assert_eq!(offset, start + n as u64);
            }
            Err(ReadError::CopyFault) => {
                assert!(count.min(STATUS_CAPACITY) > target.len());
                assert_eq!(offset, start);
            }
            Err(e) => panic!("unexpected read error: {e}"),
        }
    }
});
