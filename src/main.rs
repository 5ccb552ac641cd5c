//! SentryBox firmware entry point
//!
//! Hexagonal architecture with interrupt-fed event queue.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  EspGpio        EspInterrupts     AlarmTimer     StatusConsole │
//! │  (GpioPort)     (InterruptPort)   (TimerPort)    (stdin/stdout)│
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            SecurityMonitor (pure logic)                │    │
//! │  │  Mode · Alarm · Status read channel                    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io;
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use log::{debug, info, warn};

use sentrybox::adapters::console::StatusConsole;
use sentrybox::adapters::gpio::EspGpio;
use sentrybox::adapters::interrupts::EspInterrupts;
use sentrybox::adapters::time::UptimeClock;
use sentrybox::adapters::timer::AlarmTimer;
use sentrybox::app::service::SecurityMonitor;
use sentrybox::config::MonitorConfig;
use sentrybox::error::Error;
use sentrybox::events::{EVENTS, Event};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SentryBox v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let clock = UptimeClock::new();
    let config = MonitorConfig::default();
    info!(
        "pins: sensor={} buzzer={} button={}, alarm {} ms",
        config.sensor_gpio, config.buzzer_gpio, config.button_gpio, config.alarm_duration_ms
    );

    // ── 2. Adapters ───────────────────────────────────────────
    let mut gpio = EspGpio::new();
    let mut irq =
        EspInterrupts::new(&EVENTS).map_err(|cause| anyhow!("GPIO ISR service: {cause}"))?;
    let mut timer = AlarmTimer::new(&EVENTS).map_err(Error::from)?;

    // ── 3. Start the monitor (aborts with nothing held) ───────
    let interval = Duration::from_millis(u64::from(config.event_loop_interval_ms));
    let mut monitor = SecurityMonitor::start(config, &mut gpio, &mut irq)?;

    // ── 4. Console ────────────────────────────────────────────
    let _console = StatusConsole::new(&EVENTS).spawn_reader(io::BufReader::new(io::stdin()))?;

    info!("System ready at {} ms. Entering event loop.", clock.uptime_ms());

    // ── 5. Event loop ─────────────────────────────────────────
    let mut stdout = io::stdout();
    loop {
        EVENTS.drain(|event| {
            debug!("t={}ms {:?}", clock.uptime_ms(), event);
            match event {
                Event::StatusRequested => {
                    if let Err(e) = StatusConsole::serve(&mut monitor, &mut gpio, &mut stdout) {
                        warn!("console: write failed: {}", e);
                    }
                }
                other => monitor.handle_event(other, &mut gpio, &mut timer),
            }
        });

        thread::sleep(interval);
    }
}
