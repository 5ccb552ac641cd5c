//! The host builds of the real adapters wired together the way `main` wires
//! them on the device: edges injected through the interrupt adapter, the
//! alarm timer polled against the wall clock.

use std::thread;
use std::time::Duration;

use sentrybox::adapters::console::StatusConsole;
use sentrybox::adapters::gpio::EspGpio;
use sentrybox::adapters::interrupts::EspInterrupts;
use sentrybox::adapters::timer::AlarmTimer;
use sentrybox::app::mode::Mode;
use sentrybox::app::ports::{GpioPort, PinState};
use sentrybox::app::service::SecurityMonitor;
use sentrybox::config::MonitorConfig;
use sentrybox::events::{EVENT_QUEUE_CAP, Event, EventQueue};

fn short_alarm() -> MonitorConfig {
    MonitorConfig {
        alarm_duration_ms: 20,
        event_loop_interval_ms: 1,
        ..MonitorConfig::default()
    }
}

fn drain(
    queue: &EventQueue,
    monitor: &mut SecurityMonitor,
    gpio: &mut EspGpio,
    timer: &mut AlarmTimer,
    out: &mut Vec<u8>,
) {
    queue.drain(|event| match event {
        Event::StatusRequested => {
            StatusConsole::serve(monitor, gpio, out).unwrap();
        }
        other => monitor.handle_event(other, gpio, timer),
    });
}

#[test]
fn motion_edge_sounds_buzzer_until_timer_expires() {
    static QUEUE: EventQueue = EventQueue::new();
    let config = short_alarm();
    let (sensor, buzzer, button) = (config.sensor_gpio, config.buzzer_gpio, config.button_gpio);

    let mut gpio = EspGpio::new();
    let mut irq = EspInterrupts::new(&QUEUE).unwrap();
    let mut timer = AlarmTimer::new(&QUEUE).unwrap();
    let mut monitor = SecurityMonitor::start(config, &mut gpio, &mut irq).unwrap();
    let mut out = Vec::new();

    assert!(irq.fire_edge(sensor));
    drain(&QUEUE, &mut monitor, &mut gpio, &mut timer, &mut out);
    assert!(monitor.alarm_active());
    assert_eq!(gpio.read(buzzer), PinState::High);
    assert!(timer.is_pending());

    // Presses during the episode change the mode, not the alarm.
    assert!(irq.fire_edge(button));
    assert!(irq.fire_edge(sensor));
    drain(&QUEUE, &mut monitor, &mut gpio, &mut timer, &mut out);
    assert_eq!(monitor.mode(), Mode::Disarmed);
    assert!(monitor.alarm_active());

    let mut waited = 0;
    while !timer.poll() {
        assert!(waited < 1_000, "alarm timer never expired");
        thread::sleep(Duration::from_millis(1));
        waited += 1;
    }
    drain(&QUEUE, &mut monitor, &mut gpio, &mut timer, &mut out);
    assert!(!monitor.alarm_active());
    assert_eq!(gpio.read(buzzer), PinState::Low);

    monitor.shutdown(&mut gpio, &mut irq, &mut timer);
    assert_eq!(irq.registered().count(), 0);
}

#[test]
fn alarm_expires_while_edges_fill_queue() {
    static QUEUE: EventQueue = EventQueue::new();
    let config = short_alarm();
    let (sensor, buzzer, button) = (config.sensor_gpio, config.buzzer_gpio, config.button_gpio);

    let mut gpio = EspGpio::new();
    let mut irq = EspInterrupts::new(&QUEUE).unwrap();
    let mut timer = AlarmTimer::new(&QUEUE).unwrap();
    let mut monitor = SecurityMonitor::start(config, &mut gpio, &mut irq).unwrap();
    let mut out = Vec::new();

    assert!(irq.fire_edge(sensor));
    drain(&QUEUE, &mut monitor, &mut gpio, &mut timer, &mut out);
    assert!(monitor.alarm_active());

    for i in 0..EVENT_QUEUE_CAP {
        let pin = if i % 2 == 0 { button } else { sensor };
        assert!(irq.fire_edge(pin));
    }
    assert!(!irq.fire_edge(sensor), "queue should be full");

    thread::sleep(Duration::from_millis(25));
    assert!(timer.poll());
    assert!(!timer.is_pending());

    // The expiry ends the first episode before the queued edges run; the
    // second button press re-arms and the sensor edge after it starts a
    // fresh episode with its own timer.
    drain(&QUEUE, &mut monitor, &mut gpio, &mut timer, &mut out);
    assert_eq!(monitor.mode(), Mode::Armed);
    assert!(monitor.alarm_active());
    assert!(timer.is_pending(), "a new one-shot was armed");

    let mut waited = 0;
    while !timer.poll() {
        assert!(waited < 1_000, "alarm timer never expired");
        thread::sleep(Duration::from_millis(1));
        waited += 1;
    }
    drain(&QUEUE, &mut monitor, &mut gpio, &mut timer, &mut out);
    assert!(!monitor.alarm_active());
    assert_eq!(gpio.read(buzzer), PinState::Low);

    monitor.shutdown(&mut gpio, &mut irq, &mut timer);
    assert!(QUEUE.is_empty());
}

#[test]
fn console_session_over_sim_adapters() {
    static QUEUE: EventQueue = EventQueue::new();
    let config = short_alarm();
    let sensor = config.sensor_gpio;

    let mut gpio = EspGpio::new();
    let mut irq = EspInterrupts::new(&QUEUE).unwrap();
    let mut timer = AlarmTimer::new(&QUEUE).unwrap();
    let mut monitor = SecurityMonitor::start(config, &mut gpio, &mut irq).unwrap();
    let mut out = Vec::new();

    gpio.set_input_level(sensor, PinState::High);
    let console = StatusConsole::new(&QUEUE);
    assert_eq!(console.pump(b"status\n".as_slice()).unwrap(), 1);
    drain(&QUEUE, &mut monitor, &mut gpio, &mut timer, &mut out);

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Security System ON \nALARM Status: off\nSensor Status: on \n"
    );

    monitor.shutdown(&mut gpio, &mut irq, &mut timer);
}

#[test]
fn shutdown_mid_episode_leaves_nothing_pending() {
    static QUEUE: EventQueue = EventQueue::new();
    let config = MonitorConfig::default();
    let (sensor, buzzer) = (config.sensor_gpio, config.buzzer_gpio);

    let mut gpio = EspGpio::new();
    let mut irq = EspInterrupts::new(&QUEUE).unwrap();
    let mut timer = AlarmTimer::new(&QUEUE).unwrap();
    let mut monitor = SecurityMonitor::start(config, &mut gpio, &mut irq).unwrap();
    let mut out = Vec::new();

    irq.fire_edge(sensor);
    drain(&QUEUE, &mut monitor, &mut gpio, &mut timer, &mut out);
    assert!(timer.is_pending());

    monitor.shutdown(&mut gpio, &mut irq, &mut timer);
    assert!(!timer.is_pending());
    assert!(!timer.poll());
    assert!(QUEUE.is_empty());
    assert_eq!(gpio.read(buzzer), PinState::Low);
    assert!(gpio.acquire(buzzer, "again").is_ok(), "pin was released");
}
