//! End-to-end boot cycles: producers → queues → reporters → console,
//! alarm → indicator, supervisor → sleep request.

use std::time::Duration;

use envnode::app::ports::{ClimateReading, PowerPort};
use envnode::error::SensorError;
use envnode::power::{SimulatedPower, WakeReason};
use envnode::retained::RetainedCounters;
use envnode::runtime::{run_boot_cycle, NodeHardware};

use crate::mock_hw::{
    fast_config, FixedClock, FixedLight, MockPin, RecordingConsole, ScriptedClimate, NOON,
};

fn fresh_counters() -> RetainedCounters {
    let c = RetainedCounters::new();
    c.restore(WakeReason::PowerOn);
    c
}

#[test]
fn hot_humid_bright_raises_alarm() {
    let counters = fresh_counters();
    let console = RecordingConsole::new();
    let mut climate = ScriptedClimate::steady(25.0, 75.0);
    let mut light = FixedLight::new(600);
    let mut clock = FixedClock::new(NOON);
    let mut pin = MockPin::new();

    let hw = NodeHardware {
        climate: &mut climate,
        light: &mut light,
        clock: &mut clock,
        indicator: &mut pin,
        console: &console,
    };
    let req = run_boot_cycle(hw, &counters, &fast_config(300));

    assert_eq!(req.duration, Duration::from_secs(30));
    assert!(console.contains("Temp: 25.00 C - Hum: 75.00%"));
    assert!(console.contains("Luz: 600"));
    assert!(console.contains("Fecha: 01/01/2024 - Hora: 12:00:00"));
    assert!(pin.pulses() >= 1, "levels: {:?}", pin.levels);
    assert_eq!(pin.levels.first(), Some(&true));
    for w in pin.levels.windows(2) {
        assert_ne!(w[0], w[1], "indicator levels must alternate");
    }
    let hold = Duration::from_millis(15);
    for width in pin.pulse_widths() {
        assert!(width >= hold, "pulse shorter than hold time: {:?}", width);
    }
}

#[test]
fn mild_dark_conditions_never_touch_indicator() {
    let counters = fresh_counters();
    let console = RecordingConsole::new();
    let mut climate = ScriptedClimate::steady(20.0, 30.0);
    let mut light = FixedLight::new(100);
    let mut clock = FixedClock::new(NOON);
    let mut pin = MockPin::new();

    let hw = NodeHardware {
        climate: &mut climate,
        light: &mut light,
        clock: &mut clock,
        indicator: &mut pin,
        console: &console,
    };
    run_boot_cycle(hw, &counters, &fast_config(300));

    assert!(console.contains("Temp: 20.00 C - Hum: 30.00%"));
    assert!(console.contains("Luz: 100"));
    assert!(pin.levels.is_empty());
}

#[test]
fn failed_climate_reads_print_nothing_for_them() {
    let counters = fresh_counters();
    let console = RecordingConsole::new();
    let failures = vec![Err(SensorError::Checksum); 1000];
    let mut climate = ScriptedClimate::steady(0.0, 0.0).with_script(failures);
    let mut light = FixedLight::new(100);
    let mut clock = FixedClock::new(NOON);
    let mut pin = MockPin::new();

    let hw = NodeHardware {
        climate: &mut climate,
        light: &mut light,
        clock: &mut clock,
        indicator: &mut pin,
        console: &console,
    };
    run_boot_cycle(hw, &counters, &fast_config(200));

    assert!(climate.reads > 1);
    assert_eq!(console.count_prefix("Temp:"), 0);
    assert!(console.contains("Luz: 100"));
}

#[test]
fn frames_carry_latest_values() {
    let counters = fresh_counters();
    let console = RecordingConsole::new();
    let mut climate = ScriptedClimate::steady(20.0, 30.0);
    let mut light = FixedLight::new(123);
    let mut clock = FixedClock::new(NOON);
    let mut pin = MockPin::new();

    let hw = NodeHardware {
        climate: &mut climate,
        light: &mut light,
        clock: &mut clock,
        indicator: &mut pin,
        console: &console,
    };
    run_boot_cycle(hw, &counters, &fast_config(400));

    let frames: Vec<String> = console
        .lines()
        .into_iter()
        .filter(|l| l.starts_with("01/01/2024 12:00:00, Temp: "))
        .collect();
    assert!(!frames.is_empty(), "no frame printed: {:?}", console.lines());
    for f in &frames {
        assert!(f.len() <= 100);
    }
    // Once a field is known it never reverts to unknown.
    let i = frames
        .iter()
        .position(|f| !f.contains("--"))
        .unwrap_or_else(|| panic!("no complete frame: {:?}", frames));
    assert!(frames[i..].iter().all(|f| !f.contains("--")));
    assert!(frames[i..].contains(&"01/01/2024 12:00:00, Temp: 20.00 C, Hum: 30.00%, Luz: 123".to_string()));
}

#[test]
fn supervisor_lines_bracket_the_cycle() {
    let counters = fresh_counters();
    let console = RecordingConsole::new();
    let mut climate = ScriptedClimate::steady(20.0, 30.0);
    let mut light = FixedLight::new(0);
    let mut clock = FixedClock::new(NOON);
    let mut pin = MockPin::new();

    let hw = NodeHardware {
        climate: &mut climate,
        light: &mut light,
        clock: &mut clock,
        indicator: &mut pin,
        console: &console,
    };
    run_boot_cycle(hw, &counters, &fast_config(50));

    let lines = console.lines();
    let pos = |s: &str| lines.iter().position(|l| l == s);
    let start = pos("Reinicio número: 1").expect("wake line");
    let alive = pos("Sistema en ejecución...").expect("liveness line");
    let sleep = pos("Entrando en Deep Sleep...").expect("sleep line");
    assert!(start < alive && alive < sleep);
    assert!(console.contains("Contador: 0"));
}

#[test]
fn nothing_runs_after_the_cycle_returns() {
    let counters = fresh_counters();
    let console = RecordingConsole::new();
    let mut climate = ScriptedClimate::steady(25.0, 75.0);
    let mut light = FixedLight::new(600);
    let mut clock = FixedClock::new(NOON);
    let mut pin = MockPin::new();

    let hw = NodeHardware {
        climate: &mut climate,
        light: &mut light,
        clock: &mut clock,
        indicator: &mut pin,
        console: &console,
    };
    run_boot_cycle(hw, &counters, &fast_config(100));

    let printed = console.lines().len();
    let light_reads = light.reads;
    std::thread::sleep(Duration::from_millis(60));
    assert_eq!(console.lines().len(), printed);
    assert_eq!(light.reads, light_reads);
    assert_eq!(console.lines().last().map(String::as_str), Some("Entrando en Deep Sleep..."));
}

#[test]
fn counters_survive_timer_wake_only() {
    let counters = RetainedCounters::new();
    let mut power = SimulatedPower::new();
    let cfg = fast_config(30);

    for expected_wake in 1..=2u32 {
        counters.restore(power.wake_reason());
        counters.on_button_edge(true, true);

        let console = RecordingConsole::new();
        let mut climate = ScriptedClimate::steady(20.0, 30.0);
        let mut light = FixedLight::new(0);
        let mut clock = FixedClock::new(NOON);
        let mut pin = MockPin::new();
        let hw = NodeHardware {
            climate: &mut climate,
            light: &mut light,
            clock: &mut clock,
            indicator: &mut pin,
            console: &console,
        };
        let req = run_boot_cycle(hw, &counters, &cfg);

        assert!(console.contains(&format!("Reinicio número: {}", expected_wake)));
        assert_eq!(counters.wake_count(), expected_wake);
        assert_eq!(counters.press_count(), expected_wake);
        power.enter_deep_sleep(req.duration);
    }

    // A power-on boot starts from scratch.
    counters.restore(WakeReason::PowerOn);
    assert_eq!(counters.wake_count(), 0);
    assert_eq!(counters.press_count(), 0);
}

#[test]
fn presses_during_cycle_are_all_counted() {
    const PRESSES: u32 = 25;
    let counters = fresh_counters();
    let console = RecordingConsole::new();
    let mut climate = ScriptedClimate::steady(20.0, 30.0);
    let mut light = FixedLight::new(0);
    let mut clock = FixedClock::new(NOON);
    let mut pin = MockPin::new();

    std::thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..PRESSES {
                counters.on_button_edge(true, true);
                counters.on_button_edge(true, false);
                std::thread::sleep(Duration::from_millis(2));
            }
        });

        let hw = NodeHardware {
            climate: &mut climate,
            light: &mut light,
            clock: &mut clock,
            indicator: &mut pin,
            console: &console,
        };
        run_boot_cycle(hw, &counters, &fast_config(150));
    });

    assert_eq!(counters.press_count(), PRESSES);
    let reported: Vec<u32> = console
        .lines()
        .iter()
        .filter_map(|l| l.strip_prefix("Contador: "))
        .filter_map(|n| n.parse().ok())
        .collect();
    assert!(!reported.is_empty());
    assert!(reported.windows(2).all(|w| w[0] <= w[1]));
    assert!(reported.iter().all(|&n| n <= PRESSES));
}

#[test]
fn nan_reading_is_skipped_then_recovers() {
    let counters = fresh_counters();
    let console = RecordingConsole::new();
    let script = vec![Ok(ClimateReading { temperature_c: f32::NAN, humidity_pct: 50.0 })];
    let mut climate = ScriptedClimate::steady(22.0, 40.0).with_script(script);
    let mut light = FixedLight::new(0);
    let mut clock = FixedClock::new(NOON);
    let mut pin = MockPin::new();

    let hw = NodeHardware {
        climate: &mut climate,
        light: &mut light,
        clock: &mut clock,
        indicator: &mut pin,
        console: &console,
    };
    run_boot_cycle(hw, &counters, &fast_config(300));

    assert!(!console.lines().iter().any(|l| l.contains("NaN")));
    assert!(console.contains("Temp: 22.00 C - Hum: 40.00%"));
}
