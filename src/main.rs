//! EnvNode Firmware — Main Entry Point
//!
//! One boot is one awake period. Deep sleep ends every boot; the wake
//! timer starts the next one from the top of `main()`.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  Drivers / adapters                                            │
//! │  Dht11  AdcLight  Ds3231  GpioIndicator  SerialConsole         │
//! │  DeepSleep  button ISR ──▶ RETAINED (RTC slow memory)          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  runtime::run_boot_cycle                                       │
//! │   elevated tier: AlarmActuator                                 │
//! │   baseline tier: producers · Reporter · FrameBuilder ·         │
//! │                  FrameReporter · PressReporter · Supervisor    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info};

use envnode::adapters::console::SerialConsole;
use envnode::app::ports::PowerPort;
use envnode::config::NodeConfig;
use envnode::drivers::dht11::Dht11;
use envnode::drivers::ds3231::Ds3231;
use envnode::drivers::hw_init;
use envnode::drivers::indicator::GpioIndicator;
use envnode::drivers::light::AdcLight;
use envnode::pins;
use envnode::power::DeepSleep;
use envnode::retained::RETAINED;
use envnode::runtime::{self, NodeHardware};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  EnvNode v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = NodeConfig::from_override(option_env!("ENVNODE_CONFIG"));

    // ── 2. Wake reason + retained counters ────────────────────
    let mut power = DeepSleep;
    let wake_reason = power.wake_reason();
    let kept = RETAINED.restore(wake_reason);
    info!(
        "Boot: {:?}, retained counters {} (presses={}, wakes={})",
        wake_reason,
        if kept { "kept" } else { "reset" },
        RETAINED.press_count(),
        RETAINED.wake_count()
    );

    // ── 3. Peripherals ────────────────────────────────────────
    init_board()?;

    let peripherals = Peripherals::take()?;
    // I2C0: SDA on GPIO 21, SCL on GPIO 22.
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;

    // ── 4. RTC bring-up ───────────────────────────────────────
    let console = SerialConsole::new();
    let mut rtc = Ds3231::new(i2c);
    if let Err(e) = runtime::bring_up_clock(&mut rtc, &console, &runtime::build_time()) {
        error!("RTC bring-up failed: {} — halting", e);
        halt();
    }

    // ── 5. Awake period ───────────────────────────────────────
    let hw = NodeHardware {
        climate: Dht11::new(pins::DHT_GPIO),
        light: AdcLight::new(pins::LDR_ADC_CHANNEL),
        clock: rtc,
        indicator: GpioIndicator::new(pins::LED_GPIO),
        console,
    };
    let request = runtime::run_boot_cycle(hw, &RETAINED, &config);

    // ── 6. Deep sleep (does not return) ───────────────────────
    power.enter_deep_sleep(request.duration);
    Ok(())
}

/// Raw-sys peripheral setup and the button ISR.
fn init_board() -> envnode::error::Result<()> {
    hw_init::init_peripherals()?;
    hw_init::init_isr_service()?;
    Ok(())
}

/// Park the main task forever. Used when the node cannot run without a
/// missing peripheral.
fn halt() -> ! {
    loop {
        FreeRtos::delay_ms(1000);
    }
}
