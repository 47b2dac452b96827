//! Quadstep - Four-Line Output Sequencer Firmware
//!
//! Drives four GPIO lines through single-high patterns (sweep right,
//! sweep left or shuffle) at a configurable period. Mode and period can
//! be read and changed live over UART0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use quadstep_core::config::{parse_config, SequencerConfig};
use quadstep_drivers::output::{HalLine, LineBank};
use quadstep_hal::LineAllocator;

use crate::channels::CONTROL;

/// Embedded startup configuration (compiled into firmware)
/// Edit sequencer.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../sequencer.toml");

mod board;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 128]> = StaticCell::new();

// Holds the instance name the control task borrows
static CONFIG: StaticCell<SequencerConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Quadstep firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static SequencerConfig = CONFIG.init(load_config());
    CONTROL.set_mode(config.mode());
    CONTROL.set_period(config.period_ms());
    info!(
        "Instance {}: mode={} period={}ms",
        config.name(),
        config.mode().as_token(),
        config.period_ms()
    );

    // Lines start low; the bank then drives the startup pattern
    let lines = [
        HalLine::new(Output::new(p.PIN_5, Level::Low)),
        HalLine::new(Output::new(p.PIN_6, Level::Low)),
        HalLine::new(Output::new(p.PIN_13, Level::Low)),
        HalLine::new(Output::new(p.PIN_19, Level::Low)),
    ];
    let mut allocator = LineAllocator::new();
    let bank = match LineBank::initialize(lines, board::LINE_IDS, &mut allocator, config.startup())
    {
        Ok(bank) => bank,
        Err(e) => {
            error!("Output bank initialization failed: {:?}", Debug2Format(&e));
            return;
        }
    };
    info!("Output lines {} claimed", board::LINE_IDS);

    // Setup UART for the control link
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 128]);
    let rx_buf = RX_BUF.init([0u8; 128]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for control link");

    spawner.spawn(tasks::event_task()).unwrap();
    spawner
        .spawn(tasks::sequencer_task(bank, allocator))
        .unwrap();
    spawner
        .spawn(tasks::control_task(rx, tx, config.name()))
        .unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded configuration
///
/// Falls back to defaults if sequencer.toml is broken. build.rs rejects
/// such a file, so this only happens if the two checks disagree.
fn load_config() -> SequencerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            SequencerConfig::default()
        }
    }
}
