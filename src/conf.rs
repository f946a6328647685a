//! Configuration parameters.

use embedded_hal::spi::{Mode, MODE_0};

/// SPI mode the SX127x speaks: clock polarity 0, phase 0.
pub const SPI_MODE: Mode = MODE_0;

/// SPI clock rate the chip is qualified for in this driver.
pub const SPI_CLOCK_HZ: u32 = 5_000_000;

/// A named SPI bus/pin assignment. The driver itself takes typed bus and
/// pin objects; these presets document which peripheral instance and pins
/// the host should wire them to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// SPI peripheral instance index
    pub bus: u8,
    pub sck: u8,
    pub mosi: u8,
    pub miso: u8,
}

impl SpiConfig {
    /// RP2040 SPI0 on GPIO 18/19/16
    pub const RP2_0: SpiConfig = SpiConfig {
        bus: 0,
        sck: 18,
        mosi: 19,
        miso: 16,
    };

    /// RP2040 SPI1 on GPIO 10/11/12
    pub const RP2_1: SpiConfig = SpiConfig {
        bus: 1,
        sck: 10,
        mosi: 11,
        miso: 12,
    };
}

/// Configuration parameters.
/// Used to initialize the LoRa radio in [`LoRa::new`](crate::LoRa::new).
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// SPI bus/pin preset the host wired the radio to
    pub spi_config: SpiConfig,
    /// GPIO number the chip's DIO0 interrupt output is wired to. Stored for
    /// the host's benefit; this polling driver never samples it.
    pub interrupt_pin: u8,
    /// This node's address byte. Stored in the handle, not used to filter
    /// received packets.
    pub address: u8,
    /// Carrier frequency in MHz
    pub frequency: f32,
    /// Transmit power in dBm, clamped to 2..=17 (PA_BOOST path)
    pub tx_power: u8,
    /// Acknowledgement mode. Stored, currently inert.
    pub acks: bool,
}

impl Config {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spi_config: SpiConfig::RP2_0,
            interrupt_pin: 20,
            address: 0,
            frequency: 868.0,
            tx_power: 14,
            acks: false,
        }
    }
}
