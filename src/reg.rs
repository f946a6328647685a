//! SX127x register map and operating modes, LoRa page (datasheet chapter 6).

/// Crystal oscillator frequency in Hz. The PLL step is `F_XOSC / 2^19`,
/// about 61.035 Hz.
pub const F_XOSC: f64 = 32_000_000.0;

/// Silicon revision reported by the version register on every SX127x part.
pub const EXPECTED_VERSION: u8 = 0x12;

/// Long-range (LoRa) mode bit of the op-mode register. Always OR-ed into
/// mode writes; this driver never puts the chip in legacy FSK mode.
pub const LONG_RANGE_MODE: u8 = 0x80;

/// PA_BOOST output path select bit of the PA config register.
pub const PA_BOOST: u8 = 0x80;

/// Every LoRa-page register this driver touches. The values are 7-bit
/// addresses; bit 7 is the read/write discriminator on the wire and never
/// part of the address.
#[allow(dead_code)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// FIFO read/write port. The chip increments its internal pointer on
    /// every access.
    Fifo = 0x00,
    /// Operating mode, combined with the long-range mode bit
    OpMode = 0x01,
    /// Carrier frequency, most significant byte
    FrfMsb = 0x06,
    /// Carrier frequency, middle byte
    FrfMid = 0x07,
    /// Carrier frequency, least significant byte
    FrfLsb = 0x08,
    /// Power amplifier output path and level
    PaConfig = 0x09,
    /// FIFO access pointer
    FifoAddrPtr = 0x0D,
    /// Base address of the transmit buffer within the FIFO
    FifoTxBaseAddr = 0x0E,
    /// Base address of the receive buffer within the FIFO
    FifoRxBaseAddr = 0x0F,
    /// Start address of the last packet received
    FifoRxCurrentAddr = 0x10,
    /// IRQ flags, write-1-to-clear
    IrqFlags = 0x12,
    /// Number of payload bytes of the last packet received
    RxNbBytes = 0x13,
    /// SNR of the last packet received, in quarter dB
    PktSnrValue = 0x19,
    /// RSSI of the last packet received
    PktRssiValue = 0x1A,
    /// Payload length for transmission
    PayloadLength = 0x22,
    /// LowDataRateOptimize and AGC control
    ModemConfig3 = 0x26,
    /// DIO0..DIO3 pin mapping
    DioMapping1 = 0x40,
    /// Silicon revision
    Version = 0x42,
    /// High power (+20 dBm) PA control
    PaDac = 0x4D,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Chip operating modes, as written to the op-mode register. Only the four
/// modes the driver cycles through are represented.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Sleep = 0x00,
    Standby = 0x01,
    Tx = 0x03,
    RxSingle = 0x06,
}

impl Mode {
    /// The full op-mode register value for this mode.
    pub const fn bits(self) -> u8 {
        LONG_RANGE_MODE | self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_bits_include_long_range() {
        assert_eq!(Mode::Sleep.bits(), 0x80);
        assert_eq!(Mode::Standby.bits(), 0x81);
        assert_eq!(Mode::Tx.bits(), 0x83);
        assert_eq!(Mode::RxSingle.bits(), 0x86);
    }

    #[test]
    fn register_addresses_fit_seven_bits() {
        assert_eq!(Register::Version.addr(), 0x42);
        assert_eq!(Register::PaDac.addr() & 0x80, 0);
    }
}
