//! # sx127x-lora
//!
//! A platform-agnostic driver for the Semtech SX127x family of LoRa
//! transceivers, built on the `embedded-hal` 1.0 traits. The chip is
//! connected over SPI (mode 0, up to 5 MHz) with a dedicated chip-select
//! line and an optional hardware-reset line.
//!
//! The driver is strictly synchronous: [`LoRa::transmit`] blocks until the
//! chip reports TxDone, and reception is polled through
//! [`LoRa::check_recv`], which the host's own loop is expected to call
//! periodically. Receive mode is single-shot; the transmit path re-arms it,
//! the CRC-discard path deliberately does not (see `check_recv`).
//!
//! ```ignore
//! use sx127x_lora::{Config, DisconnectedPin, LoRa};
//!
//! let conf = Config {
//!     frequency: 868.0,
//!     tx_power: 14,
//!     ..Config::new(0x42)
//! };
//! let mut lora = LoRa::new(spi, nss_pin, Option::<DisconnectedPin>::None, delay, conf)?;
//!
//! lora.transmit(b"hello")?;
//! loop {
//!     if let Some(packet) = lora.check_recv()? {
//!         defmt::info!("{}", packet);
//!         lora.set_mode(sx127x_lora::Mode::RxSingle)?;
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod conf;
pub(crate) mod err;
pub mod gpio;
pub mod irq;
pub mod packet;
pub mod reg;
mod slave_select;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

pub use conf::{Config, SpiConfig, SPI_CLOCK_HZ, SPI_MODE};
pub use err::{Error, PinError, SpiError};
pub use gpio::DisconnectedPin;
pub use irq::{IrqFlags, IrqMaskBit};
pub use packet::ReceivedPacket;
pub use reg::{Mode, Register};

use reg::{EXPECTED_VERSION, F_XOSC, PA_BOOST};
use slave_select::SlaveSelect;

/// Callback invoked synchronously from [`LoRa::check_recv`] for every
/// CRC-valid packet.
pub type ReceiveCallback = fn(&ReceivedPacket);

/// Calculates the carrier frequency register value for the given frequency
/// in MHz.
///
/// The PLL steps in increments of `F_XOSC / 2^19` (~61.035 Hz); the product
/// is truncated, not rounded, to stay bit-compatible with the datasheet
/// formula `Frf = freq / F_XOSC * 2^19`.
pub fn calc_frf(freq_mhz: f32) -> u32 {
    (freq_mhz as f64 * 1_000_000.0 / F_XOSC * (1u64 << 19) as f64) as u32
}

/// Calculates the PA config register value for the given output power in
/// dBm. Levels are clamped to the PA_BOOST path's 2..=17 dBm range.
pub fn calc_pa_config(level: u8) -> u8 {
    let level = level.clamp(2, 17);
    PA_BOOST | (level - 2)
}

/// Wrapper around a Semtech SX127x LoRa transceiver.
///
/// Owns the SPI bus, the chip-select pin, the optional reset pin and a
/// delay provider for its whole lifetime. Not designed for concurrent use;
/// callers serialize all operations on the handle themselves.
pub struct LoRa<TSPI, TNSS: OutputPin, TNRST, TDELAY> {
    spi: TSPI,
    slave_select: SlaveSelect<TNSS>,
    nrst_pin: Option<TNRST>,
    delay: TDELAY,
    address: u8,
    frequency: f32,
    acks: bool,
    mode: Mode,
    on_recv: Option<ReceiveCallback>,
}

impl<TSPI, TNSS, TNRST, TDELAY, TSPIERR, TPINERR> LoRa<TSPI, TNSS, TNRST, TDELAY>
where
    TSPI: SpiBus<u8, Error = TSPIERR>,
    TNSS: OutputPin<Error = TPINERR>,
    TNRST: OutputPin<Error = TPINERR>,
    TDELAY: DelayNs,
{
    /// Brings the radio out of reset into a fully configured, receive-armed
    /// state.
    ///
    /// Pulses the reset line if one was supplied, verifies the chip's
    /// version register, programs frequency and power with the chip held in
    /// sleep, and finally arms single-shot receive mode. Fails with
    /// [`Error::InvalidVersion`] if no SX127x answers; no further register
    /// write is issued in that case and the handle is never constructed.
    pub fn new(
        spi: TSPI,
        nss_pin: TNSS,
        nrst_pin: Option<TNRST>,
        delay: TDELAY,
        conf: Config,
    ) -> Result<Self, Error<TSPIERR, TPINERR>> {
        let mut lora = Self {
            spi,
            slave_select: SlaveSelect::new(nss_pin),
            nrst_pin,
            delay,
            address: conf.address,
            frequency: conf.frequency,
            acks: conf.acks,
            mode: Mode::Sleep,
            on_recv: None,
        };

        lora.reset()?;
        lora.check_version()?;
        lora.setup_radio(conf.frequency, conf.tx_power)?;
        lora.set_mode(Mode::RxSingle)?;
        Ok(lora)
    }

    /// Pulse the reset line low for 10 ms, then give the chip 10 ms to
    /// boot. Skipped when no reset line is wired; the chip is then assumed
    /// to already be in a valid state.
    fn reset(&mut self) -> Result<(), Error<TSPIERR, TPINERR>> {
        if let Some(nrst) = self.nrst_pin.as_mut() {
            nrst.set_low().map_err(PinError::Output)?;
            self.delay.delay_ms(10);
            nrst.set_high().map_err(PinError::Output)?;
            self.delay.delay_ms(10);
        }
        Ok(())
    }

    fn check_version(&mut self) -> Result<(), Error<TSPIERR, TPINERR>> {
        let version = self.read_register(Register::Version)?;
        if version != EXPECTED_VERSION {
            return Err(Error::InvalidVersion(version));
        }
        Ok(())
    }

    /// Initial radio configuration, chapter 6.4 of the datasheet. The
    /// frequency and power registers are only writable outside active
    /// RX/TX, so the chip is forced to sleep first.
    fn setup_radio(&mut self, frequency: f32, tx_power: u8) -> Result<(), Error<TSPIERR, TPINERR>> {
        self.set_mode(Mode::Sleep)?;
        // RX and TX share the 256-byte FIFO, both based at offset 0
        self.write_register(Register::FifoRxBaseAddr, 0)?;
        self.write_register(Register::FifoTxBaseAddr, 0)?;
        self.set_frequency(frequency)?;
        self.set_tx_power(tx_power)?;
        // LowDataRateOptimize, fixed modem configuration
        self.write_register(Register::ModemConfig3, 0x04)?;
        self.set_mode(Mode::Standby)
    }

    /// Set the carrier frequency in MHz.
    pub fn set_frequency(&mut self, freq_mhz: f32) -> Result<(), Error<TSPIERR, TPINERR>> {
        let frf = calc_frf(freq_mhz);
        self.write_register(Register::FrfMsb, (frf >> 16) as u8)?;
        self.write_register(Register::FrfMid, (frf >> 8) as u8)?;
        self.write_register(Register::FrfLsb, frf as u8)?;
        self.frequency = freq_mhz;
        Ok(())
    }

    /// Set the transmit power in dBm on the PA_BOOST output path, clamped
    /// to 2..=17. The RFO path is not supported.
    pub fn set_tx_power(&mut self, level: u8) -> Result<(), Error<TSPIERR, TPINERR>> {
        self.write_register(Register::PaConfig, calc_pa_config(level))
    }

    /// Write the operating-mode register. All transitions are a single
    /// register write; the handle only tracks the last mode written.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error<TSPIERR, TPINERR>> {
        self.write_register(Register::OpMode, mode.bits())?;
        self.mode = mode;
        Ok(())
    }

    /// The last operating mode written to the chip.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The configured carrier frequency in MHz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// This node's address byte. Stored only; received packets are not
    /// filtered by it.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Whether acknowledgement mode was requested. Currently inert.
    pub fn ack_mode(&self) -> bool {
        self.acks
    }

    /// Register or replace the receive callback. The callback is invoked
    /// synchronously from [`check_recv`](Self::check_recv), never
    /// concurrently with the handle's own operations.
    pub fn on_recv(&mut self, callback: Option<ReceiveCallback>) {
        self.on_recv = callback;
    }

    /// Transmit a payload of up to 255 bytes and block until the chip
    /// reports TxDone, then re-arm single-shot receive mode.
    ///
    /// The TxDone wait is an unbounded busy-loop: a chip that never raises
    /// the flag (miswired bus, hardware fault) hangs the calling thread
    /// forever. Use [`transmit_timeout`](Self::transmit_timeout) to bound
    /// the wait.
    pub fn transmit(&mut self, payload: &[u8]) -> Result<(), Error<TSPIERR, TPINERR>> {
        self.transmit_inner(payload, None)
    }

    /// Like [`transmit`](Self::transmit), but gives up with
    /// [`Error::TxTimeout`] after `max_polls` reads of the IRQ-flags
    /// register without TxDone. The chip is left in TX mode in that case;
    /// recovery is the caller's decision.
    pub fn transmit_timeout(
        &mut self,
        payload: &[u8],
        max_polls: u32,
    ) -> Result<(), Error<TSPIERR, TPINERR>> {
        self.transmit_inner(payload, Some(max_polls))
    }

    fn transmit_inner(
        &mut self,
        payload: &[u8],
        max_polls: Option<u32>,
    ) -> Result<(), Error<TSPIERR, TPINERR>> {
        if payload.len() > 255 {
            return Err(Error::PayloadTooLong(payload.len()));
        }

        self.set_mode(Mode::Standby)?;
        self.write_register(Register::FifoAddrPtr, 0)?;
        // The chip auto-increments its FIFO pointer on every port access
        for &byte in payload {
            self.write_register(Register::Fifo, byte)?;
        }
        self.write_register(Register::PayloadLength, payload.len() as u8)?;
        self.set_mode(Mode::Tx)?;

        let mut polls = 0u32;
        loop {
            if self.read_irq_flags()?.tx_done() {
                break;
            }
            if let Some(max) = max_polls {
                polls += 1;
                if polls >= max {
                    return Err(Error::TxTimeout);
                }
            }
            core::hint::spin_loop();
        }

        self.write_register(Register::IrqFlags, IrqMaskBit::TxDone as u8)?;
        self.set_mode(Mode::RxSingle)
    }

    /// Poll for a received packet. Non-blocking: one IRQ-flags read plus,
    /// on success, the FIFO extraction.
    ///
    /// Returns at most one packet per call and never fails on a CRC error:
    /// a corrupt packet is silently discarded with only its CrcError flag
    /// cleared, and the mode register is left untouched on that path, so a
    /// caller wanting another reception after a CRC discard re-arms
    /// [`Mode::RxSingle`] itself. Receive mode is single-shot in general;
    /// this method does not re-arm it.
    pub fn check_recv(&mut self) -> Result<Option<ReceivedPacket>, Error<TSPIERR, TPINERR>> {
        let flags = self.read_irq_flags()?;

        if !flags.rx_done() {
            // W1C: writing back a value with no bits of interest set is a
            // harmless no-op
            self.write_register(Register::IrqFlags, flags.bits())?;
            return Ok(None);
        }

        if flags.crc_error() {
            self.write_register(Register::IrqFlags, IrqMaskBit::PayloadCrcError as u8)?;
            return Ok(None);
        }

        let packet = self.read_payload()?;
        if let Some(on_recv) = self.on_recv {
            on_recv(&packet);
        }
        self.write_register(Register::IrqFlags, flags.bits())?;
        Ok(Some(packet))
    }

    fn read_payload(&mut self) -> Result<ReceivedPacket, Error<TSPIERR, TPINERR>> {
        let current_addr = self.read_register(Register::FifoRxCurrentAddr)?;
        self.write_register(Register::FifoAddrPtr, current_addr)?;
        let len = self.read_register(Register::RxNbBytes)?;

        let mut buf = [0u8; 255];
        for slot in buf.iter_mut().take(len as usize) {
            *slot = self.read_register(Register::Fifo)?;
        }

        let rssi = self.read_register(Register::PktRssiValue)?;
        let snr = self.read_register(Register::PktSnrValue)? as f32 / 4.0;
        Ok(ReceivedPacket::new(buf, len, rssi, snr))
    }

    fn read_irq_flags(&mut self) -> Result<IrqFlags, Error<TSPIERR, TPINERR>> {
        Ok(self.read_register(Register::IrqFlags)?.into())
    }

    fn read_register(&mut self, register: Register) -> Result<u8, Error<TSPIERR, TPINERR>> {
        let mut guard = self.slave_select.select(&mut self.spi)?;
        guard.write(&[register.addr() & 0x7F])?;
        let mut buf = [0u8; 1];
        guard.read(&mut buf)?;
        Ok(buf[0])
    }

    fn write_register(
        &mut self,
        register: Register,
        value: u8,
    ) -> Result<(), Error<TSPIERR, TPINERR>> {
        let mut guard = self.slave_select.select(&mut self.spi)?;
        guard.write(&[register.addr() | 0x80, value])?;
        Ok(())
    }

    /// Consume the driver and release the bus, pins and delay provider.
    pub fn free(self) -> (TSPI, TNSS, Option<TNRST>, TDELAY) {
        (
            self.spi,
            self.slave_select.free(),
            self.nrst_pin,
            self.delay,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frf_matches_datasheet_formula() {
        // 868 MHz: 868e6 / 32e6 * 2^19
        assert_eq!(calc_frf(868.0), 0xD9_00_00);
        // 915 MHz, the other common ISM band
        assert_eq!(calc_frf(915.0), 0xE4_C0_00);
    }

    #[test]
    fn frf_truncates_rather_than_rounds() {
        // 433.92 MHz does not land on a PLL step; the fractional part is
        // dropped
        let frf = calc_frf(433.92);
        let f_hz = 433.92f32 as f64 * 1_000_000.0;
        let exact = f_hz / F_XOSC * (1u64 << 19) as f64;
        assert_eq!(frf, exact as u32);
        assert!((frf as f64) <= exact);
    }

    #[test]
    fn frf_inverse_within_one_pll_step() {
        let step = F_XOSC / (1u64 << 19) as f64;
        for &mhz in &[137.0f32, 433.92, 868.0, 868.1, 915.0, 1020.0] {
            let f_hz = mhz as f64 * 1_000_000.0;
            let back = calc_frf(mhz) as f64 * step;
            assert!((back - f_hz).abs() < step, "{mhz} MHz off by more than one step");
        }
    }

    #[test]
    fn pa_config_clamps_to_boost_range() {
        assert_eq!(calc_pa_config(14), 0x8C);
        assert_eq!(calc_pa_config(2), 0x80);
        assert_eq!(calc_pa_config(17), 0x8F);
        assert_eq!(calc_pa_config(1), calc_pa_config(2));
        assert_eq!(calc_pa_config(99), calc_pa_config(17));
    }
}
