//! Error types.

/// An error on the SPI bus itself. Bus faults are not recoverable at the
/// driver level; they abort the current operation.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError<TSPIERR> {
    Write(TSPIERR),
    Transfer(TSPIERR),
}

/// An error driving one of the GPIO lines.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError<TPINERR> {
    Output(TPINERR),
}

/// Anything that can go wrong talking to the radio.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<TSPIERR, TPINERR> {
    Spi(SpiError<TSPIERR>),
    Pin(PinError<TPINERR>),
    /// The version register did not read back `0x12`. Either no SX127x is
    /// wired up, or the bus is misconfigured. Carries the value read.
    InvalidVersion(u8),
    /// The payload does not fit the chip's 255-byte length register.
    PayloadTooLong(usize),
    /// TxDone never rose within the poll budget passed to
    /// [`transmit_timeout`](crate::LoRa::transmit_timeout).
    TxTimeout,
}

impl<TSPIERR, TPINERR> From<SpiError<TSPIERR>> for Error<TSPIERR, TPINERR> {
    fn from(err: SpiError<TSPIERR>) -> Self {
        Error::Spi(err)
    }
}

impl<TSPIERR, TPINERR> From<PinError<TPINERR>> for Error<TSPIERR, TPINERR> {
    fn from(err: PinError<TPINERR>) -> Self {
        Error::Pin(err)
    }
}
