//! Chip-select handling.
//!
//! The SX127x frames every register transaction with the NSS line: pulled
//! low before the address byte, raised again after the last data byte.
//! [`SlaveSelect::select`] returns a guard that owns the bus for exactly one
//! transaction and raises NSS on drop, so two transactions can never
//! interleave on the same bus instance.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::err::{PinError, SpiError};

pub struct SlaveSelect<TNSS: OutputPin> {
    nss: TNSS,
}

impl<TNSS: OutputPin> SlaveSelect<TNSS> {
    pub fn new(nss: TNSS) -> Self {
        Self { nss }
    }

    pub fn select<'spi, TSPI: SpiBus>(
        &'spi mut self,
        spi: &'spi mut TSPI,
    ) -> Result<SlaveSelectGuard<'spi, TNSS, TSPI>, PinError<TNSS::Error>> {
        self.nss.set_low().map_err(PinError::Output)?;
        Ok(SlaveSelectGuard {
            nss: &mut self.nss,
            spi,
        })
    }

    pub fn free(self) -> TNSS {
        self.nss
    }
}

pub struct SlaveSelectGuard<'spi, TNSS: OutputPin, TSPI: SpiBus> {
    nss: &'spi mut TNSS,
    spi: &'spi mut TSPI,
}

impl<TNSS: OutputPin, TSPI: SpiBus> SlaveSelectGuard<'_, TNSS, TSPI> {
    pub fn write(&mut self, words: &[u8]) -> Result<(), SpiError<TSPI::Error>> {
        self.spi.write(words).map_err(SpiError::Write)
    }

    pub fn read(&mut self, words: &mut [u8]) -> Result<(), SpiError<TSPI::Error>> {
        self.spi.read(words).map_err(SpiError::Transfer)
    }
}

impl<TNSS: OutputPin, TSPI: SpiBus> Drop for SlaveSelectGuard<'_, TNSS, TSPI> {
    fn drop(&mut self) {
        let _ = self.nss.set_high();
    }
}
