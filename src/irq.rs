//! IRQ flags register contents.

/// The IRQ bits this driver reacts to. Writing a bit back to the flags
/// register clears it (write-1-to-clear).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqMaskBit {
    TxDone = 0x08,
    PayloadCrcError = 0x20,
    RxDone = 0x40,
}

/// A snapshot of the IRQ flags register.
#[derive(Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqFlags {
    inner: u8,
}

impl From<u8> for IrqFlags {
    fn from(flags: u8) -> Self {
        Self { inner: flags }
    }
}

impl From<IrqFlags> for u8 {
    fn from(flags: IrqFlags) -> Self {
        flags.inner
    }
}

impl IrqFlags {
    pub fn tx_done(self) -> bool {
        (self.inner & IrqMaskBit::TxDone as u8) > 0
    }

    pub fn rx_done(self) -> bool {
        (self.inner & IrqMaskBit::RxDone as u8) > 0
    }

    pub fn crc_error(self) -> bool {
        (self.inner & IrqMaskBit::PayloadCrcError as u8) > 0
    }

    /// The raw register value, as read.
    pub fn bits(self) -> u8 {
        self.inner
    }
}

impl core::fmt::Debug for IrqFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "IrqFlags {{inner: {:#010b}, tx_done: {}, rx_done: {}, crc_error: {}}}",
            self.inner,
            self.tx_done(),
            self.rx_done(),
            self.crc_error(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_mask_bits() {
        let flags = IrqFlags::from(0x48);
        assert!(flags.tx_done());
        assert!(flags.rx_done());
        assert!(!flags.crc_error());

        let flags = IrqFlags::from(0x60);
        assert!(!flags.tx_done());
        assert!(flags.rx_done());
        assert!(flags.crc_error());
    }

    #[test]
    fn bits_round_trip() {
        assert_eq!(IrqFlags::from(0xA5).bits(), 0xA5);
    }
}
