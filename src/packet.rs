//! Received packet snapshot.

/// One successfully received, CRC-valid packet together with its signal
/// metrics. Produced by [`check_recv`](crate::LoRa::check_recv); plain
/// value type, holds no reference back into the driver.
#[derive(Copy, Clone)]
pub struct ReceivedPacket {
    /// Origin address byte. The chip's explicit-header mode carries no
    /// source address, so this is always 0.
    pub header_from: u8,
    buf: [u8; 255],
    len: u8,
    /// Raw packet RSSI register value
    pub rssi: u8,
    /// Packet SNR in dB, raw register value divided by 4.0.
    ///
    /// The datasheet specifies the SNR register as two's-complement, but
    /// the raw byte is deliberately taken as unsigned here, matching the
    /// established behavior of deployed nodes. Negative SNRs therefore read
    /// as values near 63.75.
    pub snr: f32,
}

impl ReceivedPacket {
    pub(crate) fn new(buf: [u8; 255], len: u8, rssi: u8, snr: f32) -> Self {
        Self {
            header_from: 0,
            buf,
            len,
            rssi,
            snr,
        }
    }

    /// The message payload.
    pub fn message(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl core::fmt::Debug for ReceivedPacket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ReceivedPacket {{header_from: {}, message: {:?}, rssi: {}, snr: {}}}",
            self.header_from,
            self.message(),
            self.rssi,
            self.snr,
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReceivedPacket {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "ReceivedPacket {{header_from: {}, message: {}, rssi: {}, snr: {}}}",
            self.header_from,
            self.message(),
            self.rssi,
            self.snr,
        )
    }
}
