//! Byte-level bring-up tests: scripts the exact SPI traffic and
//! chip-select edges of a full construction against mocked peripherals.

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

use sx127x_lora::{Config, LoRa, Mode};

/// One chip-select envelope per register transaction.
fn cs_cycles(n: usize) -> Vec<PinTransaction> {
    let mut cycles = Vec::with_capacity(n * 2);
    for _ in 0..n {
        cycles.push(PinTransaction::set(PinState::Low));
        cycles.push(PinTransaction::set(PinState::High));
    }
    cycles
}

/// The full register traffic of `LoRa::new` at 868.0 MHz / 14 dBm.
fn bringup_traffic() -> Vec<SpiTransaction<u8>> {
    vec![
        // version check
        SpiTransaction::write_vec(vec![0x42]),
        SpiTransaction::read_vec(vec![0x12]),
        // sleep
        SpiTransaction::write_vec(vec![0x81, 0x80]),
        // FIFO base addresses
        SpiTransaction::write_vec(vec![0x8F, 0x00]),
        SpiTransaction::write_vec(vec![0x8E, 0x00]),
        // carrier frequency: 868 MHz -> 0xD90000
        SpiTransaction::write_vec(vec![0x86, 0xD9]),
        SpiTransaction::write_vec(vec![0x87, 0x00]),
        SpiTransaction::write_vec(vec![0x88, 0x00]),
        // PA config: PA_BOOST | (14 - 2)
        SpiTransaction::write_vec(vec![0x89, 0x8C]),
        // LowDataRateOptimize
        SpiTransaction::write_vec(vec![0xA6, 0x04]),
        // standby, then arm receive
        SpiTransaction::write_vec(vec![0x81, 0x81]),
        SpiTransaction::write_vec(vec![0x81, 0x86]),
    ]
}

#[test]
fn bringup_writes_the_datasheet_values() {
    let mut spi = SpiMock::new(&bringup_traffic());
    let mut nss = PinMock::new(&cs_cycles(11));

    let conf = Config {
        frequency: 868.0,
        tx_power: 14,
        ..Config::new(0x42)
    };
    let lora = LoRa::new(spi.clone(), nss.clone(), Option::<PinMock>::None, NoopDelay, conf)
        .expect("bring-up failed");

    assert_eq!(lora.mode(), Mode::RxSingle);
    assert_eq!(lora.address(), 0x42);
    assert_eq!(lora.frequency(), 868.0);
    assert!(!lora.ack_mode());

    drop(lora);
    spi.done();
    nss.done();
}

#[test]
fn retuning_rewrites_the_frequency_registers() {
    let mut traffic = bringup_traffic();
    // 915 MHz -> 0xE4C000
    traffic.push(SpiTransaction::write_vec(vec![0x86, 0xE4]));
    traffic.push(SpiTransaction::write_vec(vec![0x87, 0xC0]));
    traffic.push(SpiTransaction::write_vec(vec![0x88, 0x00]));

    let mut spi = SpiMock::new(&traffic);
    let mut nss = PinMock::new(&cs_cycles(14));

    let mut lora = LoRa::new(
        spi.clone(),
        nss.clone(),
        Option::<PinMock>::None,
        NoopDelay,
        Config::default(),
    )
    .expect("bring-up failed");

    lora.set_frequency(915.0).expect("retune failed");
    assert_eq!(lora.frequency(), 915.0);

    drop(lora);
    spi.done();
    nss.done();
}
