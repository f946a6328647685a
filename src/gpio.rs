//! Stand-in pin for boards that leave the reset line unwired.

/// An output pin that goes nowhere. Pass `Option::<DisconnectedPin>::None`
/// as the reset pin when the chip's reset line is not under host control;
/// the driver then skips the hardware reset pulse.
pub struct DisconnectedPin;

impl embedded_hal::digital::ErrorType for DisconnectedPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for DisconnectedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
