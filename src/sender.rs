//! Built-in sender
//! If you want to drive a different wiring, you will need to implement [`SendCommand`] trait

use embedded_hal::delay::DelayNs;

use crate::command::{Command, State};

pub(crate) mod i2c_sender;

pub use i2c_sender::I2cSender;

/// [`SendCommand`] is the trait a sender should implement to communicate with the hardware
///
/// A sender owns the physical lines: it splits a [`Command`] into whatever
/// the wiring needs, pulses Enable, and keeps the backlight line asserted.
pub trait SendCommand {
    /// Error reported by the underlying bus
    type Error;

    /// Put one [`Command`] on the wire, including the enable pulse and the
    /// time the controller needs to latch it
    fn send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut impl DelayNs,
    ) -> Result<(), Self::Error>;

    /// Wait specific duration, and send command
    fn delay_and_send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut impl DelayNs,
        delay_us: u32,
    ) -> Result<(), Self::Error> {
        delayer.delay_us(delay_us);
        self.send(command, delayer)
    }

    /// Drive every control and data line low, leaving only the backlight as it is
    fn idle(&mut self) -> Result<(), Self::Error>;

    /// The last backlight state requested
    fn get_backlight(&self) -> State;

    /// Set the backlight
    ///
    /// Note:
    /// The new state is kept even if writing it to the hardware fails,
    /// it will ride along with the next successful write.
    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error>;
}
