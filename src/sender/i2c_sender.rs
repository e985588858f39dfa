use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::{
    command::{Bits, Command, RegisterSelection, State},
    sender::SendCommand,
    utils::BitOps,
};

// I2C to parallel:
// P7 -> P0
// DB7/DB6/DB5/DB4/BL/EN/RW/RS
const RS_BIT: u8 = 0;
const EN_BIT: u8 = 2;
const BL_BIT: u8 = 3;

/// EN high time, datasheet asks for > 450ns
const ENABLE_PULSE_US: u32 = 1;
/// Time for the controller to execute a latched nibble, datasheet asks for > 37us
const COMMAND_SETTLE_US: u32 = 50;

/// Sender for the common PCF8574 backpack, LCD in 4-bit mode
///
/// Each nibble is presented on P4..P7, then latched with an enable pulse.
/// That is three one-byte I2C writes per nibble, six per byte. The expander
/// has no latch of its own for the backlight, so the backlight bit is part of
/// every byte written.
pub struct I2cSender<'a, I2cLcd: I2c> {
    i2c: &'a mut I2cLcd,
    addr: u8,
    backlight: State,
}

impl<'a, I2cLcd: I2c> I2cSender<'a, I2cLcd> {
    /// Create a sender for the expander at 7-bit address `addr`, backlight on
    pub fn new(i2c: &'a mut I2cLcd, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            backlight: State::On,
        }
    }

    fn backlight_bits(&self) -> u8 {
        let mut bits = 0u8;
        bits.put_bit(BL_BIT, self.backlight);
        bits
    }

    /// One bus transaction, one byte: the whole output state of the expander
    fn expander_write(&mut self, data: u8) -> Result<(), I2cLcd::Error> {
        let byte = data | self.backlight_bits();
        self.i2c.write(self.addr, &[byte])
    }

    fn pulse_enable(&mut self, data: u8, delayer: &mut impl DelayNs) -> Result<(), I2cLcd::Error> {
        let mut enabled = data;
        enabled.set_bit(EN_BIT);
        let mut disabled = data;
        disabled.clear_bit(EN_BIT);

        self.expander_write(enabled)?;
        delayer.delay_us(ENABLE_PULSE_US);

        self.expander_write(disabled)?;
        delayer.delay_us(COMMAND_SETTLE_US);

        Ok(())
    }

    /// `value` carries the nibble in its upper 4 bits, and RS in bit 0
    fn write_4bits(&mut self, value: u8, delayer: &mut impl DelayNs) -> Result<(), I2cLcd::Error> {
        self.expander_write(value)?;
        self.pulse_enable(value, delayer)
    }
}

impl<'a, I2cLcd: I2c> SendCommand for I2cSender<'a, I2cLcd> {
    type Error = I2cLcd::Error;

    fn send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut impl DelayNs,
    ) -> Result<(), Self::Error> {
        let command: Command = command.into();

        let mut mode = 0u8;
        mode.put_bit(
            RS_BIT,
            command.get_register_selection() == RegisterSelection::Data,
        );

        match command.get_data() {
            Bits::Bit4(nibble) => self.write_4bits((nibble << 4) | mode, delayer),

            // high nibble first, the controller takes the first half as DB7..DB4
            Bits::Bit8(byte) => {
                let high_nibble = byte & 0b1111_0000;
                let low_nibble = (byte << 4) & 0b1111_0000;

                self.write_4bits(high_nibble | mode, delayer)?;
                self.write_4bits(low_nibble | mode, delayer)
            }
        }
    }

    fn idle(&mut self) -> Result<(), Self::Error> {
        self.expander_write(0)
    }

    fn get_backlight(&self) -> State {
        self.backlight
    }

    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error> {
        self.backlight = backlight;
        self.idle()
    }
}
