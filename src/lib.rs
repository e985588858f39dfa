/*!
# Liquid Crystal I2C

Driver for HD44780 compatible character LCDs attached through a PCF8574 style
I2C expander ("I2C backpack"). The LCD runs in 4-bit mode: every byte is sent
as two nibbles, and every nibble costs three single-byte I2C transactions.

Basic Usage:

1. Initialize a "sender" <br/>
    This crate include a driver for the common backpack wiring:
    * I2C driver with PCF8574 adapter board [`sender::I2cSender`]

    You can use any driver implemented [`sender::SendCommand`] instead.
<br/>
<br/>
2. Use [`lcd::Lcd::new()`] to create a [`lcd::Lcd`], then call [`lcd::Lcd::init()`]
   to run the power-up handshake
<br/>
<br/>
3. use any methods provide by [`lcd::Lcd`] to control the LCD

```ignore
let mut sender = I2cSender::new(&mut i2c, 0x27);
let mut lcd = Lcd::new(&mut sender, &mut delayer, Config::default());
lcd.init()?;
lcd.set_cursor(0, 1)?;
lcd.print_str("hello")?;
```

Every operation returns a [`Result`]. The controller has no read path here,
so an `Ok` only means the bus accepted every byte.
*/

#![no_std]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod lcd;
pub mod sender;
mod state;
pub mod utils;

pub use error::Error;
