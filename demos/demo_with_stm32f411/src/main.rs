//! Drive a 16x2 LCD through a PCF8574 I2C backpack with a STM32F411RET6
//!
//! Wiring diagram
//!
//! PCF8574 backpack <-> STM32F411RET6
//!              GND <-> GND
//!              VCC <-> 5V (It is best to use an external source for the 5V pin, such as the 5V output from a DAPLink device or USB.)
//!              SCL <-> PB6
//!              SDA <-> PB7
//!
//! The backpack usually sits at 0x27 (PCF8574T) or 0x3F (PCF8574AT)

#![no_std]
#![no_main]

use core::fmt::Write;

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{
    i2c::{self, I2c},
    pac,
    prelude::*,
};

use liquid_crystal_i2c::{
    lcd::{Config, Lcd},
    sender::I2cSender,
};

// a heart shape
const HEART: [u8; 8] = [
    0b00000, 0b00000, 0b01010, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
];

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    let gpiob = dp.GPIOB.split();

    let mut i2c = I2c::new(
        dp.I2C1,
        (gpiob.pb6, gpiob.pb7),
        i2c::Mode::standard(100.kHz()), // The PCF8574T max I2C speed
        &clocks,
    );

    let mut sender = I2cSender::new(&mut i2c, 0x27);
    let mut lcd = Lcd::new(&mut sender, &mut delayer, Config::default());

    // a failed init leaves the controller in an unknown state, just try again
    while let Err(e) = lcd.init() {
        rprintln!("init failed: {}, retrying", e);
    }
    rprintln!("LCD ready");

    if let Err(e) = run(&mut lcd) {
        rprintln!("LCD error: {}", e);
    }

    #[allow(clippy::empty_loop)]
    loop {}
}

fn run<S, D>(lcd: &mut Lcd<'_, '_, S, D>) -> Result<(), liquid_crystal_i2c::Error<S::Error>>
where
    S: liquid_crystal_i2c::sender::SendCommand,
    S::Error: core::fmt::Debug,
    D: embedded_hal::delay::DelayNs,
{
    // draw a little heart in CGRAM, then go back to DDRAM
    lcd.create_char(1, &HEART)?;
    lcd.set_cursor(0, 0)?;

    lcd.blink()?;
    lcd.print_str("hello, ")?;
    lcd.write(1)?;

    lcd.set_cursor(0, 1)?;
    let (cols, rows) = (lcd.get_cols(), lcd.get_rows());
    if write!(lcd, "{}x{} LCD", cols, rows).is_err() {
        // fmt::Error carries no bus error
        rprintln!("LCD error: formatted write failed");
        return Ok(());
    }

    lcd.delay_ms(1_000);
    lcd.no_blink()?;

    // shift display window back and forth
    for _ in 0..4 {
        lcd.delay_ms(250);
        lcd.scroll_display_right()?;
    }
    for _ in 0..4 {
        lcd.delay_ms(250);
        lcd.scroll_display_left()?;
    }

    // and blinking backlight 3 times
    for _ in 0..3 {
        lcd.delay_ms(500);
        lcd.no_backlight()?;
        lcd.delay_ms(500);
        lcd.backlight()?;
    }

    Ok(())
}
