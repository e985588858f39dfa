use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, DataWidth, Font},
    error::Error,
    lcd::Lcd,
    sender::SendCommand,
    state::LcdState,
};

// datasheet asks for > 40ms after Vcc rises to 2.7V, some boards boot way before that
const POWER_ON_WAIT_MS: u32 = 50;
// let the controller leave whatever state it powered up in
const EXPANDER_RESET_WAIT_MS: u32 = 1_000;

/// [`Config`] is the init config of a [`Lcd`]
///
/// ```
/// use liquid_crystal_i2c::{command::Font, lcd::Config};
///
/// let config = Config::default().set_cols(20).set_rows(4).set_font(Font::Font5x8);
/// assert_eq!(config.get_cols(), 20);
/// ```
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    cols: u8,
    rows: u8,
    font: Font,
}

impl Default for Config {
    /// A 16x2 module with 5x8 cells
    fn default() -> Self {
        Self {
            cols: 16,
            rows: 2,
            font: Font::Font5x8,
        }
    }
}

#[allow(missing_docs)]
impl Config {
    pub fn get_cols(&self) -> u8 {
        self.cols
    }

    pub fn set_cols(mut self, cols: u8) -> Self {
        self.cols = cols;
        self
    }

    pub fn get_rows(&self) -> u8 {
        self.rows
    }

    pub fn set_rows(mut self, rows: u8) -> Self {
        self.rows = rows;
        self
    }

    pub fn get_font(&self) -> Font {
        self.font
    }

    /// [`Font::Font5x10`] only takes effect on one row modules
    pub fn set_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub(crate) fn into_state(self) -> LcdState {
        LcdState::new(self.cols, self.rows, self.font)
    }
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand,
    Delayer: DelayNs,
{
    /// Run the power-up handshake, and program the default display state:
    /// display on, no cursor, no blink, cleared, left to right, cursor home.
    ///
    /// Must be called once before any other operation. It's also the way to
    /// resynchronize the controller after a failed write, any earlier command
    /// may have been cut in half.
    pub fn init(&mut self) -> Result<(), Error<Sender::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("lcd: init {}x{}", self.get_cols(), self.get_rows());

        let result = self.init_sequence();

        #[cfg(feature = "defmt")]
        match &result {
            Ok(()) => defmt::debug!("lcd: ready"),
            Err(e) => defmt::warn!("lcd: init aborted, {}", e),
        }

        result
    }

    fn init_sequence(&mut self) -> Result<(), Error<Sender::Error>> {
        self.state.reset();

        self.delayer.delay_ms(POWER_ON_WAIT_MS);

        // RS, RW and EN low, backlight as requested
        self.sender.idle().map_err(Error::Transport)?;
        self.delayer.delay_ms(EXPANDER_RESET_WAIT_MS);

        // whatever width it's in, three "8-bit" nibbles leave the controller in 8-bit mode,
        // then one "4-bit" nibble switches the interface
        self.send(CommandSet::HalfFunctionSet(DataWidth::Bit8))?;
        self.delay_and_send(CommandSet::HalfFunctionSet(DataWidth::Bit8), 4_500)?;
        self.delay_and_send(CommandSet::HalfFunctionSet(DataWidth::Bit8), 4_500)?;
        self.delay_and_send(CommandSet::HalfFunctionSet(DataWidth::Bit4), 150)?;

        // from here on every byte goes as two nibbles
        self.send_function_set()?;

        self.send_display_control()?;

        self.clear()?;

        self.send_entry_mode()?;

        self.home()
    }
}
