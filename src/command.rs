//! HD44780 instruction set, and the enums used to build each instruction

use crate::utils::{BitOps, BitState};

/// Every instruction this driver sends to the controller
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandSet {
    /// Clear DDRAM and return cursor home (`0x01`)
    ClearDisplay,
    /// Return cursor and display shift home (`0x02`)
    ReturnHome,
    /// Cursor move direction and whether the display shifts on write (`0x04`)
    EntryModeSet(MoveDirection, ShiftType),
    /// Display, cursor and cursor blink on/off (`0x08`)
    DisplayOnOff {
        /// whole display
        display: State,
        /// underline cursor
        cursor: State,
        /// blinking block cursor
        cursor_blink: State,
    },
    /// Move the cursor, or shift the whole display, without touching DDRAM (`0x10`)
    CursorOrDisplayShift(ShiftType, MoveDirection),
    /// The lone upper nibble of a function set, sent while the controller
    /// may still be in 8-bit mode.
    ///
    /// It's not an instruction from the datasheet, it's the handshake that
    /// forces the controller into a known interface width.
    HalfFunctionSet(DataWidth),
    /// Interface width, line count and font (`0x20`)
    FunctionSet(DataWidth, LineMode, Font),
    /// Point address counter into CGRAM (`0x40`), 6 bit address
    SetCGRAM(u8),
    /// Point address counter into DDRAM (`0x80`), 7 bit address
    SetDDRAM(u8),
    /// Write one byte to the RAM selected by the last address command
    WriteDataToRAM(u8),
}

/// Cursor move direction, or display shift direction
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveDirection {
    /// decrement / move left
    RightToLeft,
    /// increment / move right
    #[default]
    LeftToRight,
}

/// Whether the cursor moves alone, or the whole display moves with it
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftType {
    /// only cursor moves
    #[default]
    CursorOnly,
    /// display shifts along with the cursor
    CursorAndDisplay,
}

/// On/Off switch
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    #[allow(missing_docs)]
    Off,
    #[allow(missing_docs)]
    #[default]
    On,
}

impl From<State> for BitState {
    fn from(value: State) -> Self {
        match value {
            State::Off => BitState::Clear,
            State::On => BitState::Set,
        }
    }
}

/// Interface data width
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataWidth {
    /// DB4..DB7 only, the only width an expander backpack can drive
    #[default]
    Bit4,
    /// DB0..DB7
    Bit8,
}

/// Number of display lines the controller drives
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    #[allow(missing_docs)]
    OneLine,
    /// Also used by 4-row modules, they are two long lines folded
    #[default]
    TwoLine,
}

/// Character cell size
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    #[allow(missing_docs)]
    #[default]
    Font5x8,
    /// Only selectable in one line mode
    Font5x10,
}

/// Which controller register a byte goes to, driven by the RS line
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterSelection {
    /// instruction register, RS = 0
    Command,
    /// data register (DDRAM / CGRAM), RS = 1
    Data,
}

/// The payload of a [`Command`]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bits {
    /// One nibble in the lower 4 bits, sent alone
    Bit4(u8),
    /// A full byte, sent as two nibbles
    Bit8(u8),
}

/// A raw command, ready for a sender to put on the wire
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    rs: RegisterSelection,
    data: Bits,
}

impl Command {
    /// Build a raw command
    pub fn new(rs: RegisterSelection, data: Bits) -> Self {
        Self { rs, data }
    }

    /// A full byte to the instruction register
    pub fn instruction(byte: u8) -> Self {
        Self::new(RegisterSelection::Command, Bits::Bit8(byte))
    }

    /// A full byte to the data register
    pub fn data(byte: u8) -> Self {
        Self::new(RegisterSelection::Data, Bits::Bit8(byte))
    }

    #[allow(missing_docs)]
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    #[allow(missing_docs)]
    pub fn get_data(&self) -> Bits {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => Self::instruction(0b0000_0001),

            CommandSet::ReturnHome => Self::instruction(0b0000_0010),

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                raw_bits.put_bit(1, dir == MoveDirection::LeftToRight);
                raw_bits.put_bit(0, st == ShiftType::CursorAndDisplay);

                Self::instruction(raw_bits)
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                raw_bits.put_bit(2, display);
                raw_bits.put_bit(1, cursor);
                raw_bits.put_bit(0, cursor_blink);

                Self::instruction(raw_bits)
            }

            CommandSet::CursorOrDisplayShift(st, dir) => {
                let mut raw_bits: u8 = 0b0001_0000;

                raw_bits.put_bit(3, st == ShiftType::CursorAndDisplay);
                raw_bits.put_bit(2, dir == MoveDirection::LeftToRight);

                Self::instruction(raw_bits)
            }

            CommandSet::HalfFunctionSet(width) => {
                let mut raw_bits: u8 = 0b0010;

                raw_bits.put_bit(0, width == DataWidth::Bit8);

                Self::new(RegisterSelection::Command, Bits::Bit4(raw_bits))
            }

            CommandSet::FunctionSet(width, line, font) => {
                let mut raw_bits: u8 = 0b0010_0000;

                raw_bits.put_bit(4, width == DataWidth::Bit8);
                raw_bits.put_bit(3, line == LineMode::TwoLine);
                raw_bits.put_bit(2, font == Font::Font5x10);

                Self::instruction(raw_bits)
            }

            CommandSet::SetCGRAM(addr) => Self::instruction(0b0100_0000 | (addr & 0b0011_1111)),

            CommandSet::SetDDRAM(addr) => Self::instruction(0b1000_0000 | (addr & 0b0111_1111)),

            CommandSet::WriteDataToRAM(data) => Self::data(data),
        }
    }
}
