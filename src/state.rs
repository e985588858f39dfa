use crate::command::{DataWidth, Font, LineMode, MoveDirection, ShiftType, State};

/// DDRAM address of the first cell of each row
pub(crate) const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

// Shadow copy of the write-only controller registers.
// Nothing here is ever read back from hardware, the last requested value wins.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct LcdState {
    cols: u8,
    rows: u8,
    // character size asked for by the user, the function register may
    // still carry 5x8 when the module has more than one line
    char_size: Font,

    // function set
    data_width: DataWidth,
    line: LineMode,
    font: Font,

    // display on/off control
    display_on: State,
    cursor_on: State,
    cursor_blink: State,

    // entry mode set
    direction: MoveDirection,
    shift_type: ShiftType,
}

impl Default for LcdState {
    fn default() -> Self {
        Self::new(16, 2, Font::Font5x8)
    }
}

impl LcdState {
    pub(crate) fn new(cols: u8, rows: u8, char_size: Font) -> Self {
        let mut state = Self {
            cols,
            rows,
            char_size,
            data_width: DataWidth::Bit4,
            line: LineMode::OneLine,
            font: Font::Font5x8,
            display_on: State::On,
            cursor_on: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::LeftToRight,
            shift_type: ShiftType::CursorOnly,
        };
        state.reset();
        state
    }

    /// Put every register back to what init programs into the controller
    pub(crate) fn reset(&mut self) {
        self.data_width = DataWidth::Bit4;

        self.line = match self.rows > 1 {
            true => LineMode::TwoLine,
            false => LineMode::OneLine,
        };

        // some one line modules can show a 10 pixel high font
        self.font = match (self.char_size, self.line) {
            (Font::Font5x10, LineMode::OneLine) => Font::Font5x10,
            _ => Font::Font5x8,
        };

        self.display_on = State::On;
        self.cursor_on = State::Off;
        self.cursor_blink = State::Off;

        self.direction = MoveDirection::LeftToRight;
        self.shift_type = ShiftType::CursorOnly;
    }

    pub(crate) fn get_cols(&self) -> u8 {
        self.cols
    }

    pub(crate) fn get_rows(&self) -> u8 {
        self.rows
    }

    pub(crate) fn get_data_width(&self) -> DataWidth {
        self.data_width
    }

    pub(crate) fn get_line_mode(&self) -> LineMode {
        self.line
    }

    pub(crate) fn set_line_mode(&mut self, line: LineMode) {
        self.line = line;

        // 5x10 is only available with one line
        self.font = match line {
            LineMode::OneLine => self.char_size,
            LineMode::TwoLine => Font::Font5x8,
        };
    }

    pub(crate) fn get_font(&self) -> Font {
        self.font
    }

    pub(crate) fn set_font(&mut self, font: Font) {
        self.char_size = font;

        self.font = match self.line {
            LineMode::OneLine => font,
            LineMode::TwoLine => Font::Font5x8,
        };
    }

    pub(crate) fn get_display_state(&self) -> State {
        self.display_on
    }

    pub(crate) fn set_display_state(&mut self, display: State) {
        self.display_on = display;
    }

    pub(crate) fn get_cursor_state(&self) -> State {
        self.cursor_on
    }

    pub(crate) fn set_cursor_state(&mut self, cursor: State) {
        self.cursor_on = cursor;
    }

    pub(crate) fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub(crate) fn set_cursor_blink(&mut self, blink: State) {
        self.cursor_blink = blink;
    }

    pub(crate) fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, dir: MoveDirection) {
        self.direction = dir;
    }

    pub(crate) fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub(crate) fn set_shift_type(&mut self, shift: ShiftType) {
        self.shift_type = shift;
    }

    /// DDRAM address of a cell.
    ///
    /// A row past the last one lands on the last row, and the table only
    /// knows 4 rows.
    pub(crate) fn ddram_addr(&self, col: u8, row: u8) -> u8 {
        let last_row = self.rows.saturating_sub(1).min(ROW_OFFSETS.len() as u8 - 1);
        let row = row.min(last_row);

        col.wrapping_add(ROW_OFFSETS[row as usize])
    }
}
