//! Common tools

/// The state of a bit,
/// It's either [`BitState::Clear`] to represent a 0
/// or [`BitState::Set`] to represent a 1
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitState {
    /// Bit is 0
    Clear,
    /// Bit is 1
    Set,
}

impl From<bool> for BitState {
    fn from(value: bool) -> Self {
        match value {
            true => BitState::Set,
            false => BitState::Clear,
        }
    }
}

/// Simple bit ops on a register byte
pub trait BitOps {
    /// Set bit at `pos` to 1
    fn set_bit(&mut self, pos: u8) -> Self;
    /// Set bit at `pos` to 0
    fn clear_bit(&mut self, pos: u8) -> Self;
    /// Set bit at `pos` to the given state
    fn put_bit(&mut self, pos: u8, state: impl Into<BitState>) -> Self;
}

impl BitOps for u8 {
    fn set_bit(&mut self, pos: u8) -> Self {
        debug_assert!(pos <= 7, "bit offset larger than 7");
        *self |= 1u8 << (pos & 0b111);
        *self
    }

    fn clear_bit(&mut self, pos: u8) -> Self {
        debug_assert!(pos <= 7, "bit offset larger than 7");
        *self &= !(1u8 << (pos & 0b111));
        *self
    }

    fn put_bit(&mut self, pos: u8, state: impl Into<BitState>) -> Self {
        match state.into() {
            BitState::Set => self.set_bit(pos),
            BitState::Clear => self.clear_bit(pos),
        }
    }
}
