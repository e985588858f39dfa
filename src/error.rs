//! Driver error

use core::fmt;

/// The only failure the driver can see: the expander did not take a byte.
///
/// An I2C NACK, an arbitration loss or a bus fault all end up here. The LCD
/// itself cannot report anything, there is no read path through the expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The bus transaction carrying an expander byte failed
    Transport(E),
}

impl<E> Error<E> {
    /// The error returned by the underlying bus
    pub fn into_inner(self) -> E {
        match self {
            Error::Transport(e) => e,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "expander write failed: {:?}", e),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

// bus errors rarely implement `defmt::Format`, so don't require it
#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Transport(_) => defmt::write!(fmt, "expander write failed"),
        }
    }
}
