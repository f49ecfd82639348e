//! Backlight setting applied to the keyboard.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

use crate::color::Color;

/// Backlight brightness in percent.
#[derive(Default, PartialEq, Eq, Debug, Copy, Clone)]
pub(crate) struct Brightness(u8);

impl Brightness {
    pub(crate) const MAX: u8 = 100;

    pub(crate) const fn max_value() -> Self {
        Self(Self::MAX)
    }

    /// Create a brightness, rejecting values above 100%.
    pub(crate) fn new(percent: u8) -> Option<Self> {
        if percent <= Self::MAX {
            Some(Self(percent))
        } else {
            None
        }
    }

    pub(crate) const fn percent(self) -> u8 {
        self.0
    }
}

impl FromStr for Brightness {
    type Err = BrightnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let percent = u8::from_str(s).map_err(BrightnessError::Invalid)?;
        Brightness::new(percent).ok_or(BrightnessError::OutOfRange)
    }
}

impl Display for Brightness {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Brightness parsing error.
#[derive(Debug)]
pub(crate) enum BrightnessError {
    Invalid(ParseIntError),
    OutOfRange,
}

impl Display for BrightnessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "Brightness must be 0-{}: {}", Brightness::MAX, err),
            Self::OutOfRange => write!(f, "Brightness must be 0-{}", Brightness::MAX),
        }
    }
}

impl Error for BrightnessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::OutOfRange => None,
        }
    }
}

/// Color and brightness pair.
///
/// This is the unit of persisted state and of the device packet.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub(crate) struct DeviceSetting {
    pub(crate) color: Color,
    pub(crate) brightness: Brightness,
}

impl Default for DeviceSetting {
    fn default() -> Self {
        Self { color: Color::default(), brightness: Brightness::max_value() }
    }
}
