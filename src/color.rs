//! Named backlight colors.

use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;

/// Backlight color supported by the keyboard firmware.
///
/// The discriminant is the firmware's color ID.
#[derive(ValueEnum, PartialEq, Eq, Debug, Copy, Clone)]
#[repr(u8)]
pub(crate) enum Color {
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Orange = 5,
    Purple = 6,
    White = 7,
}

impl Color {
    /// Firmware color ID.
    pub(crate) const fn id(self) -> u8 {
        self as u8
    }

    /// Look up a color by its firmware ID.
    pub(crate) fn from_id(id: u8) -> Option<Self> {
        Self::value_variants().iter().copied().find(|color| color.id() == id)
    }
}

impl Default for Color {
    /// Last entry of the table.
    fn default() -> Self {
        let variants = Self::value_variants();
        variants[variants.len() - 1]
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{:?}", self),
        }
    }
}
