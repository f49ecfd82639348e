//! Error type for device access.

use std::fmt;
use std::io;

#[derive(Debug)]
pub(crate) enum Error {
    /// No hidraw node matched the controller identity and interface.
    NoDevice,
    /// Matching nodes were found, but none accepted the feature report.
    Rejected { attempts: usize },
    /// The hidraw registry could not be read.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoDevice => write!(f, "no matching keyboard found"),
            Error::Rejected { attempts } => {
                write!(f, "feature report rejected by {attempts} matching device(s)")
            },
            Error::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
