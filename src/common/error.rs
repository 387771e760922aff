use std::fmt::{Display, Error, Formatter};

use super::metadata::ECLevel;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    EmptyData,
    DataTooLong { ec_level: ECLevel },
    InvalidVersion,
    InvalidECLevel,
    InvalidChar,
    InvalidMaskingPattern,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            Self::EmptyData => "Empty data",
            Self::DataTooLong { ec_level: ECLevel::L } => "Data too long for any QR version",
            Self::DataTooLong { ec_level } => {
                return write!(
                    f,
                    "Data too long for any QR version, try a lower error correction level than {ec_level:?}"
                );
            }
            Self::InvalidVersion => "Invalid version, use a version from 1 to 40",
            Self::InvalidECLevel => "Invalid error correction level, use L, M, Q or H",
            Self::InvalidChar => "Invalid character for the configured text encoding",
            Self::InvalidMaskingPattern => "Invalid masking pattern, use a pattern from 0 to 7",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
