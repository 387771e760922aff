use std::{borrow::Cow, fmt::Display, ops::Deref, ops::Not, str::FromStr};

use encoding_rs::mem;

use super::{
    error::{QRError, QRResult},
    version_db::*,
};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl TryFrom<char> for ECLevel {
    type Error = QRError;
    fn try_from(c: char) -> QRResult<Self> {
        match c.to_ascii_uppercase() {
            'L' => Ok(Self::L),
            'M' => Ok(Self::M),
            'Q' => Ok(Self::Q),
            'H' => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

impl FromStr for ECLevel {
    type Err = QRError;
    fn from_str(s: &str) -> QRResult<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

// Text encoding used for byte mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Latin1,
}

impl TextEncoding {
    // Returns None if the text has characters which cannot be represented in this encoding
    pub fn encode(self, data: &str) -> Option<Cow<'_, [u8]>> {
        match self {
            Self::Utf8 => Some(Cow::Borrowed(data.as_bytes())),
            Self::Latin1 if mem::is_str_latin1(data) => Some(mem::encode_latin1_lossy(data)),
            Self::Latin1 => None,
        }
    }

    pub fn encoded_len(self, data: &str) -> Option<usize> {
        match self {
            Self::Utf8 => Some(data.len()),
            Self::Latin1 if mem::is_str_latin1(data) => Some(data.chars().count()),
            Self::Latin1 => None,
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(40);

    pub fn new(version: usize) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion),
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        DATA_BIT_CAPACITY[self.0][ecl as usize]
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.data_bit_capacity(ecl) >> 3
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        EC_BLOCKS[self.0][ecl as usize][0]
    }

    // Returns (group 1 block size, group 1 block count, group 2 block size, group 2 block count)
    pub fn data_codewords_per_block(self, ecl: ECLevel) -> (usize, usize, usize, usize) {
        let [_, count1, size1, count2, size2] = EC_BLOCKS[self.0][ecl as usize];
        (size1, count1, size2, count2)
    }

    pub fn total_codewords(self, ecl: ECLevel) -> usize {
        let (_, count1, _, count2) = self.data_codewords_per_block(ecl);
        self.data_codewords(ecl) + (count1 + count2) * self.ecc_per_block(ecl)
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0]
    }

    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only present from version 7: {}", self.0);
        VERSION_INFOS[self.0]
    }
}

pub fn format_info(ecl: ECLevel, mask: u8) -> u16 {
    debug_assert!(mask < 8, "Invalid masking pattern: {mask}");
    FORMAT_INFOS[ecl as usize][mask as usize]
}

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;
