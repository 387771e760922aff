use std::fmt::Display;

use encoding_rs::SHIFT_JIS;

use crate::common::metadata::{TextEncoding, Version};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Numeric => "numeric",
            Self::Alphanumeric => "alphanumeric",
            Self::Byte => "binary",
            Self::Kanji => "kanji",
        };
        f.write_str(name)
    }
}

impl Mode {
    pub const INDICATOR_BIT_LEN: usize = 4;

    pub fn indicator(self) -> u8 {
        self as u8
    }

    #[inline]
    pub(crate) fn numeric_digit(char: char) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        char as u16 - '0' as u16
    }

    #[inline]
    pub(crate) fn alphanumeric_digit(char: char) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            '0'..='9' => char as u16 - '0' as u16,
            'A'..='Z' => char as u16 - 'A' as u16 + 10,
            ' ' => 36,
            '$' => 37,
            '%' => 38,
            '*' => 39,
            '+' => 40,
            '-' => 41,
            '.' => 42,
            '/' => 43,
            ':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    pub fn contains(self, char: char) -> bool {
        match self {
            Self::Numeric => char.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(char, '0'..='9' | 'A'..='Z' | ' ' | '$' | '%' | '*' | '+' | '-' | '.' | '/' | ':')
            }
            Self::Byte => true,
            Self::Kanji => {
                let mut buf = [0; 4];
                let (sjis, _, has_err) = SHIFT_JIS.encode(char.encode_utf8(&mut buf));
                !has_err && sjis.len() == 2
            }
        }
    }

    // Bit length of the data part for `char_count` characters, excluding the header
    pub fn encoded_len(self, char_count: usize) -> usize {
        match self {
            Self::Numeric => {
                let rem = match char_count % 3 {
                    0 => 0,
                    1 => 4,
                    _ => 7,
                };
                (char_count / 3) * 10 + rem
            }
            Self::Alphanumeric => (char_count / 2) * 11 + (char_count % 2) * 6,
            Self::Byte => char_count * 8,
            Self::Kanji => char_count * 13,
        }
    }

    pub fn char_count_bit_len(self, version: Version) -> usize {
        let bucket = match *version {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        let lens = match self {
            Self::Numeric => [10, 12, 14],
            Self::Alphanumeric => [9, 11, 13],
            Self::Byte => [8, 16, 16],
            Self::Kanji => [8, 10, 12],
        };
        lens[bucket]
    }

    // Total bits of a segment including mode indicator and character count indicator
    pub fn total_bit_len(self, char_count: usize, version: Version) -> usize {
        Self::INDICATOR_BIT_LEN + self.char_count_bit_len(version) + self.encoded_len(char_count)
    }

    // Picks the cheapest mode which can hold every character of the data
    pub fn select(data: &str, encoding: TextEncoding) -> Self {
        if data.chars().all(|c| Self::Numeric.contains(c)) {
            return Self::Numeric;
        }
        if data.chars().all(|c| Self::Alphanumeric.contains(c)) {
            return Self::Alphanumeric;
        }
        if !data.chars().all(|c| Self::Kanji.contains(c)) {
            return Self::Byte;
        }
        let kanji_bits = Self::Kanji.encoded_len(data.chars().count());
        match encoding.encoded_len(data) {
            Some(byte_len) if Self::Byte.encoded_len(byte_len) <= kanji_bits => Self::Byte,
            _ => Self::Kanji,
        }
    }
}

#[cfg(test)]
mod mode_tests {
    use test_case::test_case;

    use super::Mode;
    use crate::common::metadata::{TextEncoding, Version};

    #[test_case("1234567890", Mode::Numeric)]
    #[test_case("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:", Mode::Alphanumeric)]
    #[test_case("HELLO WORLD", Mode::Alphanumeric)]
    #[test_case("Hello World", Mode::Byte)]
    #[test_case("HELLO, WORLD", Mode::Byte)]
    #[test_case("༼つ◕_◕༽つ", Mode::Byte)]
    #[test_case("こんにちは", Mode::Kanji)]
    #[test_case("点茗", Mode::Kanji)]
    #[test_case("こんにちは, if you mix kanji", Mode::Byte)]
    #[test_case("αβγ", Mode::Kanji)]
    #[test_case("Да", Mode::Kanji)]
    #[test_case("§°", Mode::Kanji)]
    fn test_select(data: &str, exp: Mode) {
        assert_eq!(Mode::select(data, TextEncoding::Utf8), exp);
    }

    #[test]
    fn test_select_ascii_is_not_kanji() {
        // Ascii chars are single byte in Shift JIS
        assert_eq!(Mode::select("abc", TextEncoding::Utf8), Mode::Byte);
    }

    #[test]
    fn test_select_latin1_byte_cheaper_than_kanji() {
        // One Latin-1 byte per char costs 8 bits against 13 in kanji mode
        assert_eq!(Mode::select("§°", TextEncoding::Latin1), Mode::Byte);
    }

    #[test]
    fn test_select_kanji_under_latin1() {
        assert_eq!(Mode::select("こんにちは", TextEncoding::Latin1), Mode::Kanji);
    }

    #[test_case(0, 0)]
    #[test_case(1, 4)]
    #[test_case(2, 7)]
    #[test_case(3, 10)]
    #[test_case(10, 34)]
    fn test_numeric_encoded_len(count: usize, exp: usize) {
        assert_eq!(Mode::Numeric.encoded_len(count), exp);
    }

    #[test_case(1, 6)]
    #[test_case(2, 11)]
    #[test_case(5, 28)]
    fn test_alphanumeric_encoded_len(count: usize, exp: usize) {
        assert_eq!(Mode::Alphanumeric.encoded_len(count), exp);
    }

    #[test_case(Mode::Numeric, 9, 10)]
    #[test_case(Mode::Numeric, 10, 12)]
    #[test_case(Mode::Numeric, 27, 14)]
    #[test_case(Mode::Alphanumeric, 26, 11)]
    #[test_case(Mode::Byte, 1, 8)]
    #[test_case(Mode::Byte, 40, 16)]
    #[test_case(Mode::Kanji, 26, 10)]
    #[test_case(Mode::Kanji, 40, 12)]
    fn test_char_count_bit_len(mode: Mode, version: usize, exp: usize) {
        let version = Version::new(version).unwrap();
        assert_eq!(mode.char_count_bit_len(version), exp);
    }

    #[test]
    fn test_alphanumeric_digits() {
        assert_eq!(Mode::alphanumeric_digit('0'), 0);
        assert_eq!(Mode::alphanumeric_digit('Z'), 35);
        assert_eq!(Mode::alphanumeric_digit(':'), 44);
    }
}
