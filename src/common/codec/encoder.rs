use encoding_rs::SHIFT_JIS;

use super::Mode;
use crate::common::{
    bit_utils::BitStream,
    error::{QRError, QRResult},
    metadata::{ECLevel, TextEncoding, Version},
};

// Segment
//------------------------------------------------------------------------------

// Data bits of the payload in a single mode, without mode & char count indicators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub mode: Mode,
    pub char_count: usize,
    pub bits: BitStream,
}

impl Segment {
    pub fn new(data: &str, mode: Mode, encoding: TextEncoding) -> QRResult<Self> {
        match mode {
            Mode::Numeric => Ok(Self::numeric(data)),
            Mode::Alphanumeric => Ok(Self::alphanumeric(data)),
            Mode::Byte => Self::byte(data, encoding),
            // Kanji falls back to byte mode once, byte mode never falls back
            Mode::Kanji => match Self::kanji(data) {
                Some(seg) => Ok(seg),
                None => Self::byte(data, encoding),
            },
        }
    }

    fn numeric(data: &str) -> Self {
        let digits = data.chars().map(Mode::numeric_digit).collect::<Vec<_>>();
        let mut bits = BitStream::with_capacity(Mode::Numeric.encoded_len(digits.len()));
        for chunk in digits.chunks(3) {
            let num = chunk.iter().fold(0_u16, |n, d| n * 10 + d);
            let size = match chunk.len() {
                3 => 10,
                2 => 7,
                _ => 4,
            };
            bits.push_bits(num, size);
        }
        Self { mode: Mode::Numeric, char_count: digits.len(), bits }
    }

    fn alphanumeric(data: &str) -> Self {
        let digits = data.chars().map(Mode::alphanumeric_digit).collect::<Vec<_>>();
        let mut bits = BitStream::with_capacity(Mode::Alphanumeric.encoded_len(digits.len()));
        for chunk in digits.chunks(2) {
            match *chunk {
                [a, b] => bits.push_bits(a * 45 + b, 11),
                [a] => bits.push_bits(a, 6),
                _ => unreachable!("Chunks of 2 can't be empty"),
            }
        }
        Self { mode: Mode::Alphanumeric, char_count: digits.len(), bits }
    }

    fn byte(data: &str, encoding: TextEncoding) -> QRResult<Self> {
        let bytes = encoding.encode(data).ok_or(QRError::InvalidChar)?;
        let mut bits = BitStream::with_capacity(Mode::Byte.encoded_len(bytes.len()));
        bits.extend(&bytes);
        Ok(Self { mode: Mode::Byte, char_count: bytes.len(), bits })
    }

    // Returns None if any char is outside the kanji ranges of Shift JIS
    fn kanji(data: &str) -> Option<Self> {
        let mut bits = BitStream::with_capacity(Mode::Kanji.encoded_len(data.chars().count()));
        let mut char_count = 0;
        let mut buf = [0; 4];
        for c in data.chars() {
            let (sjis, _, has_err) = SHIFT_JIS.encode(c.encode_utf8(&mut buf));
            if has_err || sjis.len() != 2 {
                return None;
            }
            let code = u16::from_be_bytes([sjis[0], sjis[1]]);
            let subtractor = match code {
                0x8141..=0x9FFB => 0x8140,
                0xE041..=0xEBBE => 0xC140,
                _ => return None,
            };
            let [msb, lsb] = (code - subtractor).to_be_bytes();
            bits.push_bits(msb as u16 * 0xC0 + lsb as u16, 13);
            char_count += 1;
        }
        Some(Self { mode: Mode::Kanji, char_count, bits })
    }
}

// Version selection
//------------------------------------------------------------------------------

// Smallest version which can hold the segment at the given error correction level
pub fn find_version(mode: Mode, char_count: usize, ecl: ECLevel) -> QRResult<Version> {
    Version::all()
        .find(|v| mode.total_bit_len(char_count, *v) <= v.data_bit_capacity(ecl))
        .ok_or(QRError::DataTooLong { ec_level: ecl })
}

// Encoder
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct EncodedData {
    pub mode: Mode,
    pub version: Version,
    pub char_count: usize,
    // Header, data & padding, exactly as long as the data bit capacity of the version
    pub bits: BitStream,
}

pub fn encode(data: &str, ecl: ECLevel, encoding: TextEncoding) -> QRResult<EncodedData> {
    let seg = Segment::new(data, Mode::select(data, encoding), encoding)?;
    let version = find_version(seg.mode, seg.char_count, ecl)?;
    Ok(assemble(seg, version, ecl))
}

pub fn encode_with_version(
    data: &str,
    ecl: ECLevel,
    version: Version,
    encoding: TextEncoding,
) -> QRResult<EncodedData> {
    let seg = Segment::new(data, Mode::select(data, encoding), encoding)?;
    if seg.mode.total_bit_len(seg.char_count, version) > version.data_bit_capacity(ecl) {
        return Err(QRError::DataTooLong { ec_level: ecl });
    }
    Ok(assemble(seg, version, ecl))
}

fn assemble(seg: Segment, version: Version, ecl: ECLevel) -> EncodedData {
    let capacity = version.data_bit_capacity(ecl);
    let mut bits = BitStream::with_capacity(capacity);
    bits.push_bits(seg.mode.indicator(), Mode::INDICATOR_BIT_LEN);
    bits.push_bits(seg.char_count as u16, seg.mode.char_count_bit_len(version));
    bits.append(&seg.bits);
    pad_to_capacity(&mut bits, capacity);
    EncodedData { mode: seg.mode, version, char_count: seg.char_count, bits }
}

pub static PADDING_CODEWORDS: [u8; 2] = [0b11101100, 0b00010001];

// Adds terminator, pads to byte boundary, then fills remaining capacity with padding codewords
pub fn pad_to_capacity(bits: &mut BitStream, capacity: usize) {
    debug_assert!(
        bits.len() <= capacity,
        "Encoded data exceeds capacity: Capacity {capacity}, Size {}",
        bits.len()
    );
    debug_assert!(capacity & 7 == 0, "Capacity should be a multiple of 8: {capacity}");

    let terminator_len = (capacity - bits.len()).min(4);
    bits.push_zeros(terminator_len);

    let offset = bits.len() & 7;
    if offset > 0 {
        bits.push_zeros(8 - offset);
    }

    for pad in PADDING_CODEWORDS.iter().cycle() {
        if bits.len() >= capacity {
            break;
        }
        bits.push_bits(*pad, 8);
    }
}

#[cfg(test)]
mod segment_tests {
    use test_case::test_case;

    use super::Segment;
    use crate::common::{
        codec::Mode,
        error::QRError,
        metadata::TextEncoding,
    };

    #[test_case("8675309", "110110001110000100101001")]
    #[test_case("01234567", "000000110001010110011000011")]
    #[test_case("1", "0001")]
    #[test_case("12", "0001100")]
    fn test_numeric(data: &str, exp: &str) {
        let seg = Segment::new(data, Mode::Numeric, TextEncoding::Utf8).unwrap();
        assert_eq!(seg.bits.to_bit_string(), exp);
        assert_eq!(seg.char_count, data.len());
    }

    #[test_case("HELLO WORLD", "0110000101101111000110100010111001011011100010011010100001101")]
    #[test_case("AC-42", "0011100111011100111001000010")]
    fn test_alphanumeric(data: &str, exp: &str) {
        let seg = Segment::new(data, Mode::Alphanumeric, TextEncoding::Utf8).unwrap();
        assert_eq!(seg.bits.to_bit_string(), exp);
        assert_eq!(seg.char_count, data.len());
    }

    #[test]
    fn test_byte() {
        let seg = Segment::new("a\u{e9}", Mode::Byte, TextEncoding::Utf8).unwrap();
        assert_eq!(seg.bits.data(), &[0x61, 0xC3, 0xA9]);
        assert_eq!(seg.char_count, 3);

        let seg = Segment::new("a\u{e9}", Mode::Byte, TextEncoding::Latin1).unwrap();
        assert_eq!(seg.bits.data(), &[0x61, 0xE9]);
        assert_eq!(seg.char_count, 2);
    }

    #[test]
    fn test_byte_unrepresentable_in_latin1() {
        let res = Segment::new("\u{1f30e}", Mode::Byte, TextEncoding::Latin1);
        assert_eq!(res, Err(QRError::InvalidChar));
    }

    #[test]
    fn test_kanji() {
        // 点 = 0x935F, 茗 = 0xE4AA in Shift JIS
        let seg = Segment::new("点茗", Mode::Kanji, TextEncoding::Utf8).unwrap();
        assert_eq!(seg.mode, Mode::Kanji);
        assert_eq!(seg.char_count, 2);
        assert_eq!(seg.bits.to_bit_string(), "01101100111111101010101010");
    }

    #[test]
    fn test_kanji_fallback_to_byte() {
        let data = "こんにちは, if you mix kanji";
        let seg = Segment::new(data, Mode::Kanji, TextEncoding::Utf8).unwrap();
        assert_eq!(seg.mode, Mode::Byte);
        assert_eq!(seg.char_count, data.len());
    }

    #[test]
    fn test_kanji_fallback_on_range_boundary() {
        // Ideographic space encodes to 0x8140 which is excluded from the kanji range
        let seg = Segment::new("\u{3000}", Mode::Kanji, TextEncoding::Utf8).unwrap();
        assert_eq!(seg.mode, Mode::Byte);
    }
}
