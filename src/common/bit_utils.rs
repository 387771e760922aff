use std::{fmt::Display, mem};

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { data: Vec::with_capacity(bit_capacity.div_ceil(8)), len: 0, cursor: 0 }
    }

    pub fn from_bytes(inp: &[u8]) -> Self {
        Self { data: inp.to_vec(), len: inp.len() << 3, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len, "Index out of bounds: Length {}, Index {i}", self.len);
        self.data[i >> 3] & (0b10000000 >> (i & 7)) != 0
    }

    #[cfg(test)]
    pub fn to_bit_string(&self) -> String {
        (0..self.len).map(|i| if self.get(i) { '1' } else { '0' }).collect()
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push(&mut self, bit: bool) {
        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b10000000 >> offset;
        }
        self.len += 1;
    }

    // Pushes the lowest `size` bits of `bits`, most significant bit first
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= max_bits, "Size {size} exceeds bit width of type {max_bits}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & T::one() == T::one());
        }
    }

    pub fn push_zeros(&mut self, count: usize) {
        for _ in 0..count {
            self.push(false);
        }
    }

    pub fn extend(&mut self, arr: &[u8]) {
        if self.len & 7 == 0 {
            self.data.extend_from_slice(arr);
            self.len += arr.len() << 3;
        } else {
            arr.iter().for_each(|b| self.push_bits(*b, 8));
        }
    }

    pub fn append(&mut self, other: &BitStream) {
        (0..other.len).for_each(|i| self.push(other.get(i)));
    }
}

// Take bits from bit stream
//------------------------------------------------------------------------------

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }
        let bit = self.get(self.cursor);
        self.cursor += 1;
        Some(bit)
    }
}

#[cfg(test)]
mod bit_stream_push_tests {
    use super::BitStream;

    #[test]
    fn test_push() {
        let mut bs = BitStream::new();
        [true, false, true, true, false, false, false, true, true].iter().for_each(|b| bs.push(*b));
        assert_eq!(bs.len(), 9);
        assert_eq!(bs.data(), &[0b10110001, 0b10000000]);
    }

    #[test]
    fn test_push_bits() {
        let mut bs = BitStream::new();
        bs.push_bits(0b0001_u8, 4);
        bs.push_bits(0b0000001010_u16, 10);
        bs.push_bits(0b1010101_u32, 7);
        assert_eq!(bs.to_bit_string(), "000100000010101010101");
    }

    #[test]
    fn test_push_zero_size() {
        let mut bs = BitStream::new();
        bs.push_bits(0u8, 0);
        assert!(bs.is_empty());
    }

    #[test]
    fn test_extend_aligned_and_unaligned() {
        let mut bs = BitStream::new();
        bs.extend(&[0xEC]);
        bs.push(true);
        bs.extend(&[0x11]);
        assert_eq!(bs.to_bit_string(), "11101100100010001");
    }

    #[test]
    fn test_append() {
        let mut head = BitStream::new();
        head.push_bits(0b0100_u8, 4);
        let mut tail = BitStream::new();
        tail.push_bits(0b101_u8, 3);
        head.append(&tail);
        assert_eq!(head.to_bit_string(), "0100101");
    }
}
