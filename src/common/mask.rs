use std::ops::Deref;

use rayon::prelude::*;

use super::{
    error::{QRError, QRResult},
    metadata::Color,
};
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern < 8 {
            Ok(Self(pattern))
        } else {
            Err(QRError::InvalidMaskingPattern)
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// x is the column and y is the row of the module
mod mask_functions {
    pub fn checkerboard(x: i32, y: i32) -> bool {
        (x + y) % 2 == 0
    }

    pub fn horizontal_lines(_: i32, y: i32) -> bool {
        y % 2 == 0
    }

    pub fn vertical_lines(x: i32, _: i32) -> bool {
        x % 3 == 0
    }

    pub fn diagonal_lines(x: i32, y: i32) -> bool {
        (x + y) % 3 == 0
    }

    pub fn large_checkerboard(x: i32, y: i32) -> bool {
        (y / 2 + x / 3) % 2 == 0
    }

    pub fn fields(x: i32, y: i32) -> bool {
        (x * y) % 2 + (x * y) % 3 == 0
    }

    pub fn diamonds(x: i32, y: i32) -> bool {
        ((x * y) % 3 + x * y) % 2 == 0
    }

    pub fn meadow(x: i32, y: i32) -> bool {
        ((x * y) % 3 + x + y) % 2 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i32, i32) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid masking pattern: {}", self.0),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

// Evaluates all 8 patterns concurrently on copies of the grid and keeps the one
// with the lowest penalty. Ties go to the lower pattern index.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let trials = MaskPattern::all()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|m| {
            let mut trial = qr.clone();
            trial.apply_mask(m);
            let penalty = compute_total_penalty(&trial);
            (penalty, trial)
        })
        .collect::<Vec<_>>();

    let scores = trials.iter().map(|(p, _)| *p).collect::<Vec<_>>();
    let best_mask = select_best_mask(&scores);
    let (_, best) = trials
        .into_iter()
        .nth(*best_mask as usize)
        .unwrap_or_else(|| unreachable!("Should evaluate all 8 masks"));
    *qr = best;
    best_mask
}

// Picks the index of the first minimum score
pub fn select_best_mask(scores: &[u32]) -> MaskPattern {
    debug_assert!(scores.len() == 8, "Expected a score for each of the 8 masks");
    let (best, _) = scores
        .iter()
        .enumerate()
        .min_by_key(|&(i, s)| (*s, i))
        .unwrap_or_else(|| unreachable!("Should score atleast 1 mask"));
    MaskPattern(best as u8)
}

// Penalty
//------------------------------------------------------------------------------

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let row = |r: i16| (0..w).map(move |c| *qr.get(r, c));
    let col = |c: i16| (0..w).map(move |r| *qr.get(r, c));

    let mut line_pen = 0;
    for i in 0..w {
        line_pen += compute_run_penalty(row(i)) + compute_run_penalty(col(i));
        line_pen += compute_finder_pattern_penalty(row(i)) + compute_finder_pattern_penalty(col(i));
    }

    line_pen + compute_block_penalty(qr) + compute_balance_penalty(qr)
}

// Rule 1: 3 points for a run of 5 same colored modules, 1 more for each extra module
pub fn compute_run_penalty(line: impl Iterator<Item = Color>) -> u32 {
    let mut pen = 0;
    let mut last = None;
    let mut run = 0;
    for clr in line {
        if last == Some(clr) {
            run += 1;
        } else {
            last = Some(clr);
            run = 1;
        }
        match run {
            5 => pen += 3,
            6.. => pen += 1,
            _ => (),
        }
    }
    pen
}

// Rule 2: 3 points for every 2x2 block of same colored modules, overlaps included
pub fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

const D: Color = Color::Dark;
const L: Color = Color::Light;

static FINDER_LIKE_PATTERNS: [[Color; 11]; 2] =
    [[D, L, D, D, D, L, D, L, L, L, L], [L, L, L, L, D, L, D, D, D, L, D]];

// Rule 3: 40 points for every 1:1:3:1:1 pattern with 4 light modules on either side.
// A mismatching module resets the match and is skipped. A full match restarts after
// the pattern.
pub fn compute_finder_pattern_penalty(line: impl Iterator<Item = Color>) -> u32 {
    let mut pen = 0;
    let mut matched = [0; 2];
    for clr in line {
        for (pattern, m) in FINDER_LIKE_PATTERNS.iter().zip(matched.iter_mut()) {
            if pattern[*m] != clr {
                *m = 0;
                continue;
            }
            *m += 1;
            if *m == pattern.len() {
                pen += 40;
                *m = 0;
            }
        }
    }
    pen
}

// Rule 4: 10 points for every 5% the dark module ratio deviates from 50%
pub fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark = qr.count_dark_modules();
    let total = qr.width() * qr.width();
    let deviation = (dark * 100).abs_diff(total * 50);
    (deviation / (total * 5) * 10) as u32
}

#[cfg(test)]
mod mask_tests {
    use test_case::test_case;

    use super::{
        apply_best_mask, compute_balance_penalty, compute_finder_pattern_penalty,
        compute_run_penalty, compute_total_penalty, select_best_mask, MaskPattern,
    };
    use crate::builder::{Module, QR};
    use crate::common::{
        bit_utils::BitStream,
        error::QRError,
        metadata::{Color, ECLevel, Version},
    };

    fn line(bits: &str) -> impl Iterator<Item = Color> + '_ {
        bits.chars().map(|b| Color::from(b == '1'))
    }

    fn unmasked_qr(ver: usize, ecl: ECLevel, data: &[u8]) -> QR {
        let mut qr = QR::new(Version::new(ver).unwrap(), ecl);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(BitStream::from_bytes(data));
        qr
    }

    #[test]
    fn test_invalid_mask_pattern() {
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskingPattern));
        assert_eq!(*MaskPattern::new(7).unwrap(), 7);
    }

    #[test_case(0, &[(0, 0), (1, 1), (2, 0)], &[(1, 0), (0, 1)])]
    #[test_case(1, &[(5, 0), (5, 2)], &[(5, 1)])]
    #[test_case(2, &[(0, 7), (3, 1)], &[(1, 0), (2, 5)])]
    #[test_case(3, &[(1, 2), (0, 3)], &[(1, 1)])]
    #[test_case(4, &[(0, 0), (2, 1), (3, 2)], &[(3, 0), (0, 2)])]
    #[test_case(5, &[(0, 5), (6, 1)], &[(1, 1), (2, 2)])]
    #[test_case(6, &[(1, 1), (2, 3)], &[(1, 3), (2, 2)])]
    #[test_case(7, &[(0, 0), (1, 3)], &[(0, 1), (1, 1)])]
    fn test_mask_function(pattern: u8, flipped: &[(i32, i32)], kept: &[(i32, i32)]) {
        let mask_fn = MaskPattern::new(pattern).unwrap().mask_function();
        for &(x, y) in flipped {
            assert!(mask_fn(x, y), "Mask {pattern} should flip x {x}, y {y}");
        }
        for &(x, y) in kept {
            assert!(!mask_fn(x, y), "Mask {pattern} shouldn't flip x {x}, y {y}");
        }
    }

    #[test_case("1111", 0)]
    #[test_case("11111", 3)]
    #[test_case("1111111", 5)]
    #[test_case("000001111100000", 9)]
    #[test_case("1010101010", 0)]
    fn test_run_penalty(bits: &str, exp: u32) {
        assert_eq!(compute_run_penalty(line(bits)), exp);
    }

    #[test_case("10111010000", 40)]
    #[test_case("00001011101", 40)]
    #[test_case("000010111010000", 80)]
    #[test_case("1011101000", 0)]
    #[test_case("1101110100001", 0)]
    #[test_case("110111010000", 0)]
    #[test_case("000001011101", 0)]
    #[test_case("1011101000010111010000", 120)]
    fn test_finder_pattern_penalty(bits: &str, exp: u32) {
        assert_eq!(compute_finder_pattern_penalty(line(bits)), exp);
    }

    #[test]
    fn test_balance_penalty() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L);
        let w = qr.width() as i16;
        for r in 0..w {
            for c in 0..w {
                qr.set(r, c, Module::Data(Color::Light));
            }
        }
        assert_eq!(compute_balance_penalty(&qr), 100);

        // 221 of 441 dark modules is a hair above 50%
        let mut dark = 0;
        'outer: for r in 0..w {
            for c in 0..w {
                if dark == 221 {
                    break 'outer;
                }
                qr.set(r, c, Module::Data(Color::Dark));
                dark += 1;
            }
        }
        assert_eq!(compute_balance_penalty(&qr), 0);
    }

    #[test]
    fn test_tie_goes_to_lower_index() {
        assert_eq!(*select_best_mask(&[9, 4, 7, 4, 5, 8, 4, 6]), 1);
        assert_eq!(*select_best_mask(&[3, 3, 3, 3, 3, 3, 3, 3]), 0);
        assert_eq!(*select_best_mask(&[9, 9, 9, 9, 9, 9, 9, 2]), 7);
    }

    #[test]
    fn test_best_mask_has_minimum_penalty() {
        let unmasked = unmasked_qr(3, ECLevel::M, b"Hello, world! 123");
        let mut qr = unmasked.clone();
        let best = apply_best_mask(&mut qr);
        assert_eq!(qr.mask(), Some(best));

        let best_pen = compute_total_penalty(&qr);
        for m in MaskPattern::all() {
            let mut trial = unmasked.clone();
            trial.apply_mask(m);
            let pen = compute_total_penalty(&trial);
            assert!(best_pen < pen || (best_pen == pen && best <= m), "Mask {m:?} beats {best:?}");
        }
    }

    #[test]
    fn test_mask_selection_is_deterministic() {
        let unmasked = unmasked_qr(7, ECLevel::H, &[0x5A; 200]);
        let masks = (0..4)
            .map(|_| {
                let mut qr = unmasked.clone();
                apply_best_mask(&mut qr)
            })
            .collect::<Vec<_>>();
        assert!(masks.windows(2).all(|w| w[0] == w[1]));
    }
}
