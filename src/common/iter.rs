use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

// Walks column pairs right to left, alternating upward and downward, yielding
// the right cell before the left cell of each row. Callers skip reserved cells.
pub struct EncRegionIter {
    w: i16,
    // Base column of the current pair, before skipping the vertical timing column
    base_c: i16,
    // Rows left to visit in the current pair
    base_r: i16,
    // Whether the left cell of the current row is due
    left: bool,
}

impl EncRegionIter {
    pub const VERT_TIMING_COL: i16 = 6;

    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { w, base_c: w - 1, base_r: w - 1, left: false }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.base_c < 1 {
            return None;
        }

        let c = if self.base_c < Self::VERT_TIMING_COL + 2 { self.base_c - 1 } else { self.base_c };
        let r = if self.base_c % 4 == 2 { self.w - self.base_r - 1 } else { self.base_r };

        if !self.left {
            self.left = true;
            return Some((r, c));
        }

        self.left = false;
        if self.base_r > 0 {
            self.base_r -= 1;
        } else {
            self.base_r = self.w - 1;
            self.base_c -= 2;
        }
        Some((r, c - 1))
    }
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::EncRegionIter;
    use crate::common::metadata::Version;

    #[test]
    fn test_first_column_pair_goes_up() {
        let coords = EncRegionIter::new(Version::new(1).unwrap()).take(6).collect::<Vec<_>>();
        assert_eq!(coords, vec![(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);
    }

    #[test]
    fn test_second_column_pair_goes_down() {
        let coords = EncRegionIter::new(Version::new(1).unwrap()).skip(42).take(4).collect::<Vec<_>>();
        assert_eq!(coords, vec![(0, 18), (0, 17), (1, 18), (1, 17)]);
    }

    #[test]
    fn test_skips_timing_column() {
        for v in [1, 7, 40] {
            let version = Version::new(v).unwrap();
            let w = version.width() as i16;
            let coords = EncRegionIter::new(version).collect::<Vec<_>>();
            assert!(coords.iter().all(|&(_, c)| c != EncRegionIter::VERT_TIMING_COL));
            let unique = coords.iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), coords.len());
            assert_eq!(coords.len() as i16, w * (w - 1));
        }
    }

    #[test]
    fn test_last_column_pair() {
        let coords = EncRegionIter::new(Version::new(1).unwrap()).collect::<Vec<_>>();
        assert_eq!(coords[coords.len() - 2..], [(20, 1), (20, 0)]);
    }
}
