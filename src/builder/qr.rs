use std::ops::Deref;

use crate::common::{
    bit_utils::BitStream,
    codec::Mode,
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::{
        format_info, Color, ECLevel, Version, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN,
    },
};
use crate::symbol::Symbol;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver, ecl, mask: None }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    #[cfg(test)]
    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }

    // Freezes the masked grid into a symbol of plain dark/light modules
    pub fn into_symbol(self, mode: Mode) -> Symbol {
        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found in QR");
        let mask = self.mask.unwrap_or_else(|| unreachable!("QR should be masked before freezing"));
        let modules = self.grid.iter().map(|m| matches!(**m, Color::Dark)).collect();
        Symbol::new(self.ver, self.ecl, mode, mask, modules)
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 finder centred at (r, c) along with its light separator
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (4 | -4, _) | (_, 4 | -4) => Module::Func(Color::Light),
                        (3 | -3, _) | (_, 3 | -3) => Module::Func(Color::Dark),
                        (2 | -2, _) | (_, 2 | -2) => Module::Func(Color::Light),
                        _ => Module::Func(Color::Dark),
                    },
                );
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        let (off, last) = (EncRegionIter::VERT_TIMING_COL, w - 9);
        self.draw_line(off, 8, off, last);
        self.draw_line(8, off, last, off);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                let m =
                    if j & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(r1, j, m);
            }
        } else {
            for i in r1..=r2 {
                let m =
                    if i & 1 == 0 { Module::Func(Color::Dark) } else { Module::Func(Color::Light) };
                self.set(i, c1, m);
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    // Skipped when the centre overlaps an already reserved zone
    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        if self.get(r, c) != Module::Empty {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                self.set(
                    r + i,
                    c + j,
                    match (i, j) {
                        (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Func(Color::Dark),
                        _ => Module::Func(Color::Light),
                    },
                )
            }
        }
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    // Maps the n-th module of a format info run to its offset along row or column 8,
    // skipping the timing pattern and jumping to the far side after the 8th module
    fn format_info_offset(&self, n: i16) -> i16 {
        match n {
            0..=5 => n,
            6 | 7 => n + 1,
            _ => n + self.w as i16 - 15,
        }
    }

    fn reserve_format_area(&mut self) {
        self.draw_format_info(0);
    }

    // Bits are drawn most significant first
    fn draw_format_info(&mut self, format_info: u16) {
        let len = FORMAT_INFO_BIT_LEN as i16;
        let bit = |i: i16| Color::from((format_info >> (len - 1 - i)) & 1 == 1);
        for i in 0..len {
            // Row 8 left to right
            let c = self.format_info_offset(i);
            self.set(8, c, Module::Format(bit(i)));

            // Column 8 bottom to top
            let r = self.format_info_offset(len - 1 - i);
            self.set(r, 8, Module::Format(bit(i)));
        }
        // Top right copy of the row run starts one module earlier
        self.set(8, -8, Module::Format(bit(7)));
    }

    fn draw_dark_module(&mut self) {
        self.set(-8, 8, Module::Func(Color::Dark));
    }

    fn draw_version_info(&mut self) {
        if *self.ver < 7 {
            return;
        }
        let ver_info = self.ver.info();
        for i in 0..VERSION_INFO_BIT_LEN as i16 {
            let clr = Color::from((ver_info >> i) & 1 == 1);
            let (a, b) = (i / 3, i % 3 - 11);
            // Bottom left
            self.set(b, a, Module::Version(clr));
            // Top right
            self.set(a, b, Module::Version(clr));
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.reserve_format_area();
        self.draw_alignment_patterns();
        self.draw_timing_pattern();
        self.draw_dark_module();
        self.draw_version_info();
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_encoding_region(&mut self, mut payload: BitStream) {
        for (r, c) in EncRegionIter::new(self.ver) {
            if matches!(self.get(r, c), Module::Empty) {
                // Cells past the end of the stream are remainder bits
                let bit = payload.next().unwrap_or(false);
                self.set(r, c, Module::Data(Color::from(bit)));
            }
        }

        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found after placement");
    }

    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let mask_fn = pattern.mask_function();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(c as i32, r as i32) {
                    if let Module::Data(clr) = self.get(r, c) {
                        self.set(r, c, Module::Data(!clr))
                    }
                }
            }
        }
        self.draw_format_info(format_info(self.ecl, *pattern));
    }
}
