use crate::common::{
    codec::Mode,
    mask::MaskPattern,
    metadata::{Color, ECLevel, Version},
};

// Finished QR symbol. Row major grid of modules where true is dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    ver: Version,
    ecl: ECLevel,
    mode: Mode,
    mask: MaskPattern,
    w: usize,
    modules: Box<[bool]>,
}

impl Symbol {
    pub(crate) fn new(
        ver: Version,
        ecl: ECLevel,
        mode: Mode,
        mask: MaskPattern,
        modules: Box<[bool]>,
    ) -> Self {
        let w = ver.width();
        debug_assert!(modules.len() == w * w, "Grid should be {w}x{w}: {}", modules.len());
        Self { ver, ecl, mode, mask, w, modules }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    // Mode of the encoded segment, byte if kanji fell back
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, r: usize, c: usize) -> Color {
        Color::from(self.is_dark(r, c))
    }

    pub fn is_dark(&self, r: usize, c: usize) -> bool {
        assert!(r < self.w && c < self.w, "Module ({r}, {c}) is outside the {0}x{0} grid", self.w);
        self.modules[r * self.w + c]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks_exact(self.w)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Version: {}, Ec level: {:?}, Mode: {}, Mask: {} }}",
            *self.ver, self.ecl, self.mode, *self.mask
        )
    }
}
