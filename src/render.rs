use std::{fs, io, path::PathBuf};

use image::{GrayImage, Luma};

use crate::symbol::Symbol;

// Renderers
//------------------------------------------------------------------------------

impl Symbol {
    // Margin in modules around text and svg output
    const TEXT_MARGIN: usize = 2;

    // Quiet zone in modules around raster output
    const QUIET_ZONE: u32 = 4;

    // Packs two module rows into each text row. When inverted, dark modules are
    // printed as blanks, which suits light text on a dark terminal.
    pub fn render_as_string(&self, inverted: bool) -> String {
        let (empty, top, bottom, full) =
            if inverted { ('█', '▄', '▀', ' ') } else { (' ', '▀', '▄', '█') };

        let w = self.width();
        let line_len = w + 2 * Self::TEXT_MARGIN;
        let margin_line = empty.to_string().repeat(line_len);
        let side = empty.to_string().repeat(Self::TEXT_MARGIN);

        let mut res = String::with_capacity((w / 2 + 3) * (line_len * 3 + 1));
        res.push_str(&margin_line);
        res.push('\n');
        for r in (0..w).step_by(2) {
            res.push_str(&side);
            for c in 0..w {
                let upper = self.is_dark(r, c);
                let lower = r + 1 < w && self.is_dark(r + 1, c);
                res.push(match (upper, lower) {
                    (true, true) => full,
                    (true, false) => top,
                    (false, true) => bottom,
                    (false, false) => empty,
                });
            }
            res.push_str(&side);
            res.push('\n');
        }
        res.push_str(&margin_line);
        res.push('\n');
        res
    }

    // One rect for the background, then a 1x1 rect per module
    pub fn to_svg(&self, dark: &str, light: &str, background: &str) -> String {
        let w = self.width();
        let total = w + 2 * Self::TEXT_MARGIN;

        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
        svg.push_str(&format!(
            "<svg height=\"{total}\" width=\"{total}\" xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n"
        ));
        svg.push_str(&format!(
            "    <rect x=\"0\" y=\"0\" height=\"{total}\" width=\"{total}\" fill=\"{background}\" />\n"
        ));
        for r in 0..w {
            for c in 0..w {
                let fill = if self.is_dark(r, c) { dark } else { light };
                let (x, y) = (c + Self::TEXT_MARGIN, r + Self::TEXT_MARGIN);
                svg.push_str(&format!(
                    "    <rect x=\"{x}\" y=\"{y}\" height=\"1\" width=\"1\" fill=\"{fill}\" />\n"
                ));
            }
        }
        svg.push_str("</svg>");
        svg
    }

    // Appends the svg extension when missing and returns the written path
    pub fn save_svg(
        &self,
        path: &str,
        dark: &str,
        light: &str,
        background: &str,
    ) -> io::Result<PathBuf> {
        let path = path.trim_end();
        let path =
            if path.ends_with(".svg") { PathBuf::from(path) } else { PathBuf::from(format!("{path}.svg")) };
        fs::write(&path, self.to_svg(dark, light, background))?;
        Ok(path)
    }

    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = Self::QUIET_ZONE * module_sz;
        let qr_sz = self.width() as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::from_pixel(total_sz, total_sz, Luma([255]));
        for (r, row) in self.rows().enumerate() {
            for (c, &dark) in row.iter().enumerate() {
                if !dark {
                    continue;
                }
                let (y0, x0) = (qz_sz + r as u32 * module_sz, qz_sz + c as u32 * module_sz);
                for i in y0..y0 + module_sz {
                    for j in x0..x0 + module_sz {
                        canvas.put_pixel(j, i, Luma([0]));
                    }
                }
            }
        }

        canvas
    }
}
