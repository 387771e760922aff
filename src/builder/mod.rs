mod qr;

pub(crate) use qr::QR;
#[cfg(test)]
pub(crate) use qr::Module;

use std::ops::Deref;

use crate::common::{
    bit_utils::BitStream,
    codec::{encode, encode_with_version},
    debug::{debug_enabled, debug_log},
    ec::{ecc, error_correction_capacity},
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, TextEncoding, Version},
};
use crate::symbol::Symbol;

// Remainder bits appended after the interleaved codewords. Placement fills
// whatever the version actually needs, which is never more than 7.
const REMAINDER_BITS: usize = 8;

pub struct QRBuilder<'a> {
    data: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    text_encoding: TextEncoding,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            version: None,
            ec_level: ECLevel::M,
            text_encoding: TextEncoding::Utf8,
            mask: None,
        }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn text_encoding(&mut self, text_encoding: TextEncoding) -> &mut Self {
        self.text_encoding = text_encoding;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let version = self.version.map_or("None".to_string(), |v| (*v).to_string());
        let mask = self.mask.map_or("None".to_string(), |m| (*m).to_string());
        format!(
            "{{ Version: {version}, Ec level: {:?}, Encoding: {:?}, Mask: {mask} }}",
            self.ec_level, self.text_encoding
        )
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<Symbol> {
        debug_log!("\nGenerating QR {}...", self.metadata());
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }

        // Encode data optimally
        debug_log!("Encoding data...");
        let encoded = match self.version {
            Some(v) => encode_with_version(self.data, self.ec_level, v, self.text_encoding)?,
            None => {
                debug_log!("Finding best version...");
                encode(self.data, self.ec_level, self.text_encoding)?
            }
        };
        let version = encoded.version;

        debug_log!("Constructing payload with ecc & interleaving...");
        let (data_blocks, ecc_blocks) = ecc(encoded.bits.data(), version, self.ec_level);
        let total_codewords = version.total_codewords(self.ec_level);
        let mut payload = BitStream::with_capacity((total_codewords << 3) + REMAINDER_BITS);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));
        payload.push_zeros(REMAINDER_BITS);

        debug_log!("Constructing QR...");
        let mut qr = QR::new(version, self.ec_level);

        debug_log!("Drawing functional patterns...");
        qr.draw_all_function_patterns();

        debug_log!("Drawing encoding region...");
        qr.draw_encoding_region(payload);

        match self.mask {
            Some(m) => {
                debug_log!("Applying mask {}...", *m);
                qr.apply_mask(m);
            }
            None => {
                debug_log!("Finding & applying best mask...");
                apply_best_mask(&mut qr);
            }
        };

        let symbol = qr.into_symbol(encoded.mode);
        self.report(&symbol, encoded.bits.len() >> 3);
        Ok(symbol)
    }

    fn report(&self, symbol: &Symbol, data_codewords: usize) {
        if !debug_enabled() {
            return;
        }

        let version = symbol.version();
        let total_modules = symbol.width() * symbol.width();
        let dark_modules = symbol.count_dark_modules();

        debug_log!("QR generated successfully!");
        debug_log!("Report:");
        debug_log!("{}", symbol.metadata());
        debug_log!(
            "Data capacity: {}, Error capacity: {}",
            data_codewords,
            error_correction_capacity(version, self.ec_level)
        );
        debug_log!(
            "Data size: {}, Total codewords: {}",
            self.data.len(),
            version.total_codewords(self.ec_level)
        );
        debug_log!(
            "Dark cells: {}, Light cells: {}, Balance: {}%\n",
            dark_modules,
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );
    }

    // Takes the i-th codeword of every block in turn. Shorter blocks drop out
    // once exhausted.
    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}
