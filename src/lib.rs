//! # qrsmith
//!
//! A Rust library for generating QR codes (ISO/IEC 18004, versions 1 to 40) with
//! Reed-Solomon error correction.
//!
//! ## Features
//!
//! - **Automatic mode selection**: Numeric, alphanumeric, byte or kanji, whichever packs the data best
//! - **Smallest fitting version**: Picks the smallest version that holds the data at the requested error correction level
//! - **Reed-Solomon Error Correction**: Built-in error correction with configurable levels (L, M, Q, H)
//! - **Mask selection**: Scores all 8 masks concurrently and keeps the one with the lowest penalty
//! - **Rendering**: Terminal text, SVG and grayscale images
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrsmith::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only data, all other settings are automatically chosen
//! let symbol = QRBuilder::new("Hello, World!").build()?;
//!
//! println!("{}", symbol.render_as_string(true));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrsmith::{ECLevel, MaskPattern, QRBuilder, TextEncoding, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = QRBuilder::new("Hello, World!")
//!     .version(Version::new(2)?)             // QR version (size) - if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)                  // Error correction level - if not provided, defaults to ECLevel::M
//!     .text_encoding(TextEncoding::Latin1)   // Byte mode encoding - if not provided, defaults to TextEncoding::Utf8
//!     .mask(MaskPattern::new(3)?)            // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! let svg = symbol.to_svg("black", "white", "white");
//! let img = symbol.to_image(4);  // 4x scale factor
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ### Modes
//! - **Numeric**: Digits only, 3 digits per 10 bits
//! - **Alphanumeric**: Digits, uppercase letters and ` $%*+-./:`, 2 characters per 11 bits
//! - **Byte**: UTF-8 by default, or Latin-1
//! - **Kanji**: Shift JIS double byte characters, 13 bits each
//!
//! ## Logging
//!
//! Set the `QRSMITH_DEBUG` environment variable to print build progress and a short
//! report to stderr.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
mod render;
pub mod symbol;

pub use builder::QRBuilder;
pub use common::codec::Mode;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, TextEncoding, Version};
pub use symbol::Symbol;

/// Encodes `data` at the given error correction level, choosing the smallest version
/// and the best mask.
///
/// ```rust
/// use qrsmith::{encode, ECLevel};
///
/// let symbol = encode("1234567890", ECLevel::L).unwrap();
/// assert_eq!(*symbol.version(), 1);
/// ```
pub fn encode(data: &str, ec_level: ECLevel) -> QRResult<Symbol> {
    QRBuilder::new(data).ec_level(ec_level).build()
}
