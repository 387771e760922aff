use std::error::Error;

use qrsmith::{ECLevel, QRBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    // Kanji text with 30% data recovery
    let qr = QRBuilder::new("\u{3053}\u{3093}\u{306b}\u{3061}\u{306f}").ec_level(ECLevel::H).build()?;
    println!("{}", qr.metadata());

    // Colors accept anything svg understands
    let path = qr.save_svg("kanji", "#333333", "#ccccff", "orange")?;
    println!("Kanji QR code saved to: {}", path.display());

    // Mixing kanji with other characters falls back to bytes
    let qr = QRBuilder::new(
        "\u{3053}\u{3093}\u{306b}\u{3061}\u{306f}, if you mix kanji with other alphabets or \
         unsupported characters, it will encode the string as binary data.",
    )
    .build()?;
    println!("{}", qr.metadata());

    let path = qr.save_svg("binary.svg", "black", "white", "white")?;
    println!("Binary QR code saved to: {}", path.display());

    Ok(())
}
