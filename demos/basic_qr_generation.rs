use std::error::Error;

use qrsmith::{ECLevel, QRBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    // Simplest usage - provide only data, all other settings are automatically chosen
    let qr = QRBuilder::new("Hello, World!").build()?;

    // Convert to image and save
    let img = qr.to_image(4); // 4x scale factor
    img.save("simple_qr.png")?;
    println!("Simple QR code saved to: simple_qr.png");

    // Numeric data with 7% recovery fits the smallest version
    let qr = qrsmith::encode("1234567890", ECLevel::L)?;
    println!("{}", qr.metadata());
    print!("{}", qr.render_as_string(true));

    // Digits, uppercase letters and a few symbols use alphanumeric mode
    let qr = QRBuilder::new("1234567890+CAPITAL LETTERS AND OTHER STUFF...").build()?;
    println!("{}", qr.metadata());
    print!("{}", qr.render_as_string(false));

    // Anything else is encoded as bytes
    let qr = QRBuilder::new("\u{f3c}\u{3064}\u{25d5}_\u{25d5}\u{f3d}\u{3064}").build()?;
    println!("{}", qr.metadata());
    print!("{}", qr.render_as_string(true));

    Ok(())
}
