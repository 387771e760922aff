use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::time::Instant;

use qrsmith::{ECLevel, QRBuilder};

const ITERATIONS: u32 = 20;

fn print_table<N>(result: &HashMap<String, HashMap<String, N>>, rows: &[&str], columns: &[&str])
where
    N: Display + Debug + Default,
{
    let cell_w = 15;
    let df = N::default();
    let divider = "-".repeat(columns.len() * (cell_w + 2) + 1);

    println!("{divider}");
    let mut header = String::from("| ");
    for c in columns {
        header.push_str(&format!("{c:<cell_w$}| "));
    }
    println!("{header}");
    println!("{divider}");

    for hr in rows {
        let mut row = format!("| {hr:<cell_w$}| ");
        let r = result.get(&hr.to_string());
        for c in columns.iter().skip(1) {
            let cell = r.and_then(|r| r.get(&c.to_string())).unwrap_or(&df);
            row.push_str(&format!("{cell:<cell_w$}| "));
        }
        println!("{row}");
    }

    println!("{divider}");
}

fn datasets() -> Vec<(&'static str, String)> {
    vec![
        ("numeric", "1234567890".repeat(70)),
        ("alphanumeric", "HELLO WORLD $%*+-./:".repeat(20)),
        ("byte", "Hello, world! \u{1f30e} ".repeat(20)),
        ("kanji", "点茗".repeat(60)),
        ("url", "https://example.com/some/long/path?query=string".to_string()),
    ]
}

// Average build time in microseconds
fn benchmark_encoding() {
    let levels = [("L", ECLevel::L), ("M", ECLevel::M), ("Q", ECLevel::Q), ("H", ECLevel::H)];
    let data = datasets();

    let mut time: HashMap<String, HashMap<String, u128>> = HashMap::new();
    for (name, ecl) in levels {
        let row = time.entry(name.to_string()).or_default();
        for (kind, text) in data.iter() {
            let start = Instant::now();
            for _ in 0..ITERATIONS {
                match QRBuilder::new(text).ec_level(ecl).build() {
                    Ok(symbol) => {
                        std::hint::black_box(symbol);
                    }
                    Err(e) => {
                        eprintln!("Failed to encode {kind} at {name}: {e}");
                        break;
                    }
                }
            }
            row.insert(kind.to_string(), start.elapsed().as_micros() / ITERATIONS as u128);
        }
    }

    let mut columns = vec!["EC level (µs)"];
    columns.extend(data.iter().map(|(k, _)| *k));
    print_table(&time, &["L", "M", "Q", "H"], &columns);
}

fn main() {
    println!("🚀 Running qrsmith Benchmark Suite");
    println!("==================================\n");

    let total_start = Instant::now();

    println!("🔧 Running Encoding Benchmarks...");
    println!("---------------------------------");
    benchmark_encoding();

    println!("\n✅ All benchmarks completed!");
    println!("Total time elapsed: {:?}", total_start.elapsed());
}
