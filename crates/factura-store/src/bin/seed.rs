//! # Seed Data Generator
//!
//! Fills an invoice directory with sample invoices for development.
//!
//! ## Usage
//! ```bash
//! # Generate 20 invoices (default) into ./cache
//! cargo run -p factura-store --bin seed
//!
//! # Generate a custom amount
//! cargo run -p factura-store --bin seed -- --count 50
//!
//! # Specify the invoice directory
//! cargo run -p factura-store --bin seed -- --dir ./data/cache
//! ```
//!
//! ## Generated Invoices
//! Each invoice has 1 to 4 line items drawn from a Peruvian delivery menu:
//! - Platos (lomo saltado, ceviche, ají de gallina, ...)
//! - Bebidas (chicha morada, Inca Kola, ...)
//! - Postres (suspiro limeño, picarones, ...)
//!
//! Prices and quantities are derived from the invoice index, so the same
//! arguments always produce the same files.

use std::env;

use factura_core::{prepare_invoice, LineItem, Money};
use factura_store::{Store, StoreConfig};

/// Menu entries: (name, price in céntimos)
const MENU: &[(&str, i64)] = &[
    ("Lomo Saltado", 3200),
    ("Ceviche Mixto", 3800),
    ("Ají de Gallina", 2600),
    ("Arroz Chaufa", 2200),
    ("Pollo a la Brasa 1/4", 1990),
    ("Anticuchos", 1800),
    ("Causa Limeña", 1500),
    ("Papa a la Huancaína", 1400),
    ("Tallarín Saltado", 2400),
    ("Chicha Morada 1L", 800),
    ("Inca Kola 500ml", 450),
    ("Agua San Luis", 300),
    ("Emoliente", 350),
    ("Suspiro Limeño", 900),
    ("Picarones", 1000),
    ("Mazamorra Morada", 700),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 20;
    let mut dir = String::from("./cache");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Factura Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of invoices to generate (default: 20)");
                println!("  -d, --dir <PATH>   Invoice directory (default: ./cache)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Factura Seed Data Generator");
    println!("==============================");
    println!("Directory: {}", dir);
    println!("Invoices:  {}", count);
    println!();

    let store = Store::open(StoreConfig::new(&dir))?;
    let repo = store.invoices();

    let existing = repo.count()?;
    if existing > 0 {
        println!("⚠ Directory already has {} invoices", existing);
        println!("  New invoices continue from number {}.", repo.next_invoice_number()?);
        println!();
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let prepared = prepare_invoice(&generate_items(seed))?;

        match repo.save(&prepared.items, &prepared.totals) {
            Ok(saved) => {
                generated += 1;
                println!(
                    "  ✓ {}  S/. {:>8}",
                    repo.file_name(saved.number),
                    prepared.totals.grand_total
                );
            }
            Err(e) => {
                eprintln!("Failed to save invoice: {}", e);
                break;
            }
        }
    }

    println!();
    println!("✓ Generated {} invoices in {:?}", generated, start.elapsed());

    let stats = repo.stats()?;
    println!(
        "  Store now holds {} invoices, S/. {} in total",
        stats.count, stats.total_amount
    );

    Ok(())
}

/// Builds 1 to 4 line items for the `seed`-th invoice.
fn generate_items(seed: usize) -> Vec<LineItem> {
    let lines = 1 + seed % 4;

    (0..lines)
        .map(|line| {
            let (name, price) = MENU[(seed * 7 + line * 5) % MENU.len()];
            let quantity = 1 + ((seed + line) % 3) as i64;
            LineItem::new(name, Money::from_cents(price), quantity)
        })
        .collect()
}
