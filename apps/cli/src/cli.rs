//! # Command-Line Interface
//!
//! Argument definitions for the `factura` binary.
//!
//! ```text
//! factura [--config PATH] [--data-dir DIR] [--backup-dir DIR] [--json] [-v] <COMMAND>
//!
//!   create      --item "Pizza:10.00:2" --item "Inca Kola:5:1"
//!   edit 7      --item "Ceviche:35:1" [--append]
//!   show 7      [--items | --raw]
//!   list
//!   stats
//!   next-number
//!   delete 7    --yes
//!   backup 7
//!   validate    "Lomo Saltado" 32.00 2
//!   config
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use factura_core::{InvoiceNumber, LineItem, Money};

#[derive(Debug, Parser)]
#[command(name = "factura", version, about = "Invoice manager for Peru Delivery")]
pub struct Cli {
    /// Config file (default: platform config dir/factura.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Invoice directory
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Backup directory
    #[arg(long, global = true, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new invoice
    Create(ItemArgs),

    /// Replace the items of an existing invoice, keeping its number
    Edit {
        number: InvoiceNumber,

        #[command(flatten)]
        items: ItemArgs,

        /// Keep the current items and add the new ones after them
        #[arg(long)]
        append: bool,
    },

    /// Show one invoice
    Show {
        number: InvoiceNumber,

        /// Print only the line items
        #[arg(long, conflicts_with = "raw")]
        items: bool,

        /// Print the stored file unchanged
        #[arg(long)]
        raw: bool,
    },

    /// List all invoices
    List,

    /// Invoice count, sum and average
    Stats,

    /// Print the number the next invoice will receive
    NextNumber,

    /// Delete an invoice permanently
    Delete {
        number: InvoiceNumber,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Copy an invoice to the backup directory
    Backup { number: InvoiceNumber },

    /// Check a product entry without saving anything
    Validate {
        name: String,
        price: String,
        quantity: String,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Debug, Args)]
pub struct ItemArgs {
    /// Line item as NAME:PRICE:QTY (repeatable, up to 10)
    #[arg(long = "item", value_name = "NAME:PRICE:QTY", required = true, value_parser = parse_item)]
    pub items: Vec<LineItem>,
}

/// Parses `NAME:PRICE:QTY`, splitting from the right so names may contain `:`.
pub fn parse_item(input: &str) -> Result<LineItem, String> {
    let mut parts = input.rsplitn(3, ':');
    let (Some(quantity), Some(price), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected NAME:PRICE:QTY, got '{}'", input));
    };

    let price: Money = price.parse().map_err(|e| format!("{}", e))?;
    let quantity: i64 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("quantity '{}' is not a whole number", quantity.trim()))?;

    Ok(LineItem::new(name.trim(), price, quantity))
}
