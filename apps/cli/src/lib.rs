//! # Factura CLI Library
//!
//! Everything behind the `factura` binary: argument definitions, commands,
//! configuration and the error type printed to the user.
//!
//! ## Module Organization
//! ```text
//! factura_cli/
//! ├── lib.rs          ◄─── You are here (startup, dispatch, output)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── config.rs   ◄─── AppConfig (TOML file, env, flags)
//! │   └── draft.rs    ◄─── InvoiceDraft (rows being entered)
//! ├── commands/
//! │   ├── invoice.rs  ◄─── create, edit, show, list, delete, backup
//! │   ├── dashboard.rs◄─── stats
//! │   └── config.rs   ◄─── config
//! └── error.rs        ◄─── ApiError + exit statuses
//! ```
//!
//! Commands take `&Store` / `&AppConfig` explicitly and return
//! `Result<T, ApiError>` with serializable `T`. This file decides whether
//! `T` is printed as text or JSON.

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::fmt::Write as _;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use factura_core::{InvoiceTotals, LineItem};
use factura_store::Store;

use cli::{Cli, Command};
use error::ApiError;
use state::{AppConfig, InvoiceDraft};

/// Runs the CLI and returns the process exit status.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Lifecycle                                 │
/// │                                                                         │
/// │  1. Parse arguments (clap exits 2 on usage errors)                      │
/// │  2. Initialize logging (stderr, RUST_LOG or -v)                         │
/// │  3. Load config: file → FACTURA_* env → flags, then validate            │
/// │  4. Open the store (creates cache/ if missing)                          │
/// │  5. Dispatch the command                                                │
/// │  6. Print result on stdout, or the error with its exit status           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    match execute(cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            if json {
                match serde_json::to_string_pretty(&err) {
                    Ok(body) => println!("{}", body),
                    Err(_) => eprintln!("{}", err),
                }
            } else {
                eprintln!("{}", err);
            }
            err.exit_code()
        }
    }
}

/// Loads configuration, opens the store and runs one command.
///
/// Returns the text to print on stdout, newline-terminated.
pub fn execute(cli: Cli) -> Result<String, ApiError> {
    let config = AppConfig::load(cli.config.as_deref())?
        .with_overrides(cli.data_dir, cli.backup_dir);
    config.validate()?;

    debug!(
        data_dir = %config.storage.data_dir.display(),
        backup_dir = %config.storage.backup_dir.display(),
        "Configuration loaded"
    );

    dispatch(&config, cli.command, cli.json)
}

/// Opens the store for commands that read or write invoices.
fn open_store(config: &AppConfig) -> Result<Store, ApiError> {
    Ok(Store::open(config.store_config())?)
}

fn dispatch(config: &AppConfig, command: Command, json: bool) -> Result<String, ApiError> {
    match command {
        Command::Create(args) => {
            let store = &open_store(config)?;
            let draft = draft_from(InvoiceDraft::new(), args.items)?;
            let saved = commands::invoice::create_invoice(store, &draft)?;
            info!(number = %saved.number, "Invoice created");

            if json {
                return to_json(&saved);
            }
            let mut out = format!("Saved invoice {} ({})\n", saved.number, saved.file_name);
            write_totals(&mut out, config, &saved.totals);
            Ok(out)
        }

        Command::Edit {
            number,
            items,
            append,
        } => {
            let store = &open_store(config)?;
            let mut draft = commands::invoice::open_for_edit(store, number)?;
            if !append {
                draft.clear();
            }
            let draft = draft_from(draft, items.items)?;
            let target = draft.editing().unwrap_or(number);
            let saved = commands::invoice::edit_invoice(store, target, &draft)?;

            if json {
                return to_json(&saved);
            }
            let mut out = format!(
                "Updated invoice {} ({} items)\n",
                saved.number, saved.item_count
            );
            write_totals(&mut out, config, &saved.totals);
            Ok(out)
        }

        Command::Show { number, items, raw } => {
            let store = &open_store(config)?;
            if raw {
                return commands::invoice::show_raw(store, number);
            }

            let detail = commands::invoice::show_invoice(store, number)?;
            if json {
                return if items {
                    to_json(&detail.items)
                } else {
                    to_json(&detail)
                };
            }

            let mut out = String::new();
            if !items {
                let _ = writeln!(
                    out,
                    "Invoice {}  {}  {}",
                    detail.summary.number,
                    detail.summary.file_name,
                    local_time(&detail.summary.modified_at)
                );
            }
            write_items(&mut out, config, &detail.items);
            if !items {
                write_totals(&mut out, config, &detail.totals);
            }
            Ok(out)
        }

        Command::List => {
            let store = &open_store(config)?;
            let invoices = commands::invoice::list_invoices(store)?;
            if json {
                return to_json(&invoices);
            }

            if invoices.is_empty() {
                return Ok("No invoices yet\n".to_string());
            }

            let mut out = String::new();
            for summary in &invoices {
                let _ = write!(
                    out,
                    "{}  {:<18} {} {:>10}",
                    summary.number,
                    summary.file_name,
                    config.display.currency_symbol,
                    summary.total
                );
                if config.display.show_file_sizes {
                    let _ = write!(out, "  {:>7.2} KB", summary.size_kb());
                }
                let _ = writeln!(out, "  {}", local_time(&summary.modified_at));
            }
            Ok(out)
        }

        Command::Stats => {
            let store = &open_store(config)?;
            let stats = commands::dashboard::get_stats(store)?;
            if json {
                return to_json(&stats);
            }
            Ok(format!(
                "Invoices: {}\nTotal:    {}\nAverage:  {}\nStorage:  {:.2} KB\n",
                stats.count,
                config.format_currency(stats.total_amount),
                config.format_currency(stats.average),
                stats.size_kb()
            ))
        }

        Command::NextNumber => {
            let store = &open_store(config)?;
            let number = commands::invoice::next_number(store)?;
            if json {
                return to_json(&number);
            }
            Ok(format!("{}\n", number))
        }

        Command::Delete { number, yes } => {
            let store = &open_store(config)?;
            let deleted = commands::invoice::delete_invoice(store, number, yes)?;
            if json {
                return to_json(&deleted);
            }
            Ok(format!("Deleted invoice {}\n", deleted.number))
        }

        Command::Backup { number } => {
            let store = &open_store(config)?;
            let backup = commands::invoice::backup_invoice(store, number)?;
            if json {
                return to_json(&backup);
            }
            Ok(format!(
                "Backed up invoice {} to {}\n",
                backup.number,
                backup.path.display()
            ))
        }

        Command::Validate {
            name,
            price,
            quantity,
        } => validate(&name, &price, &quantity, json),

        Command::Config => {
            let effective = commands::config::get_config(config);
            if json {
                to_json(&effective)
            } else {
                Ok(render_config(&effective))
            }
        }
    }
}

/// Appends command-line items after the draft's existing rows.
fn draft_from(mut draft: InvoiceDraft, items: Vec<LineItem>) -> Result<InvoiceDraft, ApiError> {
    let start = draft.rows().len();
    for (offset, item) in items.into_iter().enumerate() {
        draft.set_row(start + offset, item.name, item.unit_price, item.quantity)?;
    }
    Ok(draft)
}

fn validate(name: &str, price: &str, quantity: &str, json: bool) -> Result<String, ApiError> {
    let report = commands::invoice::validate_item(name, price, quantity);
    if !report.valid {
        return Err(ApiError::validation(report.errors.join("; ")));
    }

    if json {
        to_json(&report)
    } else {
        Ok("valid\n".to_string())
    }
}

fn render_config(config: &AppConfig) -> String {
    let source = config
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());

    format!(
        "config file:     {}\ndata_dir:        {}\nbackup_dir:      {}\ncurrency_symbol: {}\nshow_file_sizes: {}\n",
        source,
        config.storage.data_dir.display(),
        config.storage.backup_dir.display(),
        config.display.currency_symbol,
        config.display.show_file_sizes
    )
}

fn write_items(out: &mut String, config: &AppConfig, items: &[LineItem]) {
    for item in items {
        let _ = writeln!(
            out,
            "  {:<30} {:>4} x {} = {}",
            item.name,
            item.quantity,
            config.format_currency(item.unit_price),
            config.format_currency(item.line_total())
        );
    }
}

fn write_totals(out: &mut String, config: &AppConfig, totals: &InvoiceTotals) {
    let _ = writeln!(out, "  Subtotal: {}", config.format_currency(totals.subtotal));
    let _ = writeln!(out, "  IGV 18%:  {}", config.format_currency(totals.tax));
    let _ = writeln!(out, "  Total:    {}", config.format_currency(totals.grand_total));
}

fn local_time(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    Ok(body)
}

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays
/// machine-readable.
///
/// ## Log Levels
/// - default: `warn,factura=info`
/// - `-v`: `debug`
/// - `-vv`: `trace`
/// - `RUST_LOG` wins over all of the above
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn,factura=info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
