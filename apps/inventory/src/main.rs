//! # llano: Inventory Reconciliation CLI
//!
//! Loads a catalog, applies sales and purchase files, prints the results
//! and the dashboard as JSON, and optionally exports the workbook.
//!
//! ## Usage
//! ```bash
//! # Catalog plus one sales file
//! llano --catalog catalogo.csv --sales ventas.csv
//!
//! # Full run with export, letting stock go negative
//! llano --catalog catalogo.csv --sales ventas.csv --purchases compras.csv \
//!       --export ./export --allow-negative-stock
//!
//! # Export into the configured [export] directory
//! llano --catalog catalogo.csv --export
//!
//! # Explicit config file
//! llano --config ./inventory.toml --catalog catalogo.csv
//! ```
//!
//! ## Run Order
//! 1. Load config (file → LLANO_* environment → flags)
//! 2. load_catalog
//! 3. import_movements (sales)
//! 4. import_movements (purchases)
//! 5. dashboard
//! 6. export_workbook (when --export is given; without a value it uses
//!    the configured directory)

use std::env;
use std::path::PathBuf;

use llano_app::commands::{movement, product, report};
use llano_app::{init_tracing, ApiError, InventoryConfig, InventoryState};
use llano_core::MovementKind;
use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    catalog: Option<PathBuf>,
    sales: Option<PathBuf>,
    purchases: Option<PathBuf>,
    export: Option<ExportTarget>,
    allow_negative_stock: bool,
    help: bool,
}

/// Where `--export` writes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ExportTarget {
    Configured,
    Dir(PathBuf),
}

/// Consumes the value following the flag at `args[*i]`.
fn take_value(args: &[String], i: &mut usize) -> Result<PathBuf, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(PathBuf::from)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        let flag = args[i].as_str();

        match flag {
            "--config" | "-c" => parsed.config = Some(take_value(args, &mut i)?),
            "--catalog" => parsed.catalog = Some(take_value(args, &mut i)?),
            "--sales" | "-s" => parsed.sales = Some(take_value(args, &mut i)?),
            "--purchases" | "-p" => parsed.purchases = Some(take_value(args, &mut i)?),
            "--export" | "-e" => {
                parsed.export = Some(match args.get(i + 1) {
                    Some(dir) if !dir.starts_with('-') => {
                        i += 1;
                        ExportTarget::Dir(PathBuf::from(dir))
                    }
                    _ => ExportTarget::Configured,
                });
            }
            "--allow-negative-stock" => parsed.allow_negative_stock = true,
            "--help" | "-h" => parsed.help = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(parsed)
}

fn print_help() {
    println!("Llano Inventory - stock reconciliation");
    println!();
    println!("Usage: llano [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>       Config file (default: platform config dir)");
    println!("      --catalog <CSV>       Initial catalog (ID, Producto, Stock_Inicial, ...)");
    println!("  -s, --sales <CSV>         Sales file (ID + quantity column)");
    println!("  -p, --purchases <CSV>     Purchases file (ID + quantity column)");
    println!("  -e, --export [DIR]        Write productos/ventas/compras CSV sheets");
    println!("                            (default: [export] directory from config)");
    println!("      --allow-negative-stock  Let sales drive stock below zero");
    println!("  -h, --help                Show this help message");
}

#[derive(Serialize)]
struct Output<'a, T: Serialize> {
    command: &'a str,
    result: T,
}

fn emit<T: Serialize>(command: &str, result: Result<T, ApiError>) -> Result<(), ApiError> {
    match result {
        Ok(value) => {
            let line = serde_json::to_string_pretty(&Output {
                command,
                result: value,
            })
            .map_err(|e| ApiError::internal(e.to_string()))?;
            println!("{}", line);
            Ok(())
        }
        Err(err) => {
            error!(command, code = ?err.code, "{}", err.message);
            let line = serde_json::to_string_pretty(&Output {
                command,
                result: &err,
            })
            .map_err(|e| ApiError::internal(e.to_string()))?;
            println!("{}", line);
            Err(err)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw: Vec<String> = env::args().collect();
    let args = parse_args(&raw)?;
    if args.help {
        print_help();
        return Ok(());
    }

    init_tracing();

    let mut config = InventoryConfig::load(args.config.clone()).map_err(ApiError::from)?;
    if args.allow_negative_stock {
        config.stock.allow_negative_stock = true;
    }
    info!(
        allow_negative_stock = config.stock.allow_negative_stock,
        "Starting Llano Inventory"
    );

    let state = InventoryState::new(config.stock_policy());

    if let Some(path) = &args.catalog {
        emit("load_catalog", product::load_catalog(&state, path))?;
    }
    if let Some(path) = &args.sales {
        emit(
            "import_sales",
            movement::import_movements(&state, path, MovementKind::Sale),
        )?;
    }
    if let Some(path) = &args.purchases {
        emit(
            "import_purchases",
            movement::import_movements(&state, path, MovementKind::Purchase),
        )?;
    }

    emit("dashboard", report::dashboard(&state, &config))?;

    match &args.export {
        Some(ExportTarget::Dir(dir)) => {
            emit("export_workbook", report::export_workbook(&state, dir))?;
        }
        Some(ExportTarget::Configured) => {
            emit(
                "export_workbook",
                report::export_to_configured_dir(&state, &config),
            )?;
        }
        None => {}
    }

    Ok(())
}
