//! # Export Workbook
//!
//! Writes the inventory as a workbook directory, one CSV sheet per dataset.
//!
//! ```text
//! export/
//! ├── productos.csv   ID, PRODUCTO, CATEGORIA, PRESENTACION, STOCK_INICIAL,
//! │                   STOCK, VENTAS_ACUMULADAS, COMPRAS_ACUMULADAS
//! ├── ventas.csv      ENTRY_ID, FECHA, ID, PRODUCTO, CANTIDAD_VENDIDA
//! └── compras.csv     ENTRY_ID, FECHA, ID, PRODUCTO, CANTIDAD_COMPRADA
//! ```
//!
//! Sheet headers normalize to the same canonical names the importers
//! accept, so `productos.csv` can be loaded back as a catalog and the
//! ledger sheets re-imported as movement files.

use std::path::{Path, PathBuf};

use csv::Writer;
use llano_core::{Inventory, Movement, MovementKind, Product};
use serde::Serialize;
use tracing::info;

use crate::error::{IoError, IoResult};

pub const PRODUCTS_SHEET: &str = "productos.csv";
pub const SALES_SHEET: &str = "ventas.csv";
pub const PURCHASES_SHEET: &str = "compras.csv";

/// Paths of the sheets written by [`export_workbook`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedWorkbook {
    pub products: PathBuf,
    pub sales: PathBuf,
    pub purchases: PathBuf,
}

#[derive(Serialize)]
struct ProductRow<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "PRODUCTO")]
    name: &'a str,
    #[serde(rename = "CATEGORIA")]
    category: &'a str,
    #[serde(rename = "PRESENTACION")]
    presentation: &'a str,
    #[serde(rename = "STOCK_INICIAL")]
    initial_stock: i64,
    #[serde(rename = "STOCK")]
    stock: i64,
    #[serde(rename = "VENTAS_ACUMULADAS")]
    cumulative_sales: i64,
    #[serde(rename = "COMPRAS_ACUMULADAS")]
    cumulative_purchases: i64,
}

impl<'a> From<&'a Product> for ProductRow<'a> {
    fn from(p: &'a Product) -> Self {
        ProductRow {
            id: &p.id,
            name: &p.name,
            category: &p.category,
            presentation: &p.presentation,
            initial_stock: p.initial_stock,
            stock: p.stock,
            cumulative_sales: p.cumulative_sales,
            cumulative_purchases: p.cumulative_purchases,
        }
    }
}

// Quantity header differs per sheet, so rows are written as records
// after an explicit header line.
fn movement_header(kind: MovementKind) -> [&'static str; 5] {
    let quantity = match kind {
        MovementKind::Sale => "CANTIDAD_VENDIDA",
        MovementKind::Purchase => "CANTIDAD_COMPRADA",
    };
    ["ENTRY_ID", "FECHA", "ID", "PRODUCTO", quantity]
}

fn movement_record(m: &Movement) -> [String; 5] {
    [
        m.id.to_string(),
        m.recorded_at.to_rfc3339(),
        m.product_id.clone(),
        m.product_name.clone(),
        m.quantity.to_string(),
    ]
}

/// Writes the catalog and both ledgers into `dir`, creating it if needed.
///
/// Existing sheets are overwritten. Callers hold the inventory lock (or a
/// clone) for the duration so all three sheets describe the same state.
pub fn export_workbook(dir: &Path, inventory: &Inventory) -> IoResult<ExportedWorkbook> {
    std::fs::create_dir_all(dir).map_err(|e| IoError::write(dir, e))?;

    let workbook = ExportedWorkbook {
        products: dir.join(PRODUCTS_SHEET),
        sales: dir.join(SALES_SHEET),
        purchases: dir.join(PURCHASES_SHEET),
    };

    write_products(&workbook.products, inventory.catalog().products())?;
    write_movements(
        &workbook.sales,
        MovementKind::Sale,
        inventory.ledger().sales(),
    )?;
    write_movements(
        &workbook.purchases,
        MovementKind::Purchase,
        inventory.ledger().purchases(),
    )?;

    info!(
        dir = %dir.display(),
        products = inventory.catalog().len(),
        sales = inventory.ledger().sales().len(),
        purchases = inventory.ledger().purchases().len(),
        "Exported workbook"
    );
    Ok(workbook)
}

fn create_writer(path: &Path) -> IoResult<Writer<std::fs::File>> {
    let file = std::fs::File::create(path).map_err(|e| IoError::write(path, e))?;
    Ok(Writer::from_writer(file))
}

fn write_products(path: &Path, products: &[Product]) -> IoResult<()> {
    let mut writer = create_writer(path)?;
    if products.is_empty() {
        // serialize() only emits headers alongside the first row
        writer
            .write_record([
                "ID",
                "PRODUCTO",
                "CATEGORIA",
                "PRESENTACION",
                "STOCK_INICIAL",
                "STOCK",
                "VENTAS_ACUMULADAS",
                "COMPRAS_ACUMULADAS",
            ])
            .map_err(|e| IoError::from_csv_write(path, e))?;
    }
    for product in products {
        writer
            .serialize(ProductRow::from(product))
            .map_err(|e| IoError::from_csv_write(path, e))?;
    }
    writer.flush().map_err(|e| IoError::write(path, e))
}

fn write_movements(path: &Path, kind: MovementKind, entries: &[Movement]) -> IoResult<()> {
    let mut writer = create_writer(path)?;
    writer
        .write_record(movement_header(kind))
        .map_err(|e| IoError::from_csv_write(path, e))?;
    for entry in entries {
        writer
            .write_record(movement_record(entry))
            .map_err(|e| IoError::from_csv_write(path, e))?;
    }
    writer.flush().map_err(|e| IoError::write(path, e))
}
