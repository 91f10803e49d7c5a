//! # Bulk Import Parser
//!
//! Turns a decoded tabular record set into validated requests. No file
//! access happens here; `llano-io` reads the file into a [`RawTable`]
//! before the inventory lock is taken.
//!
//! ## Movement File Flow
//! ```text
//! RawTable { headers, rows }
//!      │
//!      ├── catalog empty?            → CoreError::EmptyCatalog
//!      ├── HeaderMap::require("ID")  → MissingColumn("ID")
//!      ├── resolve_quantity(kind)    → MissingColumn / AmbiguousColumn
//!      ▼
//! for each row:
//!      qty = coerce_quantity(cell)   ("4" → 4, "4.7" → 4, "x" → 0)
//!      qty <= 0   → dropped (counted, not reported)
//!      id blank   → RejectedRow
//!      otherwise  → MovementRequest { normalized id, qty, kind }
//! ```
//!
//! Referential checks against the catalog are left to the processor.

use tracing::debug;

use crate::catalog::ProductCatalog;
use crate::error::{CoreError, CoreResult};
use crate::header::{
    normalize_product_id, HeaderMap, CATEGORY_COLUMN, ID_COLUMN, INITIAL_STOCK_COLUMN,
    PRESENTATION_COLUMN, PRODUCT_COLUMN,
};
use crate::types::{MovementKind, MovementRequest, NewProduct, RejectedRow};

/// Header row plus data rows, all cells as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new<H, C>(headers: Vec<H>, rows: Vec<Vec<C>>) -> Self
    where
        H: Into<String>,
        C: Into<String>,
    {
        RawTable {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cell at `idx`, or "" for short rows.
fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("").trim()
}

// =============================================================================
// Movement Files
// =============================================================================

/// Output of [`parse_movements`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMovements {
    /// Requests ready for the processor, in file order.
    pub movements: Vec<MovementRequest>,

    /// Rows that could not become a request (blank id).
    pub rejected: Vec<RejectedRow>,

    /// Rows silently skipped because their quantity was <= 0.
    pub dropped: usize,
}

/// Coerces a quantity cell to an integer.
///
/// ```rust
/// use llano_core::import::coerce_quantity;
///
/// assert_eq!(coerce_quantity("12"), 12);
/// assert_eq!(coerce_quantity(" 3.9 "), 3);
/// assert_eq!(coerce_quantity("-2.5"), -2);
/// assert_eq!(coerce_quantity("doce"), 0);
/// assert_eq!(coerce_quantity(""), 0);
/// ```
pub fn coerce_quantity(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return value;
    }
    match raw.parse::<f64>() {
        // `as` saturates, NaN becomes 0
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

/// Initial stock cell: exact integers first, then truncated decimals.
/// Non-numeric or non-finite text is `None`.
fn parse_stock(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value.trunc() as i64),
        _ => None,
    }
}

/// Parses a sales or purchases file of the caller-selected `kind`.
///
/// ## Errors
/// * `EmptyCatalog` - nothing to reconcile against
/// * `Format(MissingColumn | AmbiguousColumn)` - header problems
///
/// Fatal errors are raised before any row is looked at.
pub fn parse_movements(
    table: &RawTable,
    kind: MovementKind,
    catalog: &ProductCatalog,
) -> CoreResult<ParsedMovements> {
    if catalog.is_empty() {
        return Err(CoreError::EmptyCatalog);
    }

    let headers = HeaderMap::new(&table.headers);
    let id_col = headers.require(ID_COLUMN)?;
    let qty_col = headers.resolve_quantity(kind)?;

    debug!(
        kind = %kind,
        id_column = %headers.headers()[id_col],
        quantity_column = %headers.headers()[qty_col],
        rows = table.rows.len(),
        "Resolved movement columns"
    );

    let mut parsed = ParsedMovements::default();
    for (i, row) in table.rows.iter().enumerate() {
        let quantity = coerce_quantity(cell(row, qty_col));
        if quantity <= 0 {
            parsed.dropped += 1;
            continue;
        }

        let id = normalize_product_id(cell(row, id_col));
        if id.is_empty() {
            parsed.rejected.push(RejectedRow {
                row: i + 1,
                id,
                reason: "ID is required".to_string(),
            });
            continue;
        }

        parsed.movements.push(MovementRequest::new(id, quantity, kind));
    }

    debug!(
        accepted = parsed.movements.len(),
        rejected = parsed.rejected.len(),
        dropped = parsed.dropped,
        "Parsed movement rows"
    );
    Ok(parsed)
}

// =============================================================================
// Catalog Files
// =============================================================================

/// Output of [`parse_catalog`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCatalog {
    /// (1-based row number, product) pairs in file order.
    pub products: Vec<(usize, NewProduct)>,

    pub rejected: Vec<RejectedRow>,
}

/// Parses an initial catalog file.
///
/// Columns are matched after header normalization, so "Categoría" and
/// "CATEGORIA" both resolve. A blank stock cell means 0; a stock cell that
/// is not a number rejects that row only.
pub fn parse_catalog(table: &RawTable) -> CoreResult<ParsedCatalog> {
    let headers = HeaderMap::new(&table.headers);
    let id_col = headers.require(ID_COLUMN)?;
    let name_col = headers.require(PRODUCT_COLUMN)?;
    let stock_col = headers.require(INITIAL_STOCK_COLUMN)?;
    let category_col = headers.require(CATEGORY_COLUMN)?;
    let presentation_col = headers.require(PRESENTATION_COLUMN)?;

    let mut parsed = ParsedCatalog::default();
    for (i, row) in table.rows.iter().enumerate() {
        let row_number = i + 1;
        let id = cell(row, id_col);

        let raw_stock = cell(row, stock_col);
        let initial_stock = if raw_stock.is_empty() {
            0
        } else {
            match parse_stock(raw_stock) {
                Some(value) => value,
                None => {
                    parsed.rejected.push(RejectedRow {
                        row: row_number,
                        id: normalize_product_id(id),
                        reason: format!("Invalid initial stock: '{}'", raw_stock),
                    });
                    continue;
                }
            }
        };

        parsed.products.push((
            row_number,
            NewProduct {
                id: id.to_string(),
                category: cell(row, category_col).to_string(),
                name: cell(row, name_col).to_string(),
                presentation: cell(row, presentation_col).to_string(),
                initial_stock,
            },
        ));
    }

    debug!(
        products = parsed.products.len(),
        rejected = parsed.rejected.len(),
        "Parsed catalog rows"
    );
    Ok(parsed)
}
