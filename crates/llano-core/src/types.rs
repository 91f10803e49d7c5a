//! # Domain Types
//!
//! Core domain types used throughout Llano Inventory.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────────┐                      │
//! │  │      Product        │   │      Movement       │                      │
//! │  │  ─────────────────  │   │  ─────────────────  │                      │
//! │  │  id (normalized)    │◄──│  product_id         │                      │
//! │  │  name, category     │   │  product_name (snap)│                      │
//! │  │  presentation       │   │  quantity (> 0)     │                      │
//! │  │  stock              │   │  kind               │                      │
//! │  │  cumulative_sales   │   │  id, recorded_at    │                      │
//! │  │  cumulative_purch.  │   └─────────────────────┘                      │
//! │  └─────────────────────┘                                                │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────────┐                      │
//! │  │   MovementKind      │   │    BatchResult      │                      │
//! │  │  Sale | Purchase    │   │  succeeded_count    │                      │
//! │  └─────────────────────┘   │  failed_ids         │                      │
//! │                            └─────────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A [`Movement`] copies the product name at application time. Renaming or
//! removing the product later never rewrites history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

// =============================================================================
// Product
// =============================================================================

/// A stock-keeping unit in the catalog.
///
/// ## Invariant
/// `stock == initial_stock + cumulative_purchases - cumulative_sales`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Normalized (trimmed, upper-case) identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    pub category: String,

    /// Packaging, e.g. "Caja", "Unidad", "Litro".
    pub presentation: String,

    /// Stock at creation time.
    pub initial_stock: i64,

    /// Current stock. Negative only when the stock-floor policy allows it.
    pub stock: i64,

    /// Units sold so far. Never decreases.
    pub cumulative_sales: i64,

    /// Units purchased so far. Never decreases.
    pub cumulative_purchases: i64,
}

impl Product {
    /// Returns true when the product is in the flagged negative-stock state.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.stock < 0
    }

    /// Checks whether a sale of `quantity` stays at or above zero.
    ///
    /// This is the raw stock floor only. It ignores `StockPolicy`; callers
    /// that honor `allow_negative_stock` go through `MovementProcessor`.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// Input for a new catalog entry (manual form or initial load).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub id: String,
    pub category: String,
    pub name: String,
    pub presentation: String,
    pub initial_stock: i64,
}

/// Explicit field edit. `None` leaves the field untouched.
///
/// Stock and cumulative counters are deliberately absent: they only move
/// through the movement processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub presentation: Option<String>,
}

impl ProductPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.presentation.is_none()
    }
}

// =============================================================================
// Movement Kind
// =============================================================================

/// The two quantity-changing event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MovementKind {
    /// Stock goes down, cumulative sales go up.
    Sale,
    /// Stock goes up, cumulative purchases go up.
    Purchase,
}

impl MovementKind {
    /// Signed stock delta for a positive quantity.
    #[inline]
    pub fn signed(&self, quantity: i64) -> i64 {
        match self {
            MovementKind::Sale => -quantity,
            MovementKind::Purchase => quantity,
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementKind::Sale => write!(f, "sale"),
            MovementKind::Purchase => write!(f, "purchase"),
        }
    }
}

impl std::str::FromStr for MovementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sale" | "sales" | "venta" | "ventas" => Ok(MovementKind::Sale),
            "purchase" | "purchases" | "compra" | "compras" => Ok(MovementKind::Purchase),
            other => Err(format!(
                "Unknown movement kind: '{}'. Valid options: sale, purchase",
                other
            )),
        }
    }
}

// =============================================================================
// Movement
// =============================================================================

/// An applied movement, as stored in the history ledger.
///
/// Entries are immutable once appended and may outlive their product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Movement {
    /// Ledger entry identifier (UUID v4).
    #[ts(as = "String")]
    pub id: Uuid,

    /// Normalized product id at application time.
    pub product_id: String,

    /// Product name captured at application time.
    pub product_name: String,

    /// Always > 0; direction comes from `kind`.
    pub quantity: i64,

    pub kind: MovementKind,

    /// When the movement was applied.
    #[ts(as = "String")]
    pub recorded_at: DateTime<Utc>,
}

impl Movement {
    /// Creates a ledger entry for `product` with a fresh id and timestamp.
    pub fn record(product: &Product, quantity: i64, kind: MovementKind) -> Self {
        Movement {
            id: Uuid::new_v4(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            kind,
            recorded_at: Utc::now(),
        }
    }
}

/// A movement waiting to be applied (one row of a bulk file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MovementRequest {
    pub product_id: String,
    pub quantity: i64,
    pub kind: MovementKind,
}

impl MovementRequest {
    pub fn new(product_id: impl Into<String>, quantity: i64, kind: MovementKind) -> Self {
        MovementRequest {
            product_id: product_id.into(),
            quantity,
            kind,
        }
    }
}

// =============================================================================
// Batch Results
// =============================================================================

/// Outcome of applying a batch of movements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BatchResult {
    /// Records applied to catalog and ledger.
    pub succeeded_count: usize,

    /// Ids of records that failed (unknown id or blocked by stock floor),
    /// in input order.
    pub failed_ids: Vec<String>,
}

impl BatchResult {
    /// Total number of records seen.
    pub fn total(&self) -> usize {
        self.succeeded_count + self.failed_ids.len()
    }
}

/// A tabular row the parser could not turn into a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RejectedRow {
    /// 1-based data row number (header excluded).
    pub row: usize,

    /// Normalized id found in the row, possibly empty.
    pub id: String,

    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64) -> Product {
        Product {
            id: "A1".to_string(),
            name: "Arroz".to_string(),
            category: "Granos".to_string(),
            presentation: "Bolsa".to_string(),
            initial_stock: stock,
            stock,
            cumulative_sales: 0,
            cumulative_purchases: 0,
        }
    }

    #[test]
    fn test_movement_kind_parsing() {
        assert_eq!("sale".parse::<MovementKind>().unwrap(), MovementKind::Sale);
        assert_eq!("Ventas".parse::<MovementKind>().unwrap(), MovementKind::Sale);
        assert_eq!(
            "compra".parse::<MovementKind>().unwrap(),
            MovementKind::Purchase
        );
        assert!("transfer".parse::<MovementKind>().is_err());
    }

    #[test]
    fn test_signed_delta() {
        assert_eq!(MovementKind::Sale.signed(4), -4);
        assert_eq!(MovementKind::Purchase.signed(4), 4);
    }

    #[test]
    fn test_movement_snapshot() {
        let p = product(10);
        let m = Movement::record(&p, 3, MovementKind::Sale);
        assert_eq!(m.product_id, "A1");
        assert_eq!(m.product_name, "Arroz");
        assert_eq!(m.quantity, 3);
    }

    #[test]
    fn test_product_flags() {
        let mut p = product(5);
        assert!(p.can_sell(5));
        assert!(!p.can_sell(6));
        assert!(!p.is_negative());
        p.stock = -1;
        assert!(p.is_negative());
        // raw floor check, independent of any policy
        assert!(!p.can_sell(1));
        assert!(p.can_sell(0));
    }

    #[test]
    fn test_dto_serializes_camel_case() {
        let json = serde_json::to_value(product(1)).unwrap();
        assert!(json.get("cumulativeSales").is_some());
        assert!(json.get("initialStock").is_some());

        let result = BatchResult {
            succeeded_count: 1,
            failed_ids: vec!["B2".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["succeededCount"], 1);
        assert_eq!(json["failedIds"][0], "B2");
    }
}
