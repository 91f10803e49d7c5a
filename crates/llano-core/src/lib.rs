//! # llano-core: Pure Reconciliation Engine for Llano Inventory
//!
//! Keeps a product catalog's stock consistent with the sales and purchase
//! movements applied to it, and records every applied movement in an
//! append-only ledger.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Llano Inventory Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 llano-app (commands + state)                    │   │
//! │  │   add_product, record_movement, import_movements, dashboard    │   │
//! │  └──────────────┬───────────────────────────────┬──────────────────┘   │
//! │                 │ one lock: Mutex<Inventory>    │ files, before lock   │
//! │  ┌──────────────▼──────────────────────┐  ┌─────▼──────────────────┐   │
//! │  │     ★ llano-core (THIS CRATE) ★     │  │   llano-io             │   │
//! │  │                                     │  │   CSV → RawTable       │   │
//! │  │  header ─► import ─► processor      │  │   export workbook      │   │
//! │  │                         │           │  └────────────────────────┘   │
//! │  │              ┌──────────▼────────┐  │                               │
//! │  │              │    Inventory      │  │                               │
//! │  │              │ catalog + ledger  │  │                               │
//! │  │              └───────────────────┘  │                               │
//! │  │   NO I/O • NO LOCKS • NO GLOBALS    │                               │
//! │  └─────────────────────────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Movement, MovementKind, BatchResult
//! - [`error`] - CoreError and its ErrorKind classification
//! - [`validation`] - Field rules for manual input
//! - [`header`] - Header normalization and column resolution
//! - [`catalog`] - ProductCatalog
//! - [`ledger`] - HistoryLedger
//! - [`inventory`] - The catalog + ledger aggregate
//! - [`processor`] - MovementProcessor and the stock-floor policy
//! - [`import`] - Bulk movement and catalog parsing
//! - [`report`] - Dashboard aggregates
//!
//! ## Example Usage
//!
//! ```rust
//! use llano_core::{Inventory, MovementKind, MovementProcessor, NewProduct, StockPolicy};
//!
//! let mut inventory = Inventory::new();
//! inventory
//!     .add_product(NewProduct {
//!         id: "a1".to_string(),
//!         category: "Granos".to_string(),
//!         name: "Arroz".to_string(),
//!         presentation: "Bolsa".to_string(),
//!         initial_stock: 10,
//!     })
//!     .unwrap();
//!
//! let processor = MovementProcessor::new(StockPolicy::blocking());
//! let stock = processor
//!     .apply_one(&mut inventory, "A1", 4, MovementKind::Sale)
//!     .unwrap();
//!
//! assert_eq!(stock, 6);
//! assert_eq!(inventory.ledger().sales().len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod header;
pub mod import;
pub mod inventory;
pub mod ledger;
pub mod processor;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::ProductCatalog;
pub use error::{CoreError, CoreResult, ErrorKind, FormatError, ValidationError};
pub use import::{parse_catalog, parse_movements, ParsedCatalog, ParsedMovements, RawTable};
pub use inventory::{CatalogLoadReport, Inventory};
pub use ledger::HistoryLedger;
pub use processor::{MovementProcessor, StockPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product id.
pub const MAX_ID_LEN: usize = 50;

/// Maximum length of a product name.
pub const MAX_NAME_LEN: usize = 200;

/// Stock at or below this value counts as low on the dashboard.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Default length of the top-sold / top-purchased rankings.
pub const DEFAULT_TOP_N: usize = 5;
