//! # llano-io: Tabular File I/O for Llano Inventory
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Llano Inventory Data Flow                         │
//! │                                                                         │
//! │  ventas.csv ──► read_table ──► RawTable ──► llano_core::import         │
//! │                 (this crate)                (under the app's lock)      │
//! │                                                                         │
//! │  Inventory ──► export_workbook ──► export/{productos,ventas,compras}   │
//! │                (this crate)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`table`] - CSV → RawTable
//! - [`export`] - Inventory → workbook directory
//! - [`error`] - IoError
//!
//! ## Usage
//!
//! ```rust,ignore
//! use llano_io::{read_table, export_workbook};
//!
//! let table = read_table(Path::new("ventas.csv"))?;
//! let parsed = llano_core::parse_movements(&table, MovementKind::Sale, inventory.catalog())?;
//! export_workbook(Path::new("export"), &inventory)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod table;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{IoError, IoResult};
pub use export::{export_workbook, ExportedWorkbook};
pub use table::{read_table, read_table_from};
