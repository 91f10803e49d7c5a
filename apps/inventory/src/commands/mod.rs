//! # Commands Module
//!
//! Every operation exposed to callers (the binary, or a UI shell linking
//! this library). Commands take the state they need by reference and
//! return plain serializable data or an [`ApiError`](crate::error::ApiError).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Catalog CRUD and initial catalog load
//! ├── movement.rs  ◄─── Single movements, bulk import, ledger queries
//! └── report.rs    ◄─── Dashboard and workbook export
//! ```
//!
//! ## File-Backed Commands
//! ```text
//! import_movements(path, kind)
//!      │
//!      ├── llano_io::read_table(path)          no lock held
//!      │
//!      └── state.with_inventory_mut(|inv, p| { one lock acquisition
//!              parse_movements(&table, kind, inv.catalog())?
//!              p.apply_batch(inv, &parsed.movements)
//!          })
//! ```

pub mod movement;
pub mod product;
pub mod report;
