//! # Llano Inventory Application Library
//!
//! Application layer for Llano Inventory: configuration, the shared
//! inventory state and the commands a UI shell (or the `llano` binary)
//! calls.
//!
//! ## Module Organization
//! ```text
//! llano_app/
//! ├── lib.rs          ◄─── You are here (tracing setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── inventory.rs◄─── Arc<Mutex<Inventory>> + MovementProcessor
//! │   └── config.rs   ◄─── inventory.toml + LLANO_* overrides
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Catalog CRUD, initial catalog load
//! │   ├── movement.rs ◄─── Sales/purchases, bulk import, ledger
//! │   └── report.rs   ◄─── Dashboard, workbook export
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use error::{ApiError, ErrorCode};
pub use state::{ConfigError, InventoryConfig, InventoryState};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,llano=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=llano_core=trace` - Trace the engine only
/// - Default: `info,llano=debug`
///
/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
