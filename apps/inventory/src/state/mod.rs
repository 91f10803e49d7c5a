//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │  InventoryState              │   │  InventoryConfig             │   │
//! │  │                              │   │                              │   │
//! │  │  Arc<Mutex<Inventory>>       │   │  stock-floor policy          │   │
//! │  │  MovementProcessor (policy)  │   │  low-stock threshold, top N  │   │
//! │  │                              │   │  export directory            │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • InventoryState: one Mutex over {catalog, sales, purchases}          │
//! │  • InventoryConfig: read-only after load                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod inventory;

pub use config::{
    ConfigError, ExportSettings, InventoryConfig, ReportSettings, StockSettings,
    CONFIG_FILE_NAME,
};
pub use inventory::InventoryState;
