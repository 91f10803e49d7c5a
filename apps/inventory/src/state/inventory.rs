//! # Inventory State
//!
//! The one shared mutable aggregate: catalog + sales ledger + purchases
//! ledger behind a single lock.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory State Operations                           │
//! │                                                                         │
//! │  Caller                 Command                  Under the lock         │
//! │  ──────                 ───────                  ──────────────         │
//! │                                                                         │
//! │  Manual form ──────────► add_product() ────────► catalog.add           │
//! │                                                                         │
//! │  Record sale ──────────► record_movement() ────► processor.apply_one   │
//! │                                                                         │
//! │  Upload file ──────────► import_movements()                            │
//! │                           read CSV (no lock)                           │
//! │                           ─────────────────────► parse + apply_batch   │
//! │                                                                         │
//! │  Dashboard ────────────► dashboard() ──────────► (read only)           │
//! │                                                                         │
//! │  NOTE: Every operation holds the lock for its whole duration, so no    │
//! │        reader ever sees a partially applied batch.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use llano_core::{Inventory, MovementProcessor, StockPolicy};
use tracing::error;

use crate::error::ApiError;

/// Shared inventory plus the processor configured for it.
///
/// Cloning shares the same underlying inventory.
#[derive(Debug, Clone)]
pub struct InventoryState {
    inventory: Arc<Mutex<Inventory>>,
    processor: MovementProcessor,
}

impl InventoryState {
    /// Creates an empty inventory under `policy`.
    pub fn new(policy: StockPolicy) -> Self {
        Self::with_inventory_value(Inventory::new(), policy)
    }

    /// Wraps an existing inventory.
    pub fn with_inventory_value(inventory: Inventory, policy: StockPolicy) -> Self {
        InventoryState {
            inventory: Arc::new(Mutex::new(inventory)),
            processor: MovementProcessor::new(policy),
        }
    }

    pub fn processor(&self) -> MovementProcessor {
        self.processor
    }

    /// Executes a function with read access to the inventory.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = state.with_inventory(|inv| inv.catalog().len())?;
    /// ```
    pub fn with_inventory<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&Inventory) -> R,
    {
        let inventory = self.lock()?;
        Ok(f(&inventory))
    }

    /// Executes a function with write access to the inventory and the
    /// processor.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_inventory_mut(|inv, processor| processor.apply_batch(inv, &batch))?;
    /// ```
    pub fn with_inventory_mut<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut Inventory, &MovementProcessor) -> R,
    {
        let mut inventory = self.lock()?;
        Ok(f(&mut inventory, &self.processor))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inventory>, ApiError> {
        self.inventory.lock().map_err(|_| {
            error!("Inventory mutex poisoned");
            ApiError::internal("Inventory state is unavailable")
        })
    }
}

impl Default for InventoryState {
    fn default() -> Self {
        Self::new(StockPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llano_core::{MovementKind, MovementRequest, NewProduct};
    use std::thread;

    #[test]
    fn test_concurrent_batches_do_not_interleave() {
        let state = InventoryState::new(StockPolicy::blocking());
        state
            .with_inventory_mut(|inv, _| {
                inv.add_product(NewProduct {
                    id: "A1".to_string(),
                    category: "Granos".to_string(),
                    name: "Arroz".to_string(),
                    presentation: "Bolsa".to_string(),
                    initial_stock: 100,
                })
                .map(|_| ())
            })
            .unwrap()
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                thread::spawn(move || {
                    let batch = vec![MovementRequest::new("A1", 5, MovementKind::Sale); 5];
                    state
                        .with_inventory_mut(|inv, processor| processor.apply_batch(inv, &batch))
                        .unwrap()
                })
            })
            .collect();

        let succeeded: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap().succeeded_count)
            .sum();

        // 40 sales of 5 against 100 units: exactly 20 fit
        assert_eq!(succeeded, 20);
        state
            .with_inventory(|inv| {
                let a1 = inv.catalog().find("A1").unwrap();
                assert_eq!(a1.stock, 0);
                assert_eq!(inv.ledger().sales().len(), 20);
            })
            .unwrap();
    }
}
