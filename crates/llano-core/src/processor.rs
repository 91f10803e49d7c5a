//! # Movement Processor
//!
//! Validates and applies sales and purchases against the inventory.
//!
//! ## Single Movement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_one("a1", 4, Sale)                                               │
//! │       │                                                                 │
//! │       ├── qty <= 0?                 → Validation(MustBePositive)       │
//! │       ├── "A1" not in catalog?      → UnknownProduct                   │
//! │       ├── stock < qty and floor on? → InsufficientStock                │
//! │       │                                                                 │
//! │       │   (nothing has been touched yet)                               │
//! │       ▼                                                                 │
//! │  stock -= 4, cumulative_sales += 4, ledger.sales.push(snapshot)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(new_stock)                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check runs before the first write, so a record either updates
//! stock, its counter and the ledger together, or none of them.
//!
//! ## Batch
//! Failure isolation is per record: an unknown id or a blocked sale is
//! reported in `failed_ids` and the rest of the batch still applies.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::header::normalize_product_id;
use crate::inventory::Inventory;
use crate::types::{BatchResult, Movement, MovementKind, MovementRequest};
use crate::validation::validate_quantity;

// =============================================================================
// Stock Policy
// =============================================================================

/// Stock-floor policy.
///
/// ```text
/// allow_negative_stock = false   sale of 8 with stock 5 → InsufficientStock
/// allow_negative_stock = true    sale of 8 with stock 5 → stock -3 (flagged)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPolicy {
    /// Let sales drive stock below zero.
    #[serde(default)]
    pub allow_negative_stock: bool,
}

impl StockPolicy {
    /// Policy that blocks sales beyond the available stock.
    pub const fn blocking() -> Self {
        StockPolicy {
            allow_negative_stock: false,
        }
    }

    /// Policy that lets stock go negative.
    pub const fn permissive() -> Self {
        StockPolicy {
            allow_negative_stock: true,
        }
    }
}

// =============================================================================
// Movement Processor
// =============================================================================

/// Applies movements under a fixed stock-floor policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementProcessor {
    policy: StockPolicy,
}

impl MovementProcessor {
    pub fn new(policy: StockPolicy) -> Self {
        MovementProcessor { policy }
    }

    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    /// Applies one movement and returns the product's new stock.
    ///
    /// ## Errors
    /// * `Validation(MustBePositive)` - quantity <= 0
    /// * `UnknownProduct` - id not in the catalog
    /// * `InsufficientStock` - sale blocked by the stock floor
    /// * `Validation(OutOfRange)` - counter would overflow
    ///
    /// On error neither the catalog nor the ledger is modified.
    pub fn apply_one(
        &self,
        inventory: &mut Inventory,
        product_id: &str,
        quantity: i64,
        kind: MovementKind,
    ) -> CoreResult<i64> {
        validate_quantity(quantity)?;

        let (catalog, ledger) = inventory.parts_mut();
        let product = catalog
            .find_mut(product_id)
            .ok_or_else(|| CoreError::unknown_product(normalize_product_id(product_id)))?;

        if kind == MovementKind::Sale
            && !self.policy.allow_negative_stock
            && !product.can_sell(quantity)
        {
            warn!(
                id = %product.id,
                available = product.stock,
                requested = quantity,
                "Sale blocked by stock floor"
            );
            return Err(CoreError::InsufficientStock {
                id: product.id.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        let counter = match kind {
            MovementKind::Sale => product.cumulative_sales,
            MovementKind::Purchase => product.cumulative_purchases,
        };
        let (Some(new_stock), Some(new_counter)) = (
            product.stock.checked_add(kind.signed(quantity)),
            counter.checked_add(quantity),
        ) else {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: i64::MAX,
            }
            .into());
        };

        product.stock = new_stock;
        match kind {
            MovementKind::Sale => product.cumulative_sales = new_counter,
            MovementKind::Purchase => product.cumulative_purchases = new_counter,
        }
        ledger.append(Movement::record(product, quantity, kind));

        debug!(
            id = %product.id,
            kind = %kind,
            quantity,
            stock = new_stock,
            "Movement applied"
        );
        Ok(new_stock)
    }

    /// Applies a prepared request.
    pub fn apply_request(
        &self,
        inventory: &mut Inventory,
        request: &MovementRequest,
    ) -> CoreResult<i64> {
        self.apply_one(inventory, &request.product_id, request.quantity, request.kind)
    }

    /// Applies every valid record of a batch.
    ///
    /// Records referencing unknown ids, blocked by the stock floor, or
    /// otherwise invalid are collected into `failed_ids` (normalized, in
    /// input order). Records for the same product are applied in order,
    /// each seeing the stock left by the previous one.
    pub fn apply_batch(
        &self,
        inventory: &mut Inventory,
        movements: &[MovementRequest],
    ) -> BatchResult {
        let mut result = BatchResult::default();

        for request in movements {
            let id = normalize_product_id(&request.product_id);
            if !inventory.catalog().contains(&id) {
                debug!(id = %id, "Batch record references unknown product");
                result.failed_ids.push(id);
                continue;
            }

            match self.apply_one(inventory, &id, request.quantity, request.kind) {
                Ok(_) => result.succeeded_count += 1,
                Err(err) => {
                    debug!(id = %id, error = %err, "Batch record failed");
                    result.failed_ids.push(id);
                }
            }
        }

        info!(
            succeeded = result.succeeded_count,
            failed = result.failed_ids.len(),
            allow_negative_stock = self.policy.allow_negative_stock,
            "Batch applied"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewProduct;

    fn inventory_with(items: &[(&str, i64)]) -> Inventory {
        let mut inventory = Inventory::new();
        for (id, stock) in items {
            inventory
                .add_product(NewProduct {
                    id: id.to_string(),
                    category: "General".to_string(),
                    name: format!("Producto {}", id),
                    presentation: "Unidad".to_string(),
                    initial_stock: *stock,
                })
                .unwrap();
        }
        inventory
    }

    #[test]
    fn test_purchase_increases_stock() {
        let mut inv = inventory_with(&[("A1", 10)]);
        let processor = MovementProcessor::default();

        let stock = processor
            .apply_one(&mut inv, "a1", 5, MovementKind::Purchase)
            .unwrap();

        assert_eq!(stock, 15);
        let p = inv.catalog().find("A1").unwrap();
        assert_eq!(p.cumulative_purchases, 5);
        assert_eq!(p.cumulative_sales, 0);
        assert_eq!(inv.ledger().purchases().len(), 1);
        assert!(inv.ledger().sales().is_empty());
    }

    #[test]
    fn test_sale_blocked_by_stock_floor() {
        let mut inv = inventory_with(&[("A1", 5)]);
        let processor = MovementProcessor::new(StockPolicy::blocking());

        let err = processor
            .apply_one(&mut inv, "A1", 8, MovementKind::Sale)
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 5,
                requested: 8,
                ..
            }
        ));
        assert_eq!(inv.catalog().find("A1").unwrap().stock, 5);
        assert_eq!(inv.catalog().find("A1").unwrap().cumulative_sales, 0);
        assert!(inv.ledger().is_empty());
    }

    #[test]
    fn test_sale_allowed_below_zero() {
        let mut inv = inventory_with(&[("A1", 5)]);
        let processor = MovementProcessor::new(StockPolicy::permissive());

        let stock = processor
            .apply_one(&mut inv, "A1", 8, MovementKind::Sale)
            .unwrap();

        assert_eq!(stock, -3);
        assert!(inv.catalog().find("A1").unwrap().is_negative());
        assert_eq!(inv.ledger().sales().len(), 1);
    }

    #[test]
    fn test_exact_stock_sale_is_allowed() {
        let mut inv = inventory_with(&[("A1", 5)]);
        let processor = MovementProcessor::default();
        assert_eq!(
            processor
                .apply_one(&mut inv, "A1", 5, MovementKind::Sale)
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_invalid_quantity_and_unknown_product() {
        let mut inv = inventory_with(&[("A1", 5)]);
        let processor = MovementProcessor::default();

        assert!(matches!(
            processor.apply_one(&mut inv, "A1", 0, MovementKind::Purchase),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert!(matches!(
            processor.apply_one(&mut inv, "zz", 1, MovementKind::Purchase),
            Err(CoreError::UnknownProduct(id)) if id == "ZZ"
        ));
        assert!(inv.ledger().is_empty());
    }

    #[test]
    fn test_overflow_leaves_state_untouched() {
        let mut inv = inventory_with(&[("A1", i64::MAX - 1)]);
        let processor = MovementProcessor::default();

        assert!(processor
            .apply_one(&mut inv, "A1", 5, MovementKind::Purchase)
            .is_err());
        assert_eq!(inv.catalog().find("A1").unwrap().stock, i64::MAX - 1);
        assert!(inv.ledger().is_empty());
    }

    #[test]
    fn test_snapshot_survives_rename() {
        let mut inv = inventory_with(&[("A1", 5)]);
        let processor = MovementProcessor::default();
        processor
            .apply_one(&mut inv, "A1", 1, MovementKind::Sale)
            .unwrap();

        inv.update_product(
            "A1",
            crate::types::ProductPatch {
                name: Some("Renombrado".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(inv.ledger().sales()[0].product_name, "Producto A1");
    }

    #[test]
    fn test_batch_isolates_failures() {
        let mut inv = inventory_with(&[("A1", 10), ("C3", 1)]);
        let processor = MovementProcessor::default();

        let batch = vec![
            MovementRequest::new("A1", 4, MovementKind::Sale),
            MovementRequest::new("B2", 3, MovementKind::Sale),
            MovementRequest::new("c3", 2, MovementKind::Sale),
            MovementRequest::new("A1", 1, MovementKind::Sale),
        ];
        let result = processor.apply_batch(&mut inv, &batch);

        assert_eq!(result.succeeded_count, 2);
        assert_eq!(result.failed_ids, vec!["B2".to_string(), "C3".to_string()]);
        assert_eq!(result.total(), 4);
        assert_eq!(inv.catalog().find("A1").unwrap().stock, 5);
        assert_eq!(inv.catalog().find("C3").unwrap().stock, 1);
        assert_eq!(inv.ledger().sales().len(), 2);
    }

    #[test]
    fn test_batch_same_product_sees_previous_records() {
        let mut inv = inventory_with(&[("A1", 5)]);
        let processor = MovementProcessor::default();

        let batch = vec![
            MovementRequest::new("A1", 3, MovementKind::Sale),
            MovementRequest::new("A1", 3, MovementKind::Sale),
            MovementRequest::new("A1", 2, MovementKind::Sale),
        ];
        let result = processor.apply_batch(&mut inv, &batch);

        assert_eq!(result.succeeded_count, 2);
        assert_eq!(result.failed_ids, vec!["A1".to_string()]);
        assert_eq!(inv.catalog().find("A1").unwrap().stock, 0);
    }
}
