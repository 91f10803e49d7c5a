//! # Movement Commands
//!
//! Single sales and purchases, bulk file import, and ledger queries.
//!
//! ## Import Outcomes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ventas.csv                                                             │
//! │  ID   CANTIDAD_VENDIDA                                                  │
//! │  A1   4        → applied              succeededCount += 1              │
//! │  B2   3        → unknown id           failedIds += "B2"                │
//! │  C3   0        → dropped              dropped += 1                     │
//! │       5        → blank id             rejected += { row 4 }            │
//! │                                                                         │
//! │  Missing ID column / ambiguous quantity / empty catalog                │
//! │        → whole file refused, nothing applied                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use llano_core::header::normalize_product_id;
use llano_core::{parse_movements, Movement, MovementKind, MovementRequest, RejectedRow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::InventoryState;

/// Result of a single movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementResponse {
    pub product_id: String,
    pub kind: MovementKind,
    pub quantity: i64,
    /// Stock after the movement.
    pub stock: i64,
}

/// Result of a bulk import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub kind: MovementKind,
    pub succeeded_count: usize,
    /// Unknown ids and sales blocked by the stock floor, in file order.
    pub failed_ids: Vec<String>,
    /// Rows that never became a movement.
    pub rejected: Vec<RejectedRow>,
    /// Rows skipped because their quantity was zero or negative.
    pub dropped: usize,
}

/// Records one sale or purchase.
///
/// ## Returns
/// The new stock, or `NOT_FOUND` / `INSUFFICIENT_STOCK` /
/// `VALIDATION_ERROR`. Nothing changes on error.
pub fn record_movement(
    state: &InventoryState,
    request: MovementRequest,
) -> Result<MovementResponse, ApiError> {
    debug!(
        id = %request.product_id,
        kind = %request.kind,
        quantity = request.quantity,
        "record_movement command"
    );

    let stock =
        state.with_inventory_mut(|inv, processor| processor.apply_request(inv, &request))??;

    Ok(MovementResponse {
        product_id: normalize_product_id(&request.product_id),
        kind: request.kind,
        quantity: request.quantity,
        stock,
    })
}

/// Imports a sales or purchases file of the given kind.
///
/// The file is read before the lock is taken. Parsing and applying happen
/// under one acquisition, so no other command sees the batch half-applied.
pub fn import_movements(
    state: &InventoryState,
    path: &Path,
    kind: MovementKind,
) -> Result<ImportResponse, ApiError> {
    debug!(path = %path.display(), kind = %kind, "import_movements command");
    let table = llano_io::read_table(path)?;

    let response = state.with_inventory_mut(|inv, processor| {
        let parsed = parse_movements(&table, kind, inv.catalog())?;
        let result = processor.apply_batch(inv, &parsed.movements);
        Ok::<_, llano_core::CoreError>(ImportResponse {
            kind,
            succeeded_count: result.succeeded_count,
            failed_ids: result.failed_ids,
            rejected: parsed.rejected,
            dropped: parsed.dropped,
        })
    })??;

    info!(
        path = %path.display(),
        kind = %kind,
        succeeded = response.succeeded_count,
        failed = response.failed_ids.len(),
        rejected = response.rejected.len(),
        dropped = response.dropped,
        "Import complete"
    );
    Ok(response)
}

/// Ledger entries of one kind, oldest first.
pub fn list_movements(
    state: &InventoryState,
    kind: MovementKind,
) -> Result<Vec<Movement>, ApiError> {
    state.with_inventory(|inv| inv.ledger().entries(kind).to_vec())
}

/// Ledger entries of one kind for a product, including removed products.
pub fn product_movements(
    state: &InventoryState,
    product_id: &str,
    kind: MovementKind,
) -> Result<Vec<Movement>, ApiError> {
    state.with_inventory(|inv| {
        inv.ledger()
            .for_product(kind, product_id)
            .into_iter()
            .cloned()
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::product::{add_product, get_product, remove_products};
    use crate::error::ErrorCode;
    use llano_core::{NewProduct, StockPolicy};

    fn state_with_a1(stock: i64, policy: StockPolicy) -> InventoryState {
        let state = InventoryState::new(policy);
        add_product(
            &state,
            NewProduct {
                id: "A1".to_string(),
                category: "Granos".to_string(),
                name: "Arroz".to_string(),
                presentation: "Bolsa".to_string(),
                initial_stock: stock,
            },
        )
        .unwrap();
        state
    }

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_record_movement() {
        let state = state_with_a1(5, StockPolicy::blocking());

        let response =
            record_movement(&state, MovementRequest::new(" a1 ", 2, MovementKind::Sale)).unwrap();
        assert_eq!(response.product_id, "A1");
        assert_eq!(response.stock, 3);

        let err = record_movement(&state, MovementRequest::new("A1", 8, MovementKind::Sale))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(get_product(&state, "A1").unwrap().stock, 3);
        assert_eq!(list_movements(&state, MovementKind::Sale).unwrap().len(), 1);
    }

    #[test]
    fn test_import_sales_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "ventas.csv",
            "ID,Producto,Cantidad Vendida\nA1,Arroz,4\nB2,Frijol,3\nA1,Arroz,0\n,?,5\n",
        );
        let state = state_with_a1(10, StockPolicy::blocking());

        let response = import_movements(&state, &path, MovementKind::Sale).unwrap();

        assert_eq!(response.succeeded_count, 1);
        assert_eq!(response.failed_ids, vec!["B2".to_string()]);
        assert_eq!(response.dropped, 1);
        assert_eq!(response.rejected.len(), 1);
        assert_eq!(response.rejected[0].row, 4);

        let a1 = get_product(&state, "A1").unwrap();
        assert_eq!(a1.stock, 6);
        assert_eq!(a1.cumulative_sales, 4);
    }

    #[test]
    fn test_import_refuses_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let no_qty = write_csv(&dir, "a.csv", "ID,Unidades\nA1,4\n");
        let empty_state = InventoryState::default();

        let state = state_with_a1(10, StockPolicy::blocking());
        assert_eq!(
            import_movements(&state, &no_qty, MovementKind::Purchase)
                .unwrap_err()
                .code,
            ErrorCode::FormatError
        );

        let ok = write_csv(&dir, "b.csv", "ID,Cantidad\nA1,4\n");
        assert_eq!(
            import_movements(&empty_state, &ok, MovementKind::Purchase)
                .unwrap_err()
                .code,
            ErrorCode::EmptyCatalog
        );

        assert_eq!(
            import_movements(&state, &dir.path().join("missing.csv"), MovementKind::Sale)
                .unwrap_err()
                .code,
            ErrorCode::IoError
        );
        assert!(list_movements(&state, MovementKind::Purchase)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_history_survives_removal() {
        let state = state_with_a1(10, StockPolicy::blocking());
        record_movement(&state, MovementRequest::new("A1", 6, MovementKind::Purchase)).unwrap();
        remove_products(&state, &["A1".to_string()]).unwrap();

        let history = product_movements(&state, "a1", MovementKind::Purchase).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].product_name, "Arroz");
    }
}
