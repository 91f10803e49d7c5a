//! # Report Commands
//!
//! Dashboard figures and the workbook export.

use std::path::Path;

use llano_core::report::{self, InventorySummary, RankedProduct};
use llano_core::Product;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{InventoryConfig, InventoryState};

/// Everything the dashboard shows, computed from one consistent view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub summary: InventorySummary,
    pub top_sold: Vec<RankedProduct>,
    pub top_purchased: Vec<RankedProduct>,
    pub low_stock: Vec<Product>,
    pub negative_stock: Vec<Product>,
}

/// Paths written by an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub products: String,
    pub sales: String,
    pub purchases: String,
}

/// Builds the dashboard using the configured threshold and ranking size.
pub fn dashboard(
    state: &InventoryState,
    config: &InventoryConfig,
) -> Result<DashboardResponse, ApiError> {
    debug!("dashboard command");
    let threshold = config.stock.low_stock_threshold;
    let top_n = config.report.top_n;

    state.with_inventory(|inv| {
        let catalog = inv.catalog();
        DashboardResponse {
            summary: report::summary(catalog, threshold),
            top_sold: report::top_sold(catalog, top_n),
            top_purchased: report::top_purchased(catalog, top_n),
            low_stock: report::low_stock(catalog, threshold)
                .into_iter()
                .cloned()
                .collect(),
            negative_stock: report::negative_stock(catalog)
                .into_iter()
                .cloned()
                .collect(),
        }
    })
}

/// Writes the workbook (products, sales, purchases) into `dir`.
///
/// A snapshot is taken under the lock and written after releasing it, so
/// the three sheets agree with each other without blocking writers on disk.
pub fn export_workbook(state: &InventoryState, dir: &Path) -> Result<ExportResponse, ApiError> {
    debug!(dir = %dir.display(), "export_workbook command");
    let snapshot = state.with_inventory(|inv| inv.clone())?;
    let workbook = llano_io::export_workbook(dir, &snapshot)?;

    Ok(ExportResponse {
        products: workbook.products.display().to_string(),
        sales: workbook.sales.display().to_string(),
        purchases: workbook.purchases.display().to_string(),
    })
}

/// Writes the workbook into the `[export] directory` from the config.
pub fn export_to_configured_dir(
    state: &InventoryState,
    config: &InventoryConfig,
) -> Result<ExportResponse, ApiError> {
    export_workbook(state, &config.export.directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::movement::record_movement;
    use crate::commands::product::add_product;
    use llano_core::{MovementKind, MovementRequest, NewProduct, StockPolicy};

    fn seeded_state() -> InventoryState {
        let state = InventoryState::new(StockPolicy::permissive());
        for (id, name, stock) in [("A1", "Arroz", 20), ("B2", "Frijol", 2)] {
            add_product(
                &state,
                NewProduct {
                    id: id.to_string(),
                    category: "Granos".to_string(),
                    name: name.to_string(),
                    presentation: "Bolsa".to_string(),
                    initial_stock: stock,
                },
            )
            .unwrap();
        }
        record_movement(&state, MovementRequest::new("B2", 5, MovementKind::Sale)).unwrap();
        state
    }

    #[test]
    fn test_dashboard() {
        let state = seeded_state();
        let response = dashboard(&state, &InventoryConfig::default()).unwrap();

        assert_eq!(response.summary.unique_products, 2);
        assert_eq!(response.summary.total_units, 17);
        assert_eq!(response.top_sold.len(), 1);
        assert_eq!(response.top_sold[0].id, "B2");
        assert!(response.top_purchased.is_empty());
        assert_eq!(response.negative_stock.len(), 1);
        assert_eq!(response.low_stock.len(), 1);
    }

    #[test]
    fn test_export_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let state = seeded_state();

        let response = export_workbook(&state, &dir.path().join("out")).unwrap();

        assert!(response.products.ends_with("productos.csv"));
        let sales = std::fs::read_to_string(&response.sales).unwrap();
        assert!(sales.starts_with("ENTRY_ID,FECHA,ID,PRODUCTO,CANTIDAD_VENDIDA"));
        assert!(sales.contains(",B2,Frijol,5"));
    }

    #[test]
    fn test_export_uses_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = InventoryConfig::default();
        config.export.directory = dir.path().join("configured");

        let response = export_to_configured_dir(&seeded_state(), &config).unwrap();

        let expected = dir.path().join("configured").join("compras.csv");
        assert_eq!(response.purchases, expected.display().to_string());
        assert!(expected.exists());
    }
}
