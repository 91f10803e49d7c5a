//! # Inventory Aggregate
//!
//! The one mutable aggregate: the catalog plus both ledgers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Inventory                                     │
//! │                                                                         │
//! │   ┌────────────────────┐      ┌────────────────────────────────────┐   │
//! │   │  ProductCatalog    │      │  HistoryLedger                     │   │
//! │   │  A1 stock 6        │      │  sales:     [A1 x4]                │   │
//! │   │  C3 stock 2        │      │  purchases: []                     │   │
//! │   └────────────────────┘      └────────────────────────────────────┘   │
//! │                                                                         │
//! │   Owned explicitly and handed to whoever needs it. The application     │
//! │   layer puts exactly one lock around it; nothing in here is global.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers get shared references to the catalog and ledger. Stock and
//! counters change only through the movement processor, so the ledger can
//! never drift from the catalog.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::ProductCatalog;
use crate::error::CoreResult;
use crate::header::normalize_product_id;
use crate::import::ParsedCatalog;
use crate::ledger::HistoryLedger;
use crate::types::{NewProduct, Product, ProductPatch, RejectedRow};

/// Result of an initial catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogLoadReport {
    /// Products inserted.
    pub added: usize,

    /// Rows rejected by the parser or by the catalog (e.g. duplicate id).
    pub rejected: Vec<RejectedRow>,
}

/// Catalog + ledger, mutated as a unit.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    catalog: ProductCatalog,
    ledger: HistoryLedger,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// Adds a product by manual entry.
    pub fn add_product(&mut self, new: NewProduct) -> CoreResult<&Product> {
        self.catalog.add(new)
    }

    /// Removes products; ledger entries referencing them are kept.
    pub fn remove_products<I, S>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.catalog.remove(ids)
    }

    /// Edits descriptive fields of a product.
    pub fn update_product(&mut self, id: &str, patch: ProductPatch) -> CoreResult<&Product> {
        self.catalog.update(id, patch)
    }

    /// Inserts every parsed catalog row, isolating per-row failures.
    pub fn load_catalog(&mut self, parsed: ParsedCatalog) -> CatalogLoadReport {
        let mut report = CatalogLoadReport {
            added: 0,
            rejected: parsed.rejected,
        };

        for (row, new) in parsed.products {
            let id = normalize_product_id(&new.id);
            match self.catalog.add(new) {
                Ok(_) => report.added += 1,
                Err(err) => {
                    debug!(row, id = %id, error = %err, "Catalog row rejected");
                    report.rejected.push(RejectedRow {
                        row,
                        id,
                        reason: err.to_string(),
                    });
                }
            }
        }
        report.rejected.sort_by_key(|r| r.row);

        info!(
            added = report.added,
            rejected = report.rejected.len(),
            "Catalog load complete"
        );
        report
    }

    /// Split borrow for the movement processor.
    pub(crate) fn parts_mut(&mut self) -> (&mut ProductCatalog, &mut HistoryLedger) {
        (&mut self.catalog, &mut self.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{parse_catalog, RawTable};

    #[test]
    fn test_load_catalog_isolates_bad_rows() {
        let table = RawTable::new(
            vec!["ID", "Producto", "Stock_Inicial", "Categoría", "Presentación"],
            vec![
                vec!["a1", "Arroz", "10", "Granos", "Bolsa"],
                vec!["A1", "Arroz bis", "3", "Granos", "Bolsa"],
                vec!["B2", "Frijol", "muchos", "Granos", "Bolsa"],
                vec!["C3", "Leche", "", "Lácteos", "Litro"],
            ],
        );
        let parsed = parse_catalog(&table).unwrap();

        let mut inventory = Inventory::new();
        let report = inventory.load_catalog(parsed);

        assert_eq!(report.added, 2);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].row, 2);
        assert_eq!(report.rejected[0].id, "A1");
        assert_eq!(report.rejected[1].row, 3);

        let c3 = inventory.catalog().find("c3").unwrap();
        assert_eq!(c3.stock, 0);
        assert_eq!(c3.category, "Lácteos");
        assert!(inventory.ledger().is_empty());
    }
}
