//! # Dashboard Reports
//!
//! Read-only aggregates over the catalog. Rankings use the real cumulative
//! counters; products that never moved are left out instead of being given
//! a placeholder value to sort on.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::ProductCatalog;
use crate::types::{MovementKind, Product};

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventorySummary {
    /// Distinct product names.
    pub unique_products: usize,

    /// Sum of current stock across the catalog. Widened so extreme stock
    /// values cannot overflow the total.
    pub total_units: i128,

    /// Products with stock at or below the threshold.
    pub low_stock_count: usize,

    /// Products with negative stock.
    pub negative_stock_count: usize,

    /// Product count per category, in first-seen order.
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// One line of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RankedProduct {
    pub id: String,
    pub name: String,
    pub quantity: i64,
}

/// Builds the dashboard summary.
pub fn summary(catalog: &ProductCatalog, low_stock_threshold: i64) -> InventorySummary {
    let names: HashSet<&str> = catalog.iter().map(|p| p.name.as_str()).collect();

    let mut categories: Vec<CategoryCount> = Vec::new();
    for product in catalog {
        match categories.iter_mut().find(|c| c.category == product.category) {
            Some(entry) => entry.count += 1,
            None => categories.push(CategoryCount {
                category: product.category.clone(),
                count: 1,
            }),
        }
    }

    InventorySummary {
        unique_products: names.len(),
        total_units: catalog.iter().map(|p| i128::from(p.stock)).sum(),
        low_stock_count: low_stock(catalog, low_stock_threshold).len(),
        negative_stock_count: negative_stock(catalog).len(),
        categories,
    }
}

/// Top `n` products by cumulative quantity of `kind`.
///
/// Ties keep catalog order (stable sort).
pub fn top_by(catalog: &ProductCatalog, kind: MovementKind, n: usize) -> Vec<RankedProduct> {
    let counter = |p: &Product| match kind {
        MovementKind::Sale => p.cumulative_sales,
        MovementKind::Purchase => p.cumulative_purchases,
    };

    let mut ranked: Vec<RankedProduct> = catalog
        .iter()
        .filter(|p| counter(p) > 0)
        .map(|p| RankedProduct {
            id: p.id.clone(),
            name: p.name.clone(),
            quantity: counter(p),
        })
        .collect();
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranked.truncate(n);
    ranked
}

pub fn top_sold(catalog: &ProductCatalog, n: usize) -> Vec<RankedProduct> {
    top_by(catalog, MovementKind::Sale, n)
}

pub fn top_purchased(catalog: &ProductCatalog, n: usize) -> Vec<RankedProduct> {
    top_by(catalog, MovementKind::Purchase, n)
}

/// Products with stock at or below `threshold`, in catalog order.
pub fn low_stock(catalog: &ProductCatalog, threshold: i64) -> Vec<&Product> {
    catalog.iter().filter(|p| p.stock <= threshold).collect()
}

/// Products in the flagged negative-stock state.
pub fn negative_stock(catalog: &ProductCatalog) -> Vec<&Product> {
    catalog.iter().filter(|p| p.is_negative()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Inventory;
    use crate::processor::{MovementProcessor, StockPolicy};
    use crate::types::NewProduct;

    fn sample() -> Inventory {
        let mut inv = Inventory::new();
        for (id, name, category, stock) in [
            ("A1", "Arroz", "Granos", 20),
            ("B2", "Frijol", "Granos", 3),
            ("C3", "Leche", "Lacteos", 8),
            ("D4", "Arroz", "Granos", 15),
        ] {
            inv.add_product(NewProduct {
                id: id.to_string(),
                category: category.to_string(),
                name: name.to_string(),
                presentation: "Unidad".to_string(),
                initial_stock: stock,
            })
            .unwrap();
        }
        inv
    }

    #[test]
    fn test_summary() {
        let inv = sample();
        let s = summary(inv.catalog(), 10);

        assert_eq!(s.unique_products, 3);
        assert_eq!(s.total_units, 46);
        assert_eq!(s.low_stock_count, 2);
        assert_eq!(s.negative_stock_count, 0);
        assert_eq!(
            s.categories,
            vec![
                CategoryCount {
                    category: "Granos".to_string(),
                    count: 3
                },
                CategoryCount {
                    category: "Lacteos".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_summary_total_past_i64_range() {
        let mut inv = Inventory::new();
        for (id, stock) in [("A1", i64::MAX), ("B2", 1)] {
            inv.add_product(NewProduct {
                id: id.to_string(),
                category: "Granos".to_string(),
                name: id.to_string(),
                presentation: "Bolsa".to_string(),
                initial_stock: stock,
            })
            .unwrap();
        }

        let s = summary(inv.catalog(), 10);
        assert_eq!(s.total_units, i128::from(i64::MAX) + 1);
        assert_eq!(s.low_stock_count, 1);
    }

    #[test]
    fn test_top_sold_excludes_zero_and_keeps_ties_in_order() {
        let mut inv = sample();
        let processor = MovementProcessor::new(StockPolicy::permissive());
        processor.apply_one(&mut inv, "C3", 5, MovementKind::Sale).unwrap();
        processor.apply_one(&mut inv, "A1", 5, MovementKind::Sale).unwrap();
        processor.apply_one(&mut inv, "B2", 7, MovementKind::Sale).unwrap();

        let top = top_sold(inv.catalog(), 5);
        let ids: Vec<&str> = top.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B2", "A1", "C3"]);

        assert_eq!(top_sold(inv.catalog(), 1).len(), 1);
        assert!(top_purchased(inv.catalog(), 5).is_empty());

        let negatives = negative_stock(inv.catalog());
        assert_eq!(negatives.len(), 1);
        assert_eq!(negatives[0].id, "B2");
    }
}
