//! # History Ledger
//!
//! Append-only record of every applied movement, one sequence per kind.
//!
//! ```text
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │ sales                    │   │ purchases                │
//! │ [A1 x4] [C3 x1] [A1 x2]  │   │ [B2 x10] [A1 x6]         │
//! └──────────────────────────┘   └──────────────────────────┘
//!        ▲ append only                  ▲ append only
//! ```
//!
//! Entries reference products by id only; removing a product from the
//! catalog leaves its entries queryable.

use serde::{Deserialize, Serialize};

use crate::header::normalize_product_id;
use crate::types::{Movement, MovementKind};

/// Two ordered, append-only movement sequences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLedger {
    sales: Vec<Movement>,
    purchases: Vec<Movement>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to the sequence matching its kind.
    ///
    /// Only the movement processor writes here, so that the ledger and the
    /// catalog counters always move together.
    pub(crate) fn append(&mut self, movement: Movement) {
        match movement.kind {
            MovementKind::Sale => self.sales.push(movement),
            MovementKind::Purchase => self.purchases.push(movement),
        }
    }

    /// Entries of one kind, oldest first.
    pub fn entries(&self, kind: MovementKind) -> &[Movement] {
        match kind {
            MovementKind::Sale => &self.sales,
            MovementKind::Purchase => &self.purchases,
        }
    }

    pub fn sales(&self) -> &[Movement] {
        &self.sales
    }

    pub fn purchases(&self) -> &[Movement] {
        &self.purchases
    }

    /// Entries of one kind that reference `product_id`.
    ///
    /// Works for ids no longer in the catalog.
    pub fn for_product(&self, kind: MovementKind, product_id: &str) -> Vec<&Movement> {
        let id = normalize_product_id(product_id);
        self.entries(kind)
            .iter()
            .filter(|m| m.product_id == id)
            .collect()
    }

    /// Sum of quantities recorded for `kind`, widened to `i128`.
    pub fn total_quantity(&self, kind: MovementKind) -> i128 {
        self.entries(kind)
            .iter()
            .map(|m| i128::from(m.quantity))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.sales.len() + self.purchases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty() && self.purchases.is_empty()
    }
}
