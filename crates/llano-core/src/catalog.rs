//! # Product Catalog
//!
//! The authoritative set of products and their live counters.
//!
//! ## Storage
//! ```text
//! products: Vec<Product>          display order (insertion order)
//! index:    HashMap<id, position> O(1) lookup by normalized id
//!
//! add("a1")  → normalize → "A1" → index hit? → DuplicateID
//!                                   └─ miss → push + index
//! remove({"A1","ZZ"}) → retain non-matching → rebuild index
//!                       (unknown ids are ignored)
//! ```
//!
//! Stock and cumulative counters are not writable from outside the crate;
//! they move only through [`MovementProcessor`](crate::processor::MovementProcessor).

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::header::normalize_product_id;
use crate::types::{NewProduct, Product, ProductPatch};
use crate::validation::{validate_new_product, validate_product_name, validate_required};

/// Catalog of products keyed by normalized id.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new product with zero cumulative counters.
    ///
    /// ## Returns
    /// * `Ok(&Product)` - the stored product (id normalized)
    /// * `Err(Validation(Duplicate))` - id collides case-insensitively
    /// * `Err(Validation(..))` - a field failed validation
    ///
    /// On error the catalog is unchanged.
    pub fn add(&mut self, new: NewProduct) -> CoreResult<&Product> {
        validate_new_product(&new)?;

        let id = normalize_product_id(&new.id);
        if self.index.contains_key(&id) {
            return Err(ValidationError::duplicate_id(id).into());
        }

        debug!(id = %id, initial_stock = new.initial_stock, "Adding product");

        let position = self.products.len();
        self.products.push(Product {
            id: id.clone(),
            name: new.name.trim().to_string(),
            category: new.category.trim().to_string(),
            presentation: new.presentation.trim().to_string(),
            initial_stock: new.initial_stock,
            stock: new.initial_stock,
            cumulative_sales: 0,
            cumulative_purchases: 0,
        });
        self.index.insert(id, position);

        Ok(&self.products[position])
    }

    /// Removes every product whose id is in `ids`.
    ///
    /// Unknown ids are ignored. Returns the ids actually removed, in
    /// catalog order.
    pub fn remove<I, S>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets: HashSet<String> = ids
            .into_iter()
            .map(|id| normalize_product_id(id.as_ref()))
            .collect();

        let mut removed = Vec::new();
        self.products.retain(|p| {
            if targets.contains(&p.id) {
                removed.push(p.id.clone());
                false
            } else {
                true
            }
        });

        if !removed.is_empty() {
            self.rebuild_index();
            debug!(count = removed.len(), "Removed products");
        }

        removed
    }

    /// Looks a product up by id (case-insensitive).
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.index
            .get(&normalize_product_id(id))
            .map(|&pos| &self.products[pos])
    }

    /// Looks a product up by display name (trimmed, case-insensitive).
    ///
    /// When several products share a name the first in catalog order wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let wanted = name.trim().to_lowercase();
        self.products
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
    }

    /// Returns true if the id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(&normalize_product_id(id))
    }

    /// Applies an explicit field edit.
    ///
    /// Ledger entries keep the name they captured when they were applied.
    pub fn update(&mut self, id: &str, patch: ProductPatch) -> CoreResult<&Product> {
        let key = normalize_product_id(id);
        let pos = *self
            .index
            .get(&key)
            .ok_or_else(|| CoreError::unknown_product(key.clone()))?;

        if let Some(name) = &patch.name {
            validate_product_name(name)?;
        }
        if let Some(category) = &patch.category {
            validate_required("category", category)?;
        }
        if let Some(presentation) = &patch.presentation {
            validate_required("presentation", presentation)?;
        }

        let product = &mut self.products[pos];
        if let Some(name) = patch.name {
            product.name = name.trim().to_string();
        }
        if let Some(category) = patch.category {
            product.category = category.trim().to_string();
        }
        if let Some(presentation) = patch.presentation {
            product.presentation = presentation.trim().to_string();
        }

        debug!(id = %key, "Updated product fields");
        Ok(&self.products[pos])
    }

    /// Products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Mutable lookup for the movement processor.
    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut Product> {
        match self.index.get(&normalize_product_id(id)) {
            Some(&pos) => self.products.get_mut(pos),
            None => None,
        }
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .products
            .iter()
            .enumerate()
            .map(|(pos, p)| (p.id.clone(), pos))
            .collect();
    }
}

impl<'a> IntoIterator for &'a ProductCatalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(id: &str, name: &str, stock: i64) -> NewProduct {
        NewProduct {
            id: id.to_string(),
            category: "Bebidas".to_string(),
            name: name.to_string(),
            presentation: "Unidad".to_string(),
            initial_stock: stock,
        }
    }

    #[test]
    fn test_add_normalizes_id() {
        let mut catalog = ProductCatalog::new();
        let p = catalog.add(new_product("  a1 ", "Agua", 10)).unwrap();
        assert_eq!(p.id, "A1");
        assert_eq!(p.stock, 10);
        assert_eq!(p.cumulative_sales, 0);
        assert_eq!(p.cumulative_purchases, 0);
        assert!(catalog.contains("a1"));
    }

    #[test]
    fn test_add_duplicate_is_rejected() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("A1", "Agua", 10)).unwrap();

        let err = catalog.add(new_product("a1", "Otra", 3)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("A1").unwrap().name, "Agua");
    }

    #[test]
    fn test_remove_ignores_unknown_ids() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("A1", "Agua", 1)).unwrap();
        catalog.add(new_product("B2", "Jugo", 2)).unwrap();
        catalog.add(new_product("C3", "Leche", 3)).unwrap();

        let removed = catalog.remove(["b2", "ZZ9"]);
        assert_eq!(removed, vec!["B2".to_string()]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.find("B2").is_none());
        // index still valid after compaction
        assert_eq!(catalog.find("C3").unwrap().stock, 3);
    }

    #[test]
    fn test_find_by_name() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("A1", "Agua Mineral", 1)).unwrap();
        assert_eq!(catalog.find_by_name(" agua mineral ").unwrap().id, "A1");
        assert!(catalog.find_by_name("Jugo").is_none());
    }

    #[test]
    fn test_update_fields_only() {
        let mut catalog = ProductCatalog::new();
        catalog.add(new_product("A1", "Agua", 7)).unwrap();

        let patch = ProductPatch {
            name: Some("Agua 1L".to_string()),
            ..Default::default()
        };
        let p = catalog.update("a1", patch).unwrap();
        assert_eq!(p.name, "Agua 1L");
        assert_eq!(p.category, "Bebidas");
        assert_eq!(p.stock, 7);

        let bad = ProductPatch {
            category: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(catalog.update("A1", bad).is_err());
        assert!(matches!(
            catalog.update("ZZ", ProductPatch::default()),
            Err(CoreError::UnknownProduct(_))
        ));
    }

    #[test]
    fn test_display_order_is_insertion_order() {
        let mut catalog = ProductCatalog::new();
        for id in ["C", "A", "B"] {
            catalog.add(new_product(id, id, 0)).unwrap();
        }
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }
}
