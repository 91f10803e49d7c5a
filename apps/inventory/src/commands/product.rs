//! # Product Commands
//!
//! Catalog maintenance: manual add, field edits, removal, lookup and the
//! initial catalog load from a file.

use std::path::Path;

use llano_core::header::normalize_product_id;
use llano_core::{parse_catalog, CatalogLoadReport, NewProduct, Product, ProductPatch};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::InventoryState;

/// Result of a removal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveProductsResponse {
    /// Ids that were in the catalog and are now gone.
    pub removed: Vec<String>,

    /// Requested ids that were not in the catalog.
    pub ignored: Vec<String>,
}

/// Adds a product from the manual form.
///
/// ## Returns
/// The stored product (id normalized), or `VALIDATION_ERROR` for a
/// duplicate id or a blank field.
pub fn add_product(state: &InventoryState, product: NewProduct) -> Result<Product, ApiError> {
    debug!(id = %product.id, "add_product command");
    let product = state.with_inventory_mut(|inv, _| inv.add_product(product).cloned())??;
    info!(id = %product.id, stock = product.stock, "Product added");
    Ok(product)
}

/// Edits name, category or presentation.
pub fn update_product(
    state: &InventoryState,
    id: &str,
    patch: ProductPatch,
) -> Result<Product, ApiError> {
    debug!(id = %id, "update_product command");
    if patch.is_empty() {
        return Err(ApiError::validation("Nothing to update"));
    }
    let product = state.with_inventory_mut(|inv, _| inv.update_product(id, patch).cloned())??;
    Ok(product)
}

/// Removes products by id. Unknown ids are reported, not rejected.
pub fn remove_products(
    state: &InventoryState,
    ids: &[String],
) -> Result<RemoveProductsResponse, ApiError> {
    debug!(count = ids.len(), "remove_products command");
    let removed = state.with_inventory_mut(|inv, _| inv.remove_products(ids))?;

    let mut ignored: Vec<String> = Vec::new();
    for id in ids.iter().map(|id| normalize_product_id(id)) {
        if !removed.contains(&id) && !ignored.contains(&id) {
            ignored.push(id);
        }
    }

    info!(removed = removed.len(), ignored = ignored.len(), "Products removed");
    Ok(RemoveProductsResponse { removed, ignored })
}

/// Gets a single product by id.
///
/// ## Returns
/// The product if found, or `NOT_FOUND`.
pub fn get_product(state: &InventoryState, id: &str) -> Result<Product, ApiError> {
    debug!(id = %id, "get_product command");
    state
        .with_inventory(|inv| inv.catalog().find(id).cloned())?
        .ok_or_else(|| ApiError::not_found("Product", id))
}

/// Looks a product up by display name. Absence is `None`, not an error.
pub fn find_product_by_name(
    state: &InventoryState,
    name: &str,
) -> Result<Option<Product>, ApiError> {
    debug!(name = %name, "find_product_by_name command");
    state.with_inventory(|inv| inv.catalog().find_by_name(name).cloned())
}

/// Lists the catalog in display order.
pub fn list_products(state: &InventoryState) -> Result<Vec<Product>, ApiError> {
    state.with_inventory(|inv| inv.catalog().products().to_vec())
}

/// Loads an initial catalog file.
///
/// The file is read before the lock is taken; parsing and insertion
/// happen under one acquisition.
pub fn load_catalog(state: &InventoryState, path: &Path) -> Result<CatalogLoadReport, ApiError> {
    debug!(path = %path.display(), "load_catalog command");
    let table = llano_io::read_table(path)?;

    let report = state.with_inventory_mut(|inv, _| {
        parse_catalog(&table).map(|parsed| inv.load_catalog(parsed))
    })??;
    Ok(report)
}
