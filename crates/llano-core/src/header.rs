//! # Header Normalization
//!
//! Maps arbitrary external column names onto canonical field identifiers.
//!
//! ## Normalization Steps
//! ```text
//! "  Categoría  Principal "
//!      │ strip BOM, NFKD + drop combining marks
//!      ▼
//! "  Categoria  Principal "
//!      │ trim, whitespace runs → '_'
//!      ▼
//! "Categoria_Principal"
//!      │ upper-case
//!      ▼
//! "CATEGORIA_PRINCIPAL"
//! ```
//!
//! ## Quantity Column Resolution
//! Movement files name their quantity column in several ways. Instead of
//! taking the first header that happens to contain "CANTIDAD", the
//! resolver walks an ordered tier table and refuses to guess:
//!
//! ```text
//! Tier 1  kind-specific   CANTIDAD_VENDIDA, QUANTITY_SOLD        (sales)
//!                         CANTIDAD_COMPRADA, QUANTITY_PURCHASED  (purchases)
//! Tier 2  generic         CANTIDAD, QUANTITY
//! Tier 3  substring       *CANTIDAD*, *QUANTITY*
//!
//! first tier with exactly one hit  → that column
//! a tier with several hits         → FormatError::AmbiguousColumn
//! no hit in any tier               → FormatError::MissingColumn("QUANTITY")
//! ```

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::error::FormatError;
use crate::types::MovementKind;

/// Separator that replaces internal whitespace in normalized headers.
pub const HEADER_SEPARATOR: char = '_';

/// Canonical id column.
pub const ID_COLUMN: &str = "ID";

/// Role name reported when no quantity column can be found.
pub const QUANTITY_ROLE: &str = "QUANTITY";

/// Canonical columns of the initial catalog file.
pub const PRODUCT_COLUMN: &str = "PRODUCTO";
pub const INITIAL_STOCK_COLUMN: &str = "STOCK_INICIAL";
pub const CATEGORY_COLUMN: &str = "CATEGORIA";
pub const PRESENTATION_COLUMN: &str = "PRESENTACION";

const SALE_QUANTITY_ALIASES: &[&str] = &["CANTIDAD_VENDIDA", "QUANTITY_SOLD"];
const PURCHASE_QUANTITY_ALIASES: &[&str] = &["CANTIDAD_COMPRADA", "QUANTITY_PURCHASED"];
const GENERIC_QUANTITY_ALIASES: &[&str] = &["CANTIDAD", "QUANTITY"];
const QUANTITY_FRAGMENTS: &[&str] = &["CANTIDAD", "QUANTITY"];

// =============================================================================
// Normalizers
// =============================================================================

/// Normalizes a column header.
///
/// Pure and total: every input, including the empty string, has an output.
///
/// ```rust
/// use llano_core::header::normalize_header;
///
/// assert_eq!(normalize_header(" Presentación "), "PRESENTACION");
/// assert_eq!(normalize_header("Stock Inicial"), "STOCK_INICIAL");
/// assert_eq!(normalize_header(""), "");
/// ```
pub fn normalize_header(header: &str) -> String {
    let stripped: String = header
        .trim_matches('\u{feff}')
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let mut out = String::with_capacity(stripped.len());
    let mut pending_separator = false;
    for ch in stripped.trim().chars() {
        if ch.is_whitespace() {
            pending_separator = true;
            continue;
        }
        if pending_separator {
            out.push(HEADER_SEPARATOR);
            pending_separator = false;
        }
        out.extend(ch.to_uppercase());
    }
    out
}

/// Normalizes a product id: trimmed and upper-cased.
///
/// Diacritics are kept; only headers are folded to ASCII.
pub fn normalize_product_id(id: &str) -> String {
    id.trim().to_uppercase()
}

// =============================================================================
// Header Map
// =============================================================================

/// Normalized view of a record set's header row.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    normalized: Vec<String>,
}

impl HeaderMap {
    /// Normalizes every header once.
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        HeaderMap {
            normalized: headers
                .iter()
                .map(|h| normalize_header(h.as_ref()))
                .collect(),
        }
    }

    /// Normalized headers in their original order.
    pub fn headers(&self) -> &[String] {
        &self.normalized
    }

    /// Finds the column whose normalized name equals `canonical`.
    ///
    /// Returns `Ok(None)` when absent and an ambiguity error when the
    /// name occurs more than once.
    pub fn find(&self, canonical: &str) -> Result<Option<usize>, FormatError> {
        let hits = self.positions(|h| h == canonical);
        match hits.as_slice() {
            [] => Ok(None),
            [idx] => Ok(Some(*idx)),
            _ => Err(self.ambiguous(canonical, &hits)),
        }
    }

    /// Like [`find`](Self::find) but absence is a `MissingColumn` error.
    pub fn require(&self, canonical: &str) -> Result<usize, FormatError> {
        self.find(canonical)?
            .ok_or_else(|| FormatError::MissingColumn(canonical.to_string()))
    }

    /// Resolves the quantity column for a movement file of `kind`.
    pub fn resolve_quantity(&self, kind: MovementKind) -> Result<usize, FormatError> {
        let specific = match kind {
            MovementKind::Sale => SALE_QUANTITY_ALIASES,
            MovementKind::Purchase => PURCHASE_QUANTITY_ALIASES,
        };

        for tier in [specific, GENERIC_QUANTITY_ALIASES] {
            let hits = self.positions(|h| tier.contains(&h));
            if let Some(idx) = self.single(&hits)? {
                return Ok(idx);
            }
        }

        let hits = self.positions(|h| QUANTITY_FRAGMENTS.iter().any(|f| h.contains(f)));
        self.single(&hits)?
            .ok_or_else(|| FormatError::MissingColumn(QUANTITY_ROLE.to_string()))
    }

    fn positions(&self, pred: impl Fn(&str) -> bool) -> Vec<usize> {
        self.normalized
            .iter()
            .enumerate()
            .filter(|(_, h)| pred(h.as_str()))
            .map(|(i, _)| i)
            .collect()
    }

    fn single(&self, hits: &[usize]) -> Result<Option<usize>, FormatError> {
        match hits {
            [] => Ok(None),
            [idx] => Ok(Some(*idx)),
            _ => Err(self.ambiguous(QUANTITY_ROLE, hits)),
        }
    }

    fn ambiguous(&self, role: &str, hits: &[usize]) -> FormatError {
        FormatError::AmbiguousColumn {
            role: role.to_string(),
            candidates: hits.iter().map(|&i| self.normalized[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("ID"), "ID");
        assert_eq!(normalize_header(" id "), "ID");
        assert_eq!(normalize_header("Categoría"), "CATEGORIA");
        assert_eq!(normalize_header("Presentación"), "PRESENTACION");
        assert_eq!(normalize_header("Cantidad Vendida"), "CANTIDAD_VENDIDA");
        assert_eq!(normalize_header("Cantidad   Vendida"), "CANTIDAD_VENDIDA");
        assert_eq!(normalize_header("\u{feff}ID"), "ID");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn test_normalize_product_id() {
        assert_eq!(normalize_product_id("  a1 "), "A1");
        assert_eq!(normalize_product_id("coke-330"), "COKE-330");
    }

    #[test]
    fn test_require_missing_and_duplicate() {
        let map = HeaderMap::new(&["Producto", "Cantidad"]);
        assert!(matches!(
            map.require(ID_COLUMN),
            Err(FormatError::MissingColumn(c)) if c == "ID"
        ));

        let map = HeaderMap::new(&["ID", " id"]);
        assert!(matches!(
            map.require(ID_COLUMN),
            Err(FormatError::AmbiguousColumn { .. })
        ));
    }

    #[test]
    fn test_quantity_tiers() {
        let map = HeaderMap::new(&["ID", "Cantidad Vendida", "Cantidad Comprada"]);
        assert_eq!(map.resolve_quantity(MovementKind::Sale).unwrap(), 1);
        assert_eq!(map.resolve_quantity(MovementKind::Purchase).unwrap(), 2);

        let map = HeaderMap::new(&["ID", "Cantidad"]);
        assert_eq!(map.resolve_quantity(MovementKind::Sale).unwrap(), 1);

        // kind-agnostic fallback
        let map = HeaderMap::new(&["ID", "Cantidad Comprada"]);
        assert_eq!(map.resolve_quantity(MovementKind::Sale).unwrap(), 1);

        let map = HeaderMap::new(&["ID", "Total Quantity"]);
        assert_eq!(map.resolve_quantity(MovementKind::Purchase).unwrap(), 1);
    }

    #[test]
    fn test_quantity_ambiguous_and_missing() {
        let map = HeaderMap::new(&["ID", "Cantidad Caja", "Cantidad Unidad"]);
        match map.resolve_quantity(MovementKind::Sale) {
            Err(FormatError::AmbiguousColumn { role, candidates }) => {
                assert_eq!(role, "QUANTITY");
                assert_eq!(candidates, vec!["CANTIDAD_CAJA", "CANTIDAD_UNIDAD"]);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }

        let map = HeaderMap::new(&["ID", "Unidades"]);
        assert!(matches!(
            map.resolve_quantity(MovementKind::Sale),
            Err(FormatError::MissingColumn(c)) if c == "QUANTITY"
        ));
    }
}
