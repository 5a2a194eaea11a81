//! Product Catalog Provider
//!
//! The catalog is a fixed product list defined at build time. Products are
//! immutable; the cart copies what it needs and never writes back.

use serde::Serialize;

/// A sellable product as defined by the catalog.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub images: Vec<String>,

    /// Unit price in minor currency units (cents). Currency amounts are
    /// integers everywhere; floating point never touches money.
    pub unit_price: i64,

    pub variant_label: String,
}

const VARIANTS: [&str; 3] = ["Lemon Squash", "Orange Crush", "Pineapple Punch"];

/// Returns every product the storefront sells, one entry per variant.
pub fn all() -> Vec<Product> {
    VARIANTS
        .iter()
        .map(|variant| Product {
            id: variant.to_lowercase().replace(' ', "-"),
            name: "Recovery Pack".to_string(),
            description: "Premium post-event recovery formula".to_string(),
            images: vec!["/01.png".to_string()],
            unit_price: 4999,
            variant_label: (*variant).to_string(),
        })
        .collect()
}

/// Looks up a product by its catalog identifier.
pub fn find(product_id: &str) -> Option<Product> {
    all().into_iter().find(|product| product.id == product_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_resolves_every_listed_product() {
        for product in all() {
            let found = find(&product.id).expect("catalog product should resolve");
            assert_eq!(found, product);
        }
    }

    #[test]
    fn unknown_id_yields_none() {
        assert!(find("glow-sticks").is_none());
    }

    #[test]
    fn prices_are_minor_unit_integers() {
        assert!(all().iter().all(|product| product.unit_price > 0));
    }
}
