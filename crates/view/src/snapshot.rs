use serde::{Deserialize, Serialize};

use shopfront_catalog::{Category, Product, ProductId};
use shopfront_core::find_by_id;

/// Externally-owned catalog state: the product and category collections the
/// view reads. Nothing here is created or destroyed by this subsystem; the
/// holder swaps the whole snapshot when its store changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl Snapshot {
    /// Look up a product for an interaction payload (add to cart, compare).
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        find_by_id(&self.products, id)
    }
}
