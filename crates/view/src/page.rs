use serde::Serialize;

use shopfront_browse::DisplayMode;
use shopfront_cart::Cart;
use shopfront_catalog::{CategoryId, Price, Product};
use shopfront_compare::CompareItem;

/// One category tab above the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTab {
    pub id: CategoryId,
    pub name: String,
    pub active: bool,
}

/// What the mini-cart badge renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub lines: usize,
    pub units: u32,
    pub subtotal: Price,
}

impl CartSummary {
    pub(crate) fn of(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().len(),
            units: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

/// The fully recomputed view model for one render pass.
///
/// Derived data only: recomputing it twice against unchanged state yields an
/// identical value, and a superseded recompute is simply discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPage {
    pub mode: DisplayMode,
    /// Categories represented in the (search-narrowed) product set, with the
    /// active flag on the selected tab.
    pub tabs: Vec<CategoryTab>,
    pub active_category: Option<CategoryId>,
    /// Zero-based index currently held by the session.
    pub page: usize,
    /// Total pages of the narrowed, category-filtered collection.
    pub page_count: usize,
    /// Products visible on the held page (empty when the index is out of range).
    pub visible: Vec<Product>,
    /// How many products matched the search before category filtering; `None`
    /// when no search is active.
    pub search_results: Option<usize>,
    pub compare: Vec<CompareItem>,
    pub cart: CartSummary,
}
