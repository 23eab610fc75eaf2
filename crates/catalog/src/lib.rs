//! Catalog read models and filters.
//!
//! This crate contains the product/category snapshot types the external state
//! holder supplies, plus the pure filter functions the storefront view
//! recomputes on every render (no IO, no rendering, no storage).

pub mod category;
pub mod filter;
pub mod product;

mod slug;

pub use category::{Category, CategoryId};
pub use filter::{products_in_category, represented_categories, search_by_name};
pub use product::{Price, Product, ProductId, Rating};
