//! View facade: the stand-in for the external state holder.
//!
//! [`Storefront`] owns the catalog snapshot and the per-session aggregates,
//! dispatches every interaction as a command, and recomputes the
//! [`CatalogPage`] view model on demand, mirroring the render cycle of the
//! surrounding UI without the rendering itself.

pub mod page;
pub mod snapshot;
pub mod storefront;

pub use page::{CartSummary, CatalogPage, CategoryTab};
pub use snapshot::Snapshot;
pub use storefront::Storefront;
