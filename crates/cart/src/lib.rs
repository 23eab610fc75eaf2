//! Cart domain module.
//!
//! One line per product, merge-on-add quantities, and the derived totals the
//! mini-cart view renders. Deterministic domain logic only: no IO, no
//! rendering, no storage, no checkout.

pub mod cart;

pub use cart::{
    AddProduct, Cart, CartCleared, CartCommand, CartEvent, CartLine, ChangeQuantity, ClearCart,
    MAX_CART_LINES, MAX_LINE_QUANTITY, ProductAdded, ProductRemoved, QuantityChanged,
    RemoveProduct,
};
