//! Comparison tray domain module.
//!
//! A small capped list of products the user set side by side, implemented
//! purely as deterministic domain logic (no IO, no rendering, no storage).

pub mod tray;

pub use tray::{
    AddToCompare, ClearCompare, CompareItem, CompareTray, CompareTrayCommand, CompareTrayEvent,
    ItemAdded, ItemRemoved, MAX_COMPARE_ITEMS, RemoveFromCompare, TrayCleared,
};
