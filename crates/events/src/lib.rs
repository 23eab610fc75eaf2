//! Session events and command execution.
//!
//! Every user interaction with the storefront is decided by an aggregate and
//! recorded as events; this crate holds the shared [`Event`] trait and the
//! [`execute`] helper that drives the handle/apply lifecycle.

pub mod event;
pub mod handler;

pub use event::Event;
pub use handler::execute;
