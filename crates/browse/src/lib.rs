//! Browsing domain module: display modes, pagination, selection state.
//!
//! The paginator is pure arithmetic over provided bounds; the selection state
//! machine is a deterministic aggregate. No IO, no rendering, no storage.

pub mod mode;
pub mod page;
pub mod session;

pub use mode::DisplayMode;
pub use page::{PageView, next_page, page_count, paginate, previous_page};
pub use session::{
    BrowseSession, BrowseSessionCommand, BrowseSessionEvent, CategorySelected, ClampPage, NextPage,
    PageClamped, PageSelected, PreviousPage, SelectCategory, SelectPage, SessionStarted,
    StartSession,
};
