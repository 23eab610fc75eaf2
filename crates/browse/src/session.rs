//! Selection state machine: which category and page the user is looking at.
//!
//! States are `(active_category, active_page)` pairs held per session. The
//! aggregate only records selections; slicing the visible page out of the
//! filtered collection is [`crate::page`]'s job at render time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_catalog::CategoryId;
use shopfront_core::{Aggregate, AggregateRoot, DomainError, SessionId};
use shopfront_events::Event;

use crate::page::{next_page, previous_page};

/// Aggregate root: BrowseSession.
///
/// Category changes always reset the page to 0 (a product decision, preserved
/// verbatim). Page indices are stored as selected; pulling them back into
/// range after the collection shrinks is the explicit [`ClampPage`] command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseSession {
    id: SessionId,
    active_category: Option<CategoryId>,
    active_page: usize,
    version: u64,
    started: bool,
}

impl BrowseSession {
    /// Create an empty, not-yet-started instance for rehydration.
    pub fn empty(id: SessionId) -> Self {
        Self {
            id,
            active_category: None,
            active_page: 0,
            version: 0,
            started: false,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    /// Currently selected category (None until the session starts).
    pub fn category(&self) -> Option<&CategoryId> {
        self.active_category.as_ref()
    }

    /// Currently selected zero-based page index.
    pub fn page(&self) -> usize {
        self.active_page
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl AggregateRoot for BrowseSession {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: StartSession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartSession {
    pub session_id: SessionId,
    /// Caller-supplied default category (the initial tab).
    pub category: CategoryId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SelectCategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectCategory {
    pub session_id: SessionId,
    pub category: CategoryId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SelectPage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectPage {
    pub session_id: SessionId,
    pub page: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Command: NextPage.
///
/// Carries the current page count because the session does not know the
/// filtered collection; the holder computes it at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPage {
    pub session_id: SessionId,
    pub page_count: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Command: PreviousPage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousPage {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClampPage.
///
/// The holder's duty after the product set shrinks (filter change, snapshot
/// swap): pull the held page back under the supplied bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampPage {
    pub session_id: SessionId,
    pub page_count: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowseSessionCommand {
    StartSession(StartSession),
    SelectCategory(SelectCategory),
    SelectPage(SelectPage),
    NextPage(NextPage),
    PreviousPage(PreviousPage),
    ClampPage(ClampPage),
}

/// Event: SessionStarted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStarted {
    pub session_id: SessionId,
    pub category: CategoryId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CategorySelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelected {
    pub session_id: SessionId,
    pub category: CategoryId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PageSelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSelected {
    pub session_id: SessionId,
    pub page: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PageClamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageClamped {
    pub session_id: SessionId,
    /// The in-range index the page was pulled back to.
    pub page: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowseSessionEvent {
    SessionStarted(SessionStarted),
    CategorySelected(CategorySelected),
    PageSelected(PageSelected),
    PageClamped(PageClamped),
}

impl Event for BrowseSessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            BrowseSessionEvent::SessionStarted(_) => "browse.session.started",
            BrowseSessionEvent::CategorySelected(_) => "browse.session.category_selected",
            BrowseSessionEvent::PageSelected(_) => "browse.session.page_selected",
            BrowseSessionEvent::PageClamped(_) => "browse.session.page_clamped",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            BrowseSessionEvent::SessionStarted(e) => e.occurred_at,
            BrowseSessionEvent::CategorySelected(e) => e.occurred_at,
            BrowseSessionEvent::PageSelected(e) => e.occurred_at,
            BrowseSessionEvent::PageClamped(e) => e.occurred_at,
        }
    }
}

impl Aggregate for BrowseSession {
    type Command = BrowseSessionCommand;
    type Event = BrowseSessionEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            BrowseSessionEvent::SessionStarted(e) => {
                self.id = e.session_id;
                self.active_category = Some(e.category.clone());
                self.active_page = 0;
                self.started = true;
            }
            BrowseSessionEvent::CategorySelected(e) => {
                self.active_category = Some(e.category.clone());
                // Category change always resets to the first page.
                self.active_page = 0;
            }
            BrowseSessionEvent::PageSelected(e) => {
                self.active_page = e.page;
            }
            BrowseSessionEvent::PageClamped(e) => {
                self.active_page = e.page;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            BrowseSessionCommand::StartSession(cmd) => self.handle_start(cmd),
            BrowseSessionCommand::SelectCategory(cmd) => self.handle_select_category(cmd),
            BrowseSessionCommand::SelectPage(cmd) => self.handle_select_page(cmd),
            BrowseSessionCommand::NextPage(cmd) => self.handle_next_page(cmd),
            BrowseSessionCommand::PreviousPage(cmd) => self.handle_previous_page(cmd),
            BrowseSessionCommand::ClampPage(cmd) => self.handle_clamp_page(cmd),
        }
    }
}

impl BrowseSession {
    fn ensure_session_id(&self, session_id: SessionId) -> Result<(), DomainError> {
        if self.id != session_id {
            return Err(DomainError::invariant("session_id mismatch"));
        }
        Ok(())
    }

    fn ensure_started(&self) -> Result<(), DomainError> {
        if !self.started {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    fn handle_start(&self, cmd: &StartSession) -> Result<Vec<BrowseSessionEvent>, DomainError> {
        if self.started {
            return Err(DomainError::conflict("session already started"));
        }

        Ok(vec![BrowseSessionEvent::SessionStarted(SessionStarted {
            session_id: cmd.session_id,
            category: cmd.category.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_select_category(
        &self,
        cmd: &SelectCategory,
    ) -> Result<Vec<BrowseSessionEvent>, DomainError> {
        self.ensure_started()?;
        self.ensure_session_id(cmd.session_id)?;

        // Re-selecting the active category still rewinds to page 0; the
        // transition is unconditional.
        Ok(vec![BrowseSessionEvent::CategorySelected(CategorySelected {
            session_id: cmd.session_id,
            category: cmd.category.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_select_page(
        &self,
        cmd: &SelectPage,
    ) -> Result<Vec<BrowseSessionEvent>, DomainError> {
        self.ensure_started()?;
        self.ensure_session_id(cmd.session_id)?;

        // The raw index is stored as selected. An index past the current page
        // count renders as "no results"; [`ClampPage`] pulls it back in range.
        Ok(vec![BrowseSessionEvent::PageSelected(PageSelected {
            session_id: cmd.session_id,
            page: cmd.page,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_next_page(&self, cmd: &NextPage) -> Result<Vec<BrowseSessionEvent>, DomainError> {
        self.ensure_started()?;
        self.ensure_session_id(cmd.session_id)?;

        let target = next_page(self.active_page, cmd.page_count);
        if target == self.active_page {
            // Already at the last page: navigation saturates, nothing happened.
            return Ok(vec![]);
        }

        Ok(vec![BrowseSessionEvent::PageSelected(PageSelected {
            session_id: cmd.session_id,
            page: target,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_previous_page(
        &self,
        cmd: &PreviousPage,
    ) -> Result<Vec<BrowseSessionEvent>, DomainError> {
        self.ensure_started()?;
        self.ensure_session_id(cmd.session_id)?;

        let target = previous_page(self.active_page);
        if target == self.active_page {
            return Ok(vec![]);
        }

        Ok(vec![BrowseSessionEvent::PageSelected(PageSelected {
            session_id: cmd.session_id,
            page: target,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_clamp_page(&self, cmd: &ClampPage) -> Result<Vec<BrowseSessionEvent>, DomainError> {
        self.ensure_started()?;
        self.ensure_session_id(cmd.session_id)?;

        // An empty collection has no pages; the held index rests at 0.
        let last_in_range = cmd.page_count.saturating_sub(1);
        if self.active_page <= last_in_range {
            return Ok(vec![]);
        }

        Ok(vec![BrowseSessionEvent::PageClamped(PageClamped {
            session_id: cmd.session_id,
            page: last_in_range,
            occurred_at: cmd.occurred_at,
        })])
    }
}
