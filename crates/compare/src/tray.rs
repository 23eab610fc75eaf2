use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_catalog::ProductId;
use shopfront_core::{Aggregate, AggregateRoot, DomainError, SessionId};
use shopfront_events::Event;

/// Most products a tray holds; a side-by-side view wider than this is
/// unreadable on any display mode.
pub const MAX_COMPARE_ITEMS: usize = 4;

/// What the tray renders for each compared product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareItem {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
}

/// Aggregate root: CompareTray.
///
/// The tray is born empty with its session; there is no separate lifecycle.
/// Removal comes in two explicit shapes (one item by id, or the whole tray)
/// with no optional-argument path between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareTray {
    id: SessionId,
    items: Vec<CompareItem>,
    version: u64,
}

impl CompareTray {
    /// A fresh, empty tray for the given session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            items: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    /// Compared products in the order they were added.
    pub fn items(&self) -> &[CompareItem] {
        &self.items
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_COMPARE_ITEMS
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| item.product_id == *product_id)
    }
}

impl AggregateRoot for CompareTray {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddToCompare.
///
/// Carries the rendered fields; the holder looks them up in the snapshot at
/// dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCompare {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveFromCompare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveFromCompare {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCompare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCompare {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareTrayCommand {
    AddToCompare(AddToCompare),
    RemoveFromCompare(RemoveFromCompare),
    ClearCompare(ClearCompare),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TrayCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayCleared {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareTrayEvent {
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
    TrayCleared(TrayCleared),
}

impl Event for CompareTrayEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CompareTrayEvent::ItemAdded(_) => "compare.tray.item_added",
            CompareTrayEvent::ItemRemoved(_) => "compare.tray.item_removed",
            CompareTrayEvent::TrayCleared(_) => "compare.tray.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CompareTrayEvent::ItemAdded(e) => e.occurred_at,
            CompareTrayEvent::ItemRemoved(e) => e.occurred_at,
            CompareTrayEvent::TrayCleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for CompareTray {
    type Command = CompareTrayCommand;
    type Event = CompareTrayEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CompareTrayEvent::ItemAdded(e) => {
                self.items.push(CompareItem {
                    product_id: e.product_id.clone(),
                    name: e.name.clone(),
                    image: e.image.clone(),
                });
            }
            CompareTrayEvent::ItemRemoved(e) => {
                self.items.retain(|item| item.product_id != e.product_id);
            }
            CompareTrayEvent::TrayCleared(_) => {
                self.items.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CompareTrayCommand::AddToCompare(cmd) => self.handle_add(cmd),
            CompareTrayCommand::RemoveFromCompare(cmd) => self.handle_remove(cmd),
            CompareTrayCommand::ClearCompare(cmd) => self.handle_clear(cmd),
        }
    }
}

impl CompareTray {
    fn ensure_session_id(&self, session_id: SessionId) -> Result<(), DomainError> {
        if self.id != session_id {
            return Err(DomainError::invariant("session_id mismatch"));
        }
        Ok(())
    }

    fn handle_add(&self, cmd: &AddToCompare) -> Result<Vec<CompareTrayEvent>, DomainError> {
        self.ensure_session_id(cmd.session_id)?;

        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        if self.contains(&cmd.product_id) {
            return Err(DomainError::conflict("product is already being compared"));
        }

        if self.is_full() {
            return Err(DomainError::invariant("comparison tray is full"));
        }

        Ok(vec![CompareTrayEvent::ItemAdded(ItemAdded {
            session_id: cmd.session_id,
            product_id: cmd.product_id.clone(),
            name: cmd.name.clone(),
            image: cmd.image.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(
        &self,
        cmd: &RemoveFromCompare,
    ) -> Result<Vec<CompareTrayEvent>, DomainError> {
        self.ensure_session_id(cmd.session_id)?;

        if !self.contains(&cmd.product_id) {
            return Err(DomainError::not_found());
        }

        Ok(vec![CompareTrayEvent::ItemRemoved(ItemRemoved {
            session_id: cmd.session_id,
            product_id: cmd.product_id.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_clear(&self, cmd: &ClearCompare) -> Result<Vec<CompareTrayEvent>, DomainError> {
        self.ensure_session_id(cmd.session_id)?;

        if self.items.is_empty() {
            return Ok(vec![]);
        }

        Ok(vec![CompareTrayEvent::TrayCleared(TrayCleared {
            session_id: cmd.session_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
