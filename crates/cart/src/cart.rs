use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_catalog::{Price, ProductId};
use shopfront_core::{Aggregate, AggregateRoot, DomainError, SessionId};
use shopfront_events::Event;

/// Most of a single product a line may hold. Guards against accidental
/// over-ordering (typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Most lines a cart may hold. Keeps runaway carts bounded.
pub const MAX_CART_LINES: usize = 100;

/// Cart line: product, display name, quantity, unit price.
///
/// The name and price are captured when the line is first added; merging more
/// of the same product only raises the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
}

impl CartLine {
    /// Quantity times unit price, saturating.
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Aggregate root: Cart.
///
/// Born empty with its session, one line per distinct product. Checkout is
/// out of scope; the cart only accumulates and reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: SessionId,
    lines: Vec<CartLine>,
    version: u64,
}

impl Cart {
    /// A fresh, empty cart for the given session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    /// Lines in the order their products were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == *product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line totals, saturating.
    pub fn subtotal(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::ZERO, |acc, line| acc.plus(line.line_total()))
    }

    /// Total number of units across all lines, saturating.
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }
}

impl AggregateRoot for Cart {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddProduct.
///
/// Carries the line payload; the holder looks it up in the snapshot at
/// dispatch time. Adding a product that already has a line merges quantities
/// instead of appending a second line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProduct {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ChangeQuantity.
///
/// Sets a line's quantity to an absolute value. Dropping a line entirely is
/// [`RemoveProduct`], not a zero quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeQuantity {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveProduct {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCart {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddProduct(AddProduct),
    ChangeQuantity(ChangeQuantity),
    RemoveProduct(RemoveProduct),
    ClearCart(ClearCart),
}

/// Event: ProductAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChanged {
    pub session_id: SessionId,
    pub product_id: ProductId,
    /// The line's new absolute quantity.
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRemoved {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCleared {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ProductAdded(ProductAdded),
    QuantityChanged(QuantityChanged),
    ProductRemoved(ProductRemoved),
    CartCleared(CartCleared),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ProductAdded(_) => "cart.product_added",
            CartEvent::QuantityChanged(_) => "cart.quantity_changed",
            CartEvent::ProductRemoved(_) => "cart.product_removed",
            CartEvent::CartCleared(_) => "cart.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ProductAdded(e) => e.occurred_at,
            CartEvent::QuantityChanged(e) => e.occurred_at,
            CartEvent::ProductRemoved(e) => e.occurred_at,
            CartEvent::CartCleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ProductAdded(e) => {
                self.lines.push(CartLine {
                    product_id: e.product_id.clone(),
                    name: e.name.clone(),
                    quantity: e.quantity,
                    unit_price: e.unit_price,
                });
            }
            CartEvent::QuantityChanged(e) => {
                if let Some(line) = self
                    .lines
                    .iter_mut()
                    .find(|line| line.product_id == e.product_id)
                {
                    line.quantity = e.quantity;
                }
            }
            CartEvent::ProductRemoved(e) => {
                self.lines.retain(|line| line.product_id != e.product_id);
            }
            CartEvent::CartCleared(_) => {
                self.lines.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddProduct(cmd) => self.handle_add(cmd),
            CartCommand::ChangeQuantity(cmd) => self.handle_change_quantity(cmd),
            CartCommand::RemoveProduct(cmd) => self.handle_remove(cmd),
            CartCommand::ClearCart(cmd) => self.handle_clear(cmd),
        }
    }
}

impl Cart {
    fn ensure_session_id(&self, session_id: SessionId) -> Result<(), DomainError> {
        if self.id != session_id {
            return Err(DomainError::invariant("session_id mismatch"));
        }
        Ok(())
    }

    fn ensure_quantity(quantity: u32) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(DomainError::validation(format!(
                "line quantity cannot exceed {MAX_LINE_QUANTITY}"
            )));
        }
        Ok(())
    }

    fn handle_add(&self, cmd: &AddProduct) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session_id(cmd.session_id)?;
        Self::ensure_quantity(cmd.quantity)?;

        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        if cmd.unit_price == Price::ZERO {
            return Err(DomainError::validation("unit price must be positive"));
        }

        if let Some(line) = self.line(&cmd.product_id) {
            // Merge-on-add: the line keeps its captured name and price, only
            // the quantity grows.
            let merged = line.quantity.saturating_add(cmd.quantity);
            if merged > MAX_LINE_QUANTITY {
                return Err(DomainError::validation(format!(
                    "line quantity cannot exceed {MAX_LINE_QUANTITY}"
                )));
            }
            return Ok(vec![CartEvent::QuantityChanged(QuantityChanged {
                session_id: cmd.session_id,
                product_id: cmd.product_id.clone(),
                quantity: merged,
                occurred_at: cmd.occurred_at,
            })]);
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(DomainError::invariant("cart is full"));
        }

        Ok(vec![CartEvent::ProductAdded(ProductAdded {
            session_id: cmd.session_id,
            product_id: cmd.product_id.clone(),
            name: cmd.name.clone(),
            quantity: cmd.quantity,
            unit_price: cmd.unit_price,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_change_quantity(
        &self,
        cmd: &ChangeQuantity,
    ) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session_id(cmd.session_id)?;
        Self::ensure_quantity(cmd.quantity)?;

        let Some(line) = self.line(&cmd.product_id) else {
            return Err(DomainError::not_found());
        };

        if line.quantity == cmd.quantity {
            return Ok(vec![]);
        }

        Ok(vec![CartEvent::QuantityChanged(QuantityChanged {
            session_id: cmd.session_id,
            product_id: cmd.product_id.clone(),
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveProduct) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session_id(cmd.session_id)?;

        if self.line(&cmd.product_id).is_none() {
            return Err(DomainError::not_found());
        }

        Ok(vec![CartEvent::ProductRemoved(ProductRemoved {
            session_id: cmd.session_id,
            product_id: cmd.product_id.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_clear(&self, cmd: &ClearCart) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session_id(cmd.session_id)?;

        if self.lines.is_empty() {
            return Ok(vec![]);
        }

        Ok(vec![CartEvent::CartCleared(CartCleared {
            session_id: cmd.session_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
