use serde::{Deserialize, Serialize};

use shopfront_core::{DomainError, DomainResult, Entity, ValueObject};

use crate::category::CategoryId;
use crate::slug::validate_slug;

/// Product identifier: a unique slug (e.g. "aenean-ru-bristique-1").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        validate_slug("product id", &raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl core::str::FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Price in the smallest currency unit (cents).
///
/// Non-negative by construction (`u64`); line arithmetic saturates instead of
/// overflowing, keeping price math total.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    /// Line total: unit price times quantity.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    pub fn plus(self, other: Price) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl ValueObject for Price {}

/// Whole-star rating, clamped into `0..=MAX_STARS` on construction.
///
/// Out-of-range input is clamped rather than rejected, keeping snapshot
/// ingestion total at the call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX_STARS: u8 = 5;

    pub fn clamped(stars: u8) -> Self {
        Self(stars.min(Self::MAX_STARS))
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl From<u8> for Rating {
    fn from(stars: u8) -> Self {
        Self::clamped(stars)
    }
}

impl ValueObject for Rating {}

/// Catalog product as the external store supplies it.
///
/// Plain read model: this subsystem never creates or destroys products, it only
/// reads snapshots and computes derived views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Foreign key into the category snapshot.
    pub category: CategoryId,
    pub price: Price,
    pub rating: Rating,
    /// Promotional tag shown on the product box ("sale", "new" ribbon text).
    #[serde(default)]
    pub promo: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    /// Image reference; resolution is the renderer's concern.
    #[serde(default)]
    pub image: String,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
