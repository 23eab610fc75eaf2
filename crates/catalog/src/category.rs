use serde::{Deserialize, Serialize};

use shopfront_core::{DomainError, DomainResult, Entity};

use crate::slug::validate_slug;

/// Category identifier: a unique slug (e.g. "bed", "sofa").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        validate_slug("category id", &raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CategoryId {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<CategoryId> for String {
    fn from(id: CategoryId) -> Self {
        id.0
    }
}

impl core::str::FromStr for CategoryId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Catalog category as the external store supplies it.
///
/// Plain read model; this subsystem never creates or destroys categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_accepts_slugs_and_rejects_malformed() {
        assert!(CategoryId::new("bed").is_ok());
        assert!(CategoryId::new("living-room-2").is_ok());
        assert!(matches!(
            CategoryId::new("Bed").unwrap_err(),
            DomainError::InvalidId(_)
        ));
        assert!(CategoryId::new("").is_err());
    }

    #[test]
    fn deserialization_validates_the_slug() {
        let ok: Result<Category, _> =
            serde_json::from_str(r#"{ "id": "bed", "name": "Bed" }"#);
        assert!(ok.is_ok());

        let bad: Result<Category, _> =
            serde_json::from_str(r#"{ "id": "Not A Slug", "name": "Bed" }"#);
        assert!(bad.is_err());
    }
}
