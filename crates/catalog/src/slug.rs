//! Shared validation for slug-shaped identifiers.

use shopfront_core::{DomainError, DomainResult};

/// Check that `raw` is a well-formed identifier slug.
///
/// Catalog identifiers are non-empty lowercase ASCII alphanumerics with `-`
/// separators, the shape snapshot data uses for both products and categories.
pub(crate) fn validate_slug(kind: &str, raw: &str) -> DomainResult<()> {
    if raw.is_empty() {
        return Err(DomainError::invalid_id(format!("{kind} must not be empty")));
    }
    let well_formed = raw
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if !well_formed {
        return Err(DomainError::invalid_id(format!(
            "{kind} must be a lowercase slug ([a-z0-9-]), got {raw:?}"
        )));
    }
    Ok(())
}
