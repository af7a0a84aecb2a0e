//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every failure in the inventory core is local and recoverable; nothing here
/// represents an infrastructure fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. negative price, empty name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A purchase asked for more units than the item has in stock.
    #[error("insufficient supply of {item}: requested {requested}, available {available}")]
    InsufficientSupply {
        item: String,
        requested: u32,
        available: u32,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_supply(item: impl Into<String>, requested: u32, available: u32) -> Self {
        Self::InsufficientSupply {
            item: item.into(),
            requested,
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_supply_message_names_the_item() {
        let err = DomainError::insufficient_supply("Jeans", 1, 0);
        assert_eq!(
            err.to_string(),
            "insufficient supply of Jeans: requested 1, available 0"
        );
    }
}
