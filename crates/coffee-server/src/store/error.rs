//! Drink store errors.

/// Result type for drink store operations.
pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;

/// Failures reported by a [`DrinkRepository`].
///
/// [`DrinkRepository`]: super::DrinkRepository
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[must_use = "store errors should be handled appropriately"]
pub enum StoreError {
    /// Another drink already uses this title.
    #[error("a drink titled '{0}' already exists")]
    DuplicateTitle(String),

    /// No drink has this id.
    #[error("drink {0} does not exist")]
    NotFound(i32),
}
