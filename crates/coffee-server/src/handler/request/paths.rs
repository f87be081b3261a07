//! Path parameter types for HTTP handlers.

use serde::{Deserialize, Serialize};

/// Path parameters for single drink operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct DrinkPathParams {
    /// Identifier of the drink.
    pub id: i32,
}
