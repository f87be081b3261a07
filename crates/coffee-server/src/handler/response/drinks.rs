//! Drink response types.

use serde::{Deserialize, Serialize};

use crate::store::{Drink, ShortDrink};

/// Envelope of every successful drink listing or mutation.
///
/// `T` is [`ShortDrink`] on the public menu and [`Drink`] everywhere else.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    /// Wraps drinks in a successful response.
    pub fn new(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

impl DrinksResponse<ShortDrink> {
    /// Public menu listing.
    pub fn short<'a>(drinks: impl IntoIterator<Item = &'a Drink>) -> Self {
        Self::new(drinks.into_iter().map(Drink::short).collect())
    }
}

impl DrinksResponse<Drink> {
    /// Detailed listing, or the single drink touched by a mutation.
    pub fn long<'a>(drinks: impl IntoIterator<Item = &'a Drink>) -> Self {
        Self::new(drinks.into_iter().map(Drink::long).collect())
    }
}

/// Response returned when a drink is deleted.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedDrinkResponse {
    pub success: bool,
    pub deleted_drink: i32,
}

impl DeletedDrinkResponse {
    /// Creates a new [`DeletedDrinkResponse`].
    pub fn new(id: i32) -> Self {
        Self {
            success: true,
            deleted_drink: id,
        }
    }
}
