//! Drink persistence.
//!
//! Handlers talk to storage through the [`DrinkRepository`] trait, so the
//! in-memory [`MemoryDrinkStore`] can be swapped for a database-backed one
//! without touching the HTTP layer.

mod drink;
mod error;
mod memory;

use std::fmt;

use async_trait::async_trait;

pub use self::drink::{Drink, Ingredient, NewDrink, ShortDrink, ShortIngredient, UpdateDrink};
pub use self::error::{StoreError, StoreResult};
pub use self::memory::MemoryDrinkStore;

/// Storage operations over drinks.
#[async_trait]
pub trait DrinkRepository: Send + Sync + fmt::Debug {
    /// Returns every drink ordered by id.
    async fn list_drinks(&self) -> StoreResult<Vec<Drink>>;

    /// Finds a drink by its id.
    async fn find_drink_by_id(&self, id: i32) -> StoreResult<Option<Drink>>;

    /// Stores a new drink and assigns its id.
    async fn create_drink(&self, drink: NewDrink) -> StoreResult<Drink>;

    /// Applies a partial update and returns the updated drink.
    async fn update_drink(&self, id: i32, changes: UpdateDrink) -> StoreResult<Drink>;

    /// Removes a drink and returns it.
    async fn delete_drink(&self, id: i32) -> StoreResult<Drink>;
}
