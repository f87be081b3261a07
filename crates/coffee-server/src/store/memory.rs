//! In-memory drink store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Drink, DrinkRepository, Ingredient, NewDrink, StoreError, StoreResult, UpdateDrink};

#[derive(Debug)]
struct Menu {
    drinks: BTreeMap<i32, Drink>,
    next_id: i32,
}

impl Menu {
    fn ensure_unique_title(&self, title: &str, except: Option<i32>) -> StoreResult<()> {
        let taken = self
            .drinks
            .values()
            .any(|drink| drink.title == title && Some(drink.id) != except);

        if taken {
            return Err(StoreError::DuplicateTitle(title.to_owned()));
        }
        Ok(())
    }
}

/// [`DrinkRepository`] kept in process memory.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct MemoryDrinkStore {
    menu: RwLock<Menu>,
}

impl Default for MemoryDrinkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDrinkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            menu: RwLock::new(Menu {
                drinks: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Creates a store holding the sample "water" drink.
    pub fn with_sample() -> Self {
        let water = Drink {
            id: 1,
            title: "water".to_owned(),
            recipe: vec![Ingredient {
                name: "water".to_owned(),
                color: "blue".to_owned(),
                parts: 1,
            }],
        };

        Self {
            menu: RwLock::new(Menu {
                drinks: BTreeMap::from([(water.id, water)]),
                next_id: 2,
            }),
        }
    }
}

#[async_trait]
impl DrinkRepository for MemoryDrinkStore {
    async fn list_drinks(&self) -> StoreResult<Vec<Drink>> {
        let menu = self.menu.read().await;
        Ok(menu.drinks.values().cloned().collect())
    }

    async fn find_drink_by_id(&self, id: i32) -> StoreResult<Option<Drink>> {
        let menu = self.menu.read().await;
        Ok(menu.drinks.get(&id).cloned())
    }

    async fn create_drink(&self, drink: NewDrink) -> StoreResult<Drink> {
        let mut menu = self.menu.write().await;
        menu.ensure_unique_title(&drink.title, None)?;

        let drink = Drink {
            id: menu.next_id,
            title: drink.title,
            recipe: drink.recipe,
        };
        menu.next_id += 1;
        menu.drinks.insert(drink.id, drink.clone());

        Ok(drink)
    }

    async fn update_drink(&self, id: i32, changes: UpdateDrink) -> StoreResult<Drink> {
        let mut menu = self.menu.write().await;
        if let Some(title) = changes.title.as_deref() {
            menu.ensure_unique_title(title, Some(id))?;
        }

        let drink = menu.drinks.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(title) = changes.title {
            drink.title = title;
        }
        if let Some(recipe) = changes.recipe {
            drink.recipe = recipe;
        }

        Ok(drink.clone())
    }

    async fn delete_drink(&self, id: i32) -> StoreResult<Drink> {
        let mut menu = self.menu.write().await;
        menu.drinks.remove(&id).ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_drink(title: &str) -> NewDrink {
        NewDrink {
            title: title.to_owned(),
            recipe: vec![Ingredient {
                name: "milk".to_owned(),
                color: "white".to_owned(),
                parts: 2,
            }],
        }
    }

    #[tokio::test]
    async fn ids_increase_and_are_not_reused() -> anyhow::Result<()> {
        let store = MemoryDrinkStore::new();

        let latte = store.create_drink(new_drink("latte")).await?;
        let flat_white = store.create_drink(new_drink("flat white")).await?;
        assert_eq!((latte.id, flat_white.id), (1, 2));

        store.delete_drink(flat_white.id).await?;
        let cortado = store.create_drink(new_drink("cortado")).await?;
        assert_eq!(cortado.id, 3);

        let ids = store
            .list_drinks()
            .await?
            .into_iter()
            .map(|drink| drink.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn sample_store_holds_water() -> anyhow::Result<()> {
        let store = MemoryDrinkStore::with_sample();
        let water = store.find_drink_by_id(1).await?.expect("sample drink");
        assert_eq!(water.title, "water");

        let next = store.create_drink(new_drink("latte")).await?;
        assert_eq!(next.id, 2);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_titles_are_rejected() -> anyhow::Result<()> {
        let store = MemoryDrinkStore::new();
        let latte = store.create_drink(new_drink("latte")).await?;
        let mocha = store.create_drink(new_drink("mocha")).await?;

        let error = store.create_drink(new_drink("latte")).await.unwrap_err();
        assert_eq!(error, StoreError::DuplicateTitle("latte".to_owned()));

        let rename = UpdateDrink {
            title: Some("latte".to_owned()),
            ..Default::default()
        };
        let error = store.update_drink(mocha.id, rename.clone()).await.unwrap_err();
        assert!(matches!(error, StoreError::DuplicateTitle(_)));

        // Keeping its own title is not a conflict.
        let updated = store.update_drink(latte.id, rename).await?;
        assert_eq!(updated.title, "latte");
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_only_present_fields() -> anyhow::Result<()> {
        let store = MemoryDrinkStore::new();
        let latte = store.create_drink(new_drink("latte")).await?;

        let updated = store
            .update_drink(
                latte.id,
                UpdateDrink {
                    title: Some("iced latte".to_owned()),
                    recipe: None,
                },
            )
            .await?;

        assert_eq!(updated.title, "iced latte");
        assert_eq!(updated.recipe, latte.recipe);
        assert_eq!(store.find_drink_by_id(latte.id).await?, Some(updated));
        Ok(())
    }

    #[tokio::test]
    async fn missing_drinks_are_reported() {
        let store = MemoryDrinkStore::new();

        assert_eq!(
            store.update_drink(9, UpdateDrink::default()).await,
            Err(StoreError::NotFound(9))
        );
        assert_eq!(store.delete_drink(9).await, Err(StoreError::NotFound(9)));
    }
}
