//! Drink request types.
//!
//! A recipe may be sent either as a list of ingredients or as a single
//! ingredient object, which is treated as a one-element list.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::store::{Ingredient, NewDrink, UpdateDrink as UpdateDrinkModel};

/// A recipe component as sent by clients.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngredientRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(length(min = 1, max = 40))]
    pub color: String,
    #[validate(range(min = 1))]
    pub parts: u32,
}

impl From<IngredientRequest> for Ingredient {
    fn from(request: IngredientRequest) -> Self {
        Self {
            name: request.name,
            color: request.color,
            parts: request.parts,
        }
    }
}

/// Request payload for adding a drink to the menu.
///
/// # Example
///
/// ```json
/// {
///   "title": "latte",
///   "recipe": [
///     {"name": "espresso", "color": "brown", "parts": 1},
///     {"name": "milk", "color": "white", "parts": 3}
///   ]
/// }
/// ```
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDrink {
    /// Unique title (1-80 characters).
    #[validate(length(min = 1, max = 80))]
    pub title: String,

    /// At least one ingredient.
    #[serde(deserialize_with = "one_or_many")]
    #[validate(length(min = 1), nested)]
    pub recipe: Vec<IngredientRequest>,
}

impl CreateDrink {
    /// Converts this request into a [`NewDrink`] for the store.
    #[inline]
    pub fn into_model(self) -> NewDrink {
        NewDrink {
            title: self.title,
            recipe: self.recipe.into_iter().map(Ingredient::from).collect(),
        }
    }
}

/// Request payload for partially updating a drink.
///
/// Absent fields, an empty title and an empty recipe keep their current
/// value.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDrink {
    #[serde(default)]
    #[validate(length(max = 80))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "optional_one_or_many")]
    #[validate(nested)]
    pub recipe: Option<Vec<IngredientRequest>>,
}

impl UpdateDrink {
    /// Converts this request into an update for the store.
    #[inline]
    pub fn into_model(self) -> UpdateDrinkModel {
        UpdateDrinkModel {
            title: self.title.filter(|title| !title.is_empty()),
            recipe: self
                .recipe
                .filter(|recipe| !recipe.is_empty())
                .map(|recipe| recipe.into_iter().map(Ingredient::from).collect()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<IngredientRequest>),
    One(IngredientRequest),
}

impl From<OneOrMany> for Vec<IngredientRequest> {
    fn from(recipe: OneOrMany) -> Self {
        match recipe {
            OneOrMany::Many(ingredients) => ingredients,
            OneOrMany::One(ingredient) => vec![ingredient],
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<IngredientRequest>, D::Error>
where
    D: Deserializer<'de>,
{
    OneOrMany::deserialize(deserializer).map(Into::into)
}

fn optional_one_or_many<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<IngredientRequest>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<OneOrMany>::deserialize(deserializer).map(|recipe| recipe.map(Into::into))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn recipe_accepts_single_ingredient() -> anyhow::Result<()> {
        let request: CreateDrink = serde_json::from_value(json!({
            "title": "water",
            "recipe": {"name": "water", "color": "blue", "parts": 1},
        }))?;

        assert_eq!(request.recipe.len(), 1);
        assert!(request.validate().is_ok());
        Ok(())
    }

    #[test]
    fn create_requires_title_and_recipe() {
        let missing_title = json!({"recipe": []});
        assert!(serde_json::from_value::<CreateDrink>(missing_title).is_err());

        let missing_recipe = json!({"title": "latte"});
        assert!(serde_json::from_value::<CreateDrink>(missing_recipe).is_err());
    }

    #[test]
    fn create_validates_ingredients() -> anyhow::Result<()> {
        let request: CreateDrink = serde_json::from_value(json!({
            "title": "latte",
            "recipe": [
                {"name": "espresso", "color": "brown", "parts": 1},
                {"name": "", "color": "white", "parts": 0},
            ],
        }))?;

        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("recipe"));
        Ok(())
    }

    #[test]
    fn update_fields_are_optional() -> anyhow::Result<()> {
        let request: UpdateDrink = serde_json::from_value(json!({"title": "iced latte"}))?;
        assert!(request.validate().is_ok());

        let model = request.into_model();
        assert_eq!(model.title.as_deref(), Some("iced latte"));
        assert!(model.recipe.is_none());

        let request: UpdateDrink = serde_json::from_value(json!({"recipe": null}))?;
        assert!(request.recipe.is_none());
        Ok(())
    }

    #[test]
    fn empty_update_fields_are_ignored() -> anyhow::Result<()> {
        let request: UpdateDrink = serde_json::from_value(json!({"title": "", "recipe": []}))?;
        assert!(request.validate().is_ok());

        let model = request.into_model();
        assert!(model.title.is_none());
        assert!(model.recipe.is_none());
        Ok(())
    }

    #[test]
    fn update_still_validates_ingredients() -> anyhow::Result<()> {
        let request: UpdateDrink = serde_json::from_value(json!({
            "recipe": {"name": "milk", "color": "white", "parts": 0},
        }))?;

        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("recipe"));
        Ok(())
    }
}
