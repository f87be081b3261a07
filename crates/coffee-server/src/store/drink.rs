//! Drink records and their client-facing representations.

use serde::{Deserialize, Serialize};

/// A single recipe component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name, e.g. `"espresso"`.
    pub name: String,
    /// Display color used by the menu graphic.
    pub color: String,
    /// Relative amount of this ingredient.
    pub parts: u32,
}

/// A drink on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    /// Store-assigned identifier.
    pub id: i32,
    /// Unique drink title.
    pub title: String,
    /// Ordered list of ingredients.
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    /// Public representation: ingredient names are withheld.
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| ShortIngredient {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }

    /// Detailed representation, including ingredient names.
    pub fn long(&self) -> Drink {
        self.clone()
    }
}

/// Recipe component without its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// A drink as shown on the public menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortDrink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Data for a drink that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Partial update of a stored drink. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDrink {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}
