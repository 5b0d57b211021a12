use serde::Serialize;

use crate::{
    db::dao::{DaoBase, IngredientRow, RecipeDao},
    db::entities::{ingredient, recipe},
    error::AppError,
};

/// The three parallel ingredient columns exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientColumns {
    pub quantities: Vec<String>,
    pub units: Vec<String>,
    pub names: Vec<String>,
}

impl IngredientColumns {
    /// Zips the columns into rows. Columns of unequal length are rejected
    /// rather than truncated.
    pub fn into_rows(self) -> Result<Vec<IngredientRow>, AppError> {
        let Self {
            quantities,
            units,
            names,
        } = self;
        if quantities.len() != units.len() || units.len() != names.len() {
            return Err(AppError::unprocessable(format!(
                "Ingredient fields do not line up: {} quantities, {} units, {} names",
                quantities.len(),
                units.len(),
                names.len()
            )));
        }

        Ok(quantities
            .into_iter()
            .zip(units)
            .zip(names)
            .map(|((quantity, unit), name)| IngredientRow {
                quantity,
                unit,
                name,
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientDetail {
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

impl From<ingredient::Model> for IngredientDetail {
    fn from(model: ingredient::Model) -> Self {
        Self {
            quantity: model.quantity,
            unit: model.unit,
            name: model.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDetail {
    pub name: String,
    pub ingredients: Vec<IngredientDetail>,
    pub directions: String,
}

#[derive(Clone)]
pub struct RecipeService {
    recipe_dao: RecipeDao,
}

impl RecipeService {
    pub fn new(recipe_dao: RecipeDao) -> Self {
        Self { recipe_dao }
    }

    pub async fn list_recipes(&self) -> Result<Vec<recipe::Model>, AppError> {
        Ok(self.recipe_dao.list_recipes().await?)
    }

    /// Returns `Ok(None)` without writing when name or directions are blank,
    /// and `Unprocessable` when the ingredient columns disagree in length.
    pub async fn create_recipe(
        &self,
        name: &str,
        directions: &str,
        ingredients: IngredientColumns,
    ) -> Result<Option<recipe::Model>, AppError> {
        let name = name.trim();
        let directions = directions.trim();
        if name.is_empty() || directions.is_empty() {
            tracing::debug!("ignoring recipe without name or directions");
            return Ok(None);
        }

        let rows = ingredients.into_rows().inspect_err(|err| {
            tracing::warn!(recipe = name, "rejected recipe submission: {err}");
        })?;
        let (recipe, ingredients) = self
            .recipe_dao
            .create_with_ingredients(name, directions, &rows)
            .await?;
        tracing::info!(
            recipe_id = recipe.id,
            ingredients = ingredients.len(),
            "recipe created"
        );
        Ok(Some(recipe))
    }

    pub async fn recipe_detail(&self, recipe_id: i32) -> Result<RecipeDetail, AppError> {
        let recipe = self
            .recipe_dao
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe not found"))?;
        let ingredients = self.recipe_dao.ingredients_for(recipe.id).await?;

        Ok(RecipeDetail {
            name: recipe.name,
            ingredients: ingredients.into_iter().map(IngredientDetail::from).collect(),
            directions: recipe.directions,
        })
    }

    pub async fn delete_recipe(&self, recipe_id: i32) -> Result<bool, AppError> {
        let deleted = self.recipe_dao.delete_with_ingredients(recipe_id).await?;
        if deleted {
            tracing::info!(recipe_id, "recipe deleted");
        }
        Ok(deleted)
    }
}
