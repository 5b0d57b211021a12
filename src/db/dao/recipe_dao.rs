use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::{
    ingredient,
    prelude::{Ingredient, Recipe},
    recipe,
};

/// One ingredient line as submitted, before it has a recipe to belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRow {
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

#[derive(Clone)]
pub struct RecipeDao {
    db: DatabaseConnection,
}

impl DaoBase for RecipeDao {
    type Entity = Recipe;
    const ENTITY_NAME: &'static str = "recipe";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl RecipeDao {
    pub async fn list_recipes(&self) -> DaoResult<Vec<recipe::Model>> {
        self.find_all(|query| query).await
    }

    /// Inserts the recipe, then each ingredient pointing at it, in one
    /// transaction. Ingredients keep the order of `rows`.
    pub async fn create_with_ingredients(
        &self,
        name: &str,
        directions: &str,
        rows: &[IngredientRow],
    ) -> DaoResult<(recipe::Model, Vec<ingredient::Model>)> {
        let now = Utc::now().fixed_offset();
        let txn = self.db.begin().await?;

        let recipe = recipe::ActiveModel {
            name: Set(name.to_string()),
            directions: Set(directions.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut ingredients = Vec::with_capacity(rows.len());
        for row in rows {
            let model = ingredient::ActiveModel {
                quantity: Set(row.quantity.clone()),
                unit: Set(row.unit.clone()),
                name: Set(row.name.clone()),
                recipe_id: Set(recipe.id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            ingredients.push(model);
        }

        txn.commit().await?;
        Ok((recipe, ingredients))
    }

    pub async fn ingredients_for(&self, recipe_id: i32) -> DaoResult<Vec<ingredient::Model>> {
        Ingredient::find()
            .filter(ingredient::Column::RecipeId.eq(recipe_id))
            .order_by_asc(ingredient::Column::Id)
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    /// Removes the recipe and its ingredients together. Returns `false` when
    /// there was no such recipe.
    pub async fn delete_with_ingredients(&self, recipe_id: i32) -> DaoResult<bool> {
        let txn = self.db.begin().await?;

        Ingredient::delete_many()
            .filter(ingredient::Column::RecipeId.eq(recipe_id))
            .exec(&txn)
            .await?;
        let result = Recipe::delete_by_id(recipe_id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        txn.commit().await?;
        Ok(true)
    }
}
