use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};

use super::page::{HtmlError, HtmlResult, display_name, render, render_with_status};
use crate::{
    auth::CurrentUser,
    db::entities::recipe,
    error::AppError,
    services::{
        ServiceContext,
        recipe_service::{IngredientColumns, RecipeDetail},
    },
    state::AppState,
};

const COOKBOOK_PATH: &str = "/cookbook";
const UNITS: [&str; 6] = ["g", "ml", "oz", "tsp", "tbsp", "cup"];

/// A recipe submission. Ingredient fields arrive as repeated keys
/// (`ingredient_quantity[]` etc.), so the body is read as raw pairs.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecipeForm {
    pub name: String,
    pub directions: String,
    pub ingredients: IngredientColumns,
}

impl RecipeForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.trim_end_matches("[]") {
                "recipe_name" => form.name = value,
                "directions" => form.directions = value,
                "ingredient_quantity" => form.ingredients.quantities.push(value),
                "ingredient_unit" => form.ingredients.units.push(value),
                "ingredient_name" => form.ingredients.names.push(value),
                _ => {}
            }
        }
        form
    }
}

#[derive(Template)]
#[template(path = "cookbook.html")]
struct CookbookTemplate {
    username: Option<String>,
    recipes: Vec<recipe::Model>,
    units: &'static [&'static str],
    error: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(COOKBOOK_PATH, get(cookbook).post(create_recipe))
        .route("/recipes/{id}", get(recipe_detail))
        .route("/recipes/{id}/delete", post(delete_recipe))
        .with_state(state)
}

async fn cookbook_page(
    state: &AppState,
    username: Option<String>,
    error: Option<String>,
) -> Result<CookbookTemplate, HtmlError> {
    let recipes = ServiceContext::from_state(state)
        .recipe()
        .list_recipes()
        .await?;
    Ok(CookbookTemplate {
        username,
        recipes,
        units: &UNITS,
        error,
    })
}

async fn cookbook(State(state): State<Arc<AppState>>, user: Option<CurrentUser>) -> HtmlResult {
    let page = cookbook_page(state.as_ref(), display_name(user.as_ref()), None).await?;
    Ok(render(&page)?.into_response())
}

async fn create_recipe(
    State(state): State<Arc<AppState>>,
    user: Option<CurrentUser>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> HtmlResult {
    let form = RecipeForm::from_pairs(pairs);
    let created = ServiceContext::from_state(state.as_ref())
        .recipe()
        .create_recipe(&form.name, &form.directions, form.ingredients)
        .await;

    match created {
        Ok(_) => Ok(Redirect::to(COOKBOOK_PATH).into_response()),
        Err(err @ AppError::Unprocessable(_)) => {
            let page = cookbook_page(
                state.as_ref(),
                display_name(user.as_ref()),
                Some(err.message().to_string()),
            )
            .await?;
            render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &page)
        }
        Err(err) => Err(HtmlError::from(err)),
    }
}

async fn recipe_detail(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<RecipeDetail>, AppError> {
    let detail = ServiceContext::from_state(state.as_ref())
        .recipe()
        .recipe_detail(id)
        .await?;
    Ok(Json(detail))
}

async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Redirect, HtmlError> {
    ServiceContext::from_state(state.as_ref())
        .recipe()
        .delete_recipe(id)
        .await?;
    Ok(Redirect::to(COOKBOOK_PATH))
}
