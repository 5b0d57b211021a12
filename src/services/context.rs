use sea_orm::DatabaseConnection;

use crate::{
    auth::jwt::SessionKeys,
    config::{AuthConfig, WeatherConfig},
    db::dao::DaoContext,
    services::{
        auth_service::AuthService, recipe_service::RecipeService, task_service::TaskService,
        user_service::UserService, weather_service::WeatherService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn user(&self) -> UserService {
        UserService::new(self.daos.user())
    }

    pub fn task(&self) -> TaskService {
        TaskService::new(self.daos.task())
    }

    pub fn recipe(&self) -> RecipeService {
        RecipeService::new(self.daos.recipe())
    }

    pub fn auth<'a>(&self, keys: &'a SessionKeys, cfg: &'a AuthConfig) -> AuthService<'a> {
        AuthService::new(self.user(), self.daos.session(), keys, cfg)
    }

    pub fn weather<'a>(&self, client: &'a reqwest::Client, cfg: &'a WeatherConfig) -> WeatherService<'a> {
        WeatherService::new(client, cfg)
    }
}
