pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod views;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    details_service::DetailsService, dossier_service::DossierService,
    notification_service::NotificationService, user_service::UserService,
};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub user_service: UserService,
    pub dossier_service: DossierService,
    pub details_service: DetailsService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let user_service = UserService::new(pool.clone());
        let dossier_service = DossierService::new(pool.clone());
        let details_service = DetailsService::new(pool.clone());
        let notification_service = NotificationService::new(pool.clone());

        Self {
            pool,
            config: Arc::new(config),
            user_service,
            dossier_service,
            details_service,
            notification_service,
        }
    }
}
