//! Shared application state passed to all handlers

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::relay::ImageHostClient;
use pdc_common::config::ImageHostConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub images: Arc<ImageHostClient>,
}

impl AppState {
    pub fn new(pool: SqlitePool, image_host: ImageHostConfig) -> Self {
        Self {
            pool,
            images: Arc::new(ImageHostClient::new(image_host)),
        }
    }
}
