use crate::config::AppConfig;
use crate::models::AppData;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(config: AppConfig, data: AppData) -> Self {
        Self {
            config: Arc::new(config),
            data: Arc::new(Mutex::new(data)),
        }
    }
}
