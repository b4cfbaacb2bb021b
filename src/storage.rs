use crate::errors::AppError;
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// A missing file is an empty history; an unreadable one is logged and treated the same.
pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!(days = data.days.len(), "loaded health data from {}", path.display());
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, payload).await?;
    Ok(())
}
