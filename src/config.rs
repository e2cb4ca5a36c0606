use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `product.json` and `user.json`.
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>()?,
            Err(_) => 8080,
        };
        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("Data"));
        Ok(Self {
            host,
            port,
            data_dir,
        })
    }

    pub fn product_file(&self) -> PathBuf {
        self.data_dir.join("product.json")
    }

    pub fn user_file(&self) -> PathBuf {
        self.data_dir.join("user.json")
    }
}
