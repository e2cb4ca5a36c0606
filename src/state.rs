use std::sync::Arc;

use crate::config::AppConfig;
use crate::products::repo::ProductRepo;
use crate::users::repo::UserRepo;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub products: Arc<ProductRepo>,
    pub users: Arc<UserRepo>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: AppConfig) -> Self {
        let products = Arc::new(ProductRepo::new(config.product_file()));
        let users = Arc::new(UserRepo::new(config.user_file()));
        Self {
            config: Arc::new(config),
            products,
            users,
        }
    }
}
