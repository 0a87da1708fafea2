use super::{
    cors_config, server_config::ServerConfig,
    storage_config::{StorageBackend, StorageConfigError},
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub storage: StorageBackend,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, StorageConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            storage: StorageBackend::from_env()?,
        })
    }
}
