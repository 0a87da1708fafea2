use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use business::domain::product::repository::ProductRepository;
use persistence::db::DatabaseConfig;
use persistence::product::file_repository::ProductRepositoryFile;
use persistence::product::repository::ProductRepositorySqlite;

const DEFAULT_DATABASE_URL: &str = "sqlite://catalog.db?mode=rwc";
const DEFAULT_FILE_PATH: &str = "products.txt";

#[derive(Debug, thiserror::Error)]
pub enum StorageConfigError {
    #[error("config.unknown_storage_backend: {0}")]
    UnknownBackend(String),
}

/// Which store backs the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Sqlite { url: String },
    FlatFile { path: PathBuf },
}

impl StorageBackend {
    /// Environment variables:
    /// - STORAGE_BACKEND: "sqlite" (default) or "file"
    /// - DATABASE_URL: SQLite connection string (default: "sqlite://catalog.db?mode=rwc")
    /// - CATALOG_FILE_PATH: flat file location (default: "products.txt")
    pub fn from_env() -> Result<Self, StorageConfigError> {
        Self::from_values(
            env::var("STORAGE_BACKEND").ok(),
            env::var("DATABASE_URL").ok(),
            env::var("CATALOG_FILE_PATH").ok(),
        )
    }

    fn from_values(
        backend: Option<String>,
        database_url: Option<String>,
        file_path: Option<String>,
    ) -> Result<Self, StorageConfigError> {
        match backend.as_deref().map(str::trim).unwrap_or("sqlite") {
            "sqlite" => Ok(Self::Sqlite {
                url: database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            }),
            "file" => Ok(Self::FlatFile {
                path: PathBuf::from(file_path.unwrap_or_else(|| DEFAULT_FILE_PATH.to_string())),
            }),
            other => Err(StorageConfigError::UnknownBackend(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqlite { .. } => "sqlite",
            Self::FlatFile { .. } => "file",
        }
    }
}

/// The opened store, kept by concrete type so it can be shut down.
pub enum Storage {
    Relational(Arc<ProductRepositorySqlite>),
    FlatFile(Arc<ProductRepositoryFile>),
}

impl Storage {
    pub fn repository(&self) -> Arc<dyn ProductRepository> {
        match self {
            Self::Relational(repository) => repository.clone(),
            Self::FlatFile(repository) => repository.clone(),
        }
    }

    /// Releases the durable medium. The flat file holds no open handle.
    pub async fn shutdown(&self) {
        if let Self::Relational(repository) = self {
            repository.close().await;
        }
    }
}

/// Opens the configured store
///
/// # Errors
/// Returns error if the database cannot be opened or the file cannot be read
pub async fn init_storage(backend: &StorageBackend) -> anyhow::Result<Storage> {
    let storage = match backend {
        StorageBackend::Sqlite { url } => {
            let repository = ProductRepositorySqlite::open(&DatabaseConfig::new(url.clone())).await?;
            Storage::Relational(Arc::new(repository))
        }
        StorageBackend::FlatFile { path } => {
            let repository = ProductRepositoryFile::open(path.clone()).await?;
            Storage::FlatFile(Arc::new(repository))
        }
    };

    tracing::info!(backend = backend.name(), "catalog storage ready");
    Ok(storage)
}
