use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::Product;
use business::domain::product::repository::ProductRepository;

use super::entity::{ProductEntity, price_to_real};
use crate::db::{DatabaseConfig, DatabaseError, create_sqlite_pool};

const CREATE_TABLE_QUERY: &str = r#"
    CREATE TABLE IF NOT EXISTS Products (
        Id TEXT PRIMARY KEY,
        Name TEXT NOT NULL,
        Definition TEXT,
        Price REAL NOT NULL,
        Image TEXT
    )"#;

const CREATE_INDEX_QUERY: &str = "CREATE INDEX IF NOT EXISTS IX_Products_Id ON Products(Id)";

const SELECT_COLUMNS: &str = "SELECT Id, Name, Definition, Price, Image FROM Products";

/// Whether the store is responsible for closing its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOwnership {
    /// Opened by the store; closed by `close`.
    Owned,
    /// Supplied by the caller, who keeps closing it.
    Borrowed,
}

pub struct ProductRepositorySqlite {
    pool: SqlitePool,
    ownership: ConnectionOwnership,
}

impl ProductRepositorySqlite {
    /// Opens a pool from `config` and takes ownership of it.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = create_sqlite_pool(config).await?;
        Self::with_pool(pool, ConnectionOwnership::Owned).await
    }

    /// Wraps an existing pool. The schema is created if missing.
    pub async fn with_pool(
        pool: SqlitePool,
        ownership: ConnectionOwnership,
    ) -> Result<Self, DatabaseError> {
        let repository = Self { pool, ownership };

        if let Err(e) = repository.initialize().await {
            repository.close().await;
            return Err(e);
        }

        Ok(repository)
    }

    /// Creates the table and its id index. Safe to run on every open.
    pub async fn initialize(&self) -> Result<(), DatabaseError> {
        for statement in [CREATE_TABLE_QUERY, CREATE_INDEX_QUERY] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "failed to initialize products table");
                    DatabaseError::InitializationError
                })?;
        }
        Ok(())
    }

    /// Closes the pool if this store owns it; a borrowed pool is left open.
    pub async fn close(&self) {
        if self.ownership == ConnectionOwnership::Owned {
            tracing::debug!("closing owned sqlite pool");
            self.pool.close().await;
        }
    }

    pub fn ownership(&self) -> ConnectionOwnership {
        self.ownership
    }
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        tracing::warn!(operation, "duplicate product id");
        return RepositoryError::Duplicated;
    }

    tracing::error!(operation, error = %err, "sqlite query failed");
    RepositoryError::DatabaseError
}

fn bind_price(product: &Product) -> Result<f64, RepositoryError> {
    price_to_real(&product.price).ok_or_else(|| {
        tracing::error!(id = %product.id, price = %product.price, "price does not fit a REAL column");
        RepositoryError::Persistence
    })
}

#[async_trait]
impl ProductRepository for ProductRepositorySqlite {
    async fn insert(&self, product: &Product) -> Result<Uuid, RepositoryError> {
        sqlx::query(
            "INSERT INTO Products (Id, Name, Definition, Price, Image) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(product.id.to_string())
        .bind(&product.name)
        .bind(&product.definition)
        .bind(bind_price(product)?)
        .bind(&product.image)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(product.id)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(&format!("{SELECT_COLUMNS} WHERE Id = ?1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_by_id", e))?;

        entity.map(ProductEntity::into_domain).transpose()
    }

    async fn update(&self, product: &Product) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE Products SET Name = ?2, Definition = ?3, Price = ?4, Image = ?5 WHERE Id = ?1",
        )
        .bind(product.id.to_string())
        .bind(&product.name)
        .bind(&product.definition)
        .bind(bind_price(product)?)
        .bind(&product.image)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM Products WHERE Id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_all", e))?;

        entities.into_iter().map(ProductEntity::into_domain).collect()
    }
}
