use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockWriteGuard};
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::Product;
use business::domain::product::repository::ProductRepository;

use super::line_codec::{self, Format};

/// Catalog kept in a line-per-record text file, mirrored in memory.
///
/// Readers share the lock; every mutation holds it exclusively for the whole
/// rewrite. A mutation builds the next snapshot aside, rewrites the file from
/// it, and only then publishes it to the mirror, so a failed write leaves the
/// mirror and the file on the previous snapshot.
pub struct ProductRepositoryFile {
    path: PathBuf,
    mirror: RwLock<Vec<Product>>,
}

impl ProductRepositoryFile {
    /// Loads the mirror from `path`. A missing file is an empty catalog.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let products = load(&path).await?;

        tracing::info!(path = %path.display(), count = products.len(), "loaded product file");

        Ok(Self {
            path,
            mirror: RwLock::new(products),
        })
    }

    async fn commit(
        &self,
        mirror: &mut RwLockWriteGuard<'_, Vec<Product>>,
        next: Vec<Product>,
    ) -> Result<(), RepositoryError> {
        write_snapshot(&self.path, &next).await?;
        **mirror = next;
        Ok(())
    }
}

async fn load(path: &Path) -> Result<Vec<Product>, RepositoryError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to read product file");
            return Err(RepositoryError::Persistence);
        }
    };

    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .peekable();
    let format = Format::detect(lines.peek().map(|(_, line)| *line));
    if format == Format::Escaped {
        lines.next();
    }

    let mut products: Vec<Product> = Vec::new();
    for (index, line) in lines {
        match line_codec::decode(line, format) {
            Some(product) if products.iter().any(|p| p.id == product.id) => {
                tracing::warn!(line = index + 1, id = %product.id, "skipping duplicate product id");
            }
            Some(product) => products.push(product),
            None => tracing::warn!(line = index + 1, "skipping malformed product line"),
        }
    }

    tracing::debug!(path = %path.display(), ?format, "decoded product file");
    Ok(products)
}

/// Writes the whole snapshot to a sibling temp file and renames it over the target.
async fn write_snapshot(path: &Path, products: &[Product]) -> Result<(), RepositoryError> {
    let mut content = String::from(line_codec::HEADER);
    content.push('\n');
    for product in products {
        content.push_str(&line_codec::encode(product));
        content.push('\n');
    }

    let staging = staging_path(path);
    let io_error = |e: std::io::Error| {
        tracing::error!(path = %path.display(), error = %e, "failed to rewrite product file");
        RepositoryError::Persistence
    };

    tokio::fs::write(&staging, content).await.map_err(io_error)?;
    if let Err(e) = tokio::fs::rename(&staging, path).await {
        if let Err(cleanup) = tokio::fs::remove_file(&staging).await {
            tracing::warn!(path = %staging.display(), error = %cleanup, "failed to remove staging file");
        }
        return Err(io_error(e));
    }

    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[async_trait]
impl ProductRepository for ProductRepositoryFile {
    async fn insert(&self, product: &Product) -> Result<Uuid, RepositoryError> {
        let mut mirror = self.mirror.write().await;

        if mirror.iter().any(|p| p.id == product.id) {
            return Err(RepositoryError::Duplicated);
        }

        let mut next = mirror.clone();
        next.push(product.clone());
        self.commit(&mut mirror, next).await?;

        Ok(product.id)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let mirror = self.mirror.read().await;
        Ok(mirror.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, product: &Product) -> Result<bool, RepositoryError> {
        let mut mirror = self.mirror.write().await;

        let Some(index) = mirror.iter().position(|p| p.id == product.id) else {
            return Ok(false);
        };

        let mut next = mirror.clone();
        next[index] = product.clone();
        self.commit(&mut mirror, next).await?;

        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut mirror = self.mirror.write().await;

        let Some(index) = mirror.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        let mut next = mirror.clone();
        next.remove(index);
        self.commit(&mut mirror, next).await?;

        Ok(true)
    }

    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.mirror.read().await.clone())
    }
}
