#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product.missing")]
    ProductMissing,
    #[error("product.name_empty")]
    NameEmpty,
    #[error("product.price_not_positive")]
    PriceNotPositive,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}

