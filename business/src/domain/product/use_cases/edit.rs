use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{Product, ProductDraft};

pub struct EditProductParams {
    pub product: Option<ProductDraft>,
}

#[async_trait]
pub trait EditProductUseCase: Send + Sync {
    async fn execute(&self, params: EditProductParams) -> Result<Option<Product>, ProductError>;
}
