use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{Product, ProductDraft};

pub struct AddProductParams {
    pub product: Option<ProductDraft>,
}

#[async_trait]
pub trait AddProductUseCase: Send + Sync {
    async fn execute(&self, params: AddProductParams) -> Result<Product, ProductError>;
}
