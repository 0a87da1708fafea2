use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

pub struct RemoveProductParams {
    pub id: Uuid,
}

#[async_trait]
pub trait RemoveProductUseCase: Send + Sync {
    async fn execute(&self, params: RemoveProductParams) -> Result<Option<Product>, ProductError>;
}
