use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::edit::{EditProductParams, EditProductUseCase};

pub struct EditProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl EditProductUseCase for EditProductUseCaseImpl {
    async fn execute(&self, params: EditProductParams) -> Result<Option<Product>, ProductError> {
        let draft = params.product.ok_or(ProductError::ProductMissing)?;
        let id = draft.id.unwrap_or_else(Uuid::nil);

        self.logger.info(&format!("Editing product: {}", id));

        let Some(mut product) = self.repository.get_by_id(id).await? else {
            self.logger.debug(&format!("Product not found: {}", id));
            return Ok(None);
        };

        product.apply(draft);

        // The record may have been removed between the lookup and the write.
        if !self.repository.update(&product).await? {
            self.logger
                .warn(&format!("Product disappeared before update: {}", id));
            return Ok(None);
        }

        self.logger.info(&format!("Product edited: {}", id));
        Ok(Some(product))
    }
}
