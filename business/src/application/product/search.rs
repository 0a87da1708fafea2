use std::sync::Arc;

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::search::{SearchProductParams, SearchProductUseCase};

pub struct SearchProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SearchProductUseCase for SearchProductUseCaseImpl {
    async fn execute(&self, params: SearchProductParams) -> Result<Option<Product>, ProductError> {
        self.logger.info(&format!(
            "Searching product: name={:?} price={:?}",
            params.name,
            params.price.as_ref().map(|p| p.to_string())
        ));

        let needle = params
            .name
            .filter(|name| !name.is_empty())
            .map(|name| name.to_lowercase());

        let found = self
            .repository
            .list_all()
            .await?
            .into_iter()
            .find(|product| matches(product, needle.as_deref(), params.price.as_ref()));

        Ok(found)
    }
}

/// Case-insensitive name containment AND exact price equality; a missing
/// filter always matches.
fn matches(product: &Product, needle: Option<&str>, price: Option<&BigDecimal>) -> bool {
    let name_ok = needle.is_none_or(|n| product.name.to_lowercase().contains(n));
    let price_ok = price.is_none_or(|p| product.price == *p);
    name_ok && price_ok
}
