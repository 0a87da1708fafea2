use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

/// Both filters are optional; an empty `name` counts as no name filter.
pub struct SearchProductParams {
    pub name: Option<String>,
    pub price: Option<BigDecimal>,
}

#[async_trait]
pub trait SearchProductUseCase: Send + Sync {
    async fn execute(&self, params: SearchProductParams) -> Result<Option<Product>, ProductError>;
}
