use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use poem_openapi::Object;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::errors::ProductError;
use business::domain::product::model::{Product, ProductDraft};

#[derive(Debug, Clone, Object)]
pub struct ProductRequest {
    /// Product identifier. Optional on create; required on update.
    #[oai(skip_serializing_if_is_none)]
    pub id: Option<Uuid>,
    /// Product name (cannot be empty on create)
    pub name: String,
    /// Free-text description
    #[oai(skip_serializing_if_is_none)]
    pub definition: Option<String>,
    /// Price (must be greater than zero on create)
    pub price: f64,
    /// Image path or URL
    #[oai(skip_serializing_if_is_none)]
    pub image: Option<String>,
}

impl ProductRequest {
    /// Fails only when the price is not a finite number.
    pub fn into_draft(self) -> Option<ProductDraft> {
        Some(ProductDraft {
            id: self.id,
            name: self.name,
            definition: self.definition,
            price: price_from_f64(self.price)?,
            image: self.image,
        })
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductResponse {
    /// Product unique identifier
    pub id: String,
    /// Product name
    pub name: String,
    /// Free-text description
    #[oai(skip_serializing_if_is_none)]
    pub definition: Option<String>,
    /// Price
    pub price: f64,
    /// Image path or URL
    #[oai(skip_serializing_if_is_none)]
    pub image: Option<String>,
}

impl TryFrom<Product> for ProductResponse {
    type Error = ProductError;

    /// Fails when the stored price has no finite JSON number form.
    fn try_from(product: Product) -> Result<Self, Self::Error> {
        let Some(price) = product.price.to_f64().filter(|p| p.is_finite()) else {
            tracing::error!(id = %product.id, price = %product.price, "price cannot be rendered as a number");
            return Err(ProductError::Repository(RepositoryError::Corrupted));
        };

        Ok(Self {
            id: product.id.to_string(),
            name: product.name,
            definition: product.definition,
            price,
            image: product.image,
        })
    }
}

pub fn price_from_f64(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    BigDecimal::from_str(&value.to_string()).ok()
}
