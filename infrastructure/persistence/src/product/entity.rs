use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::Product;

/// One row of the `Products` table. The id is stored as text and the price as REAL.
#[derive(Debug, FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct ProductEntity {
    pub id: String,
    pub name: String,
    pub definition: Option<String>,
    pub price: f64,
    pub image: Option<String>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Result<Product, RepositoryError> {
        let id = Uuid::parse_str(&self.id).map_err(|_| {
            tracing::error!(id = %self.id, "stored product id is not a uuid");
            RepositoryError::Corrupted
        })?;

        let price = price_from_real(self.price).ok_or_else(|| {
            tracing::error!(%id, price = self.price, "stored product price is not a number");
            RepositoryError::Corrupted
        })?;

        Ok(Product::from_repository(
            id,
            self.name,
            self.definition,
            price,
            self.image,
        ))
    }
}

/// Goes through the shortest decimal rendering of the float, so a price
/// written as 9.99 reads back as exactly 9.99.
pub fn price_from_real(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    BigDecimal::from_str(&value.to_string()).ok()
}

pub fn price_to_real(price: &BigDecimal) -> Option<f64> {
    price.to_f64().filter(|value| value.is_finite())
}
