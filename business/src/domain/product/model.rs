use std::hash::{Hash, Hasher};

use bigdecimal::BigDecimal;
use num_traits::Zero;
use uuid::Uuid;

use super::errors::ProductError;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub definition: Option<String>,
    pub price: BigDecimal,
    pub image: Option<String>,
}

/// Caller-supplied product fields, as received by Add and Edit.
///
/// `id` is optional: Add assigns one when it is absent, Edit uses it to find
/// the record to overwrite.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub id: Option<Uuid>,
    pub name: String,
    pub definition: Option<String>,
    pub price: BigDecimal,
    pub image: Option<String>,
}

impl Product {
    /// Builds a product for creation, enforcing the creation invariants.
    ///
    /// The draft id is kept as-is (nil when absent); identifier assignment is
    /// left to the Add use case, which knows what the store already holds.
    pub fn new(draft: ProductDraft) -> Result<Self, ProductError> {
        if draft.name.trim().is_empty() {
            return Err(ProductError::NameEmpty);
        }

        if draft.price <= BigDecimal::zero() {
            return Err(ProductError::PriceNotPositive);
        }

        Ok(Self {
            id: draft.id.unwrap_or_else(Uuid::nil),
            name: draft.name,
            definition: draft.definition,
            price: draft.price,
            image: draft.image,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        name: String,
        definition: Option<String>,
        price: BigDecimal,
        image: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            definition,
            price,
            image,
        }
    }

    /// Overwrites every mutable field from `draft`. The id never changes.
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.definition = draft.definition;
        self.price = draft.price;
        self.image = draft.image;
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
