use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::add::{AddProductParams, AddProductUseCase};

pub struct AddProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddProductUseCase for AddProductUseCaseImpl {
    async fn execute(&self, params: AddProductParams) -> Result<Product, ProductError> {
        let draft = params.product.ok_or(ProductError::ProductMissing)?;

        self.logger.info(&format!("Adding product: {}", draft.name));

        let mut product = Product::new(draft)?;

        // A missing or already taken id is replaced rather than rejected.
        if product.id.is_nil() {
            product.id = Uuid::new_v4();
        } else if self.repository.get_by_id(product.id).await?.is_some() {
            self.logger.warn(&format!(
                "Product id {} already exists, assigning a new one",
                product.id
            ));
            product.id = Uuid::new_v4();
        }

        // The id can still be claimed between the lookup and the insert.
        product.id = match self.repository.insert(&product).await {
            Err(RepositoryError::Duplicated) => {
                self.logger.warn(&format!(
                    "Product id {} was taken concurrently, assigning a new one",
                    product.id
                ));
                product.id = Uuid::new_v4();
                self.repository.insert(&product).await?
            }
            result => result?,
        };

        self.logger
            .info(&format!("Product added with id: {}", product.id));
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::model::ProductDraft;
    use bigdecimal::BigDecimal;
    use mockall::mock;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::str::FromStr;
    use std::sync::Mutex;

    mock! {
        pub ProductRepo {}

        #[async_trait]
        impl ProductRepository for ProductRepo {
            async fn insert(&self, product: &Product) -> Result<Uuid, RepositoryError>;
            async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError>;
            async fn update(&self, product: &Product) -> Result<bool, RepositoryError>;
            async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
            async fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn draft(id: Option<Uuid>, name: &str, price: &str) -> ProductDraft {
        ProductDraft {
            id,
            name: name.to_string(),
            definition: Some("A sturdy widget".to_string()),
            price: BigDecimal::from_str(price).unwrap(),
            image: None,
        }
    }

    #[tokio::test]
    async fn should_add_product_with_generated_id_when_none_supplied() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_get_by_id().never();
        mock_repo
            .expect_insert()
            .withf(|p| !p.id.is_nil() && p.name == "Widget")
            .times(1)
            .returning(|p| Ok(p.id));

        let use_case = AddProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let product = use_case
            .execute(AddProductParams {
                product: Some(draft(None, "Widget", "9.99")),
            })
            .await
            .unwrap();

        assert!(!product.id.is_nil());
        assert_eq!(product.name, "Widget");
        assert_eq!(product.definition.as_deref(), Some("A sturdy widget"));
        assert_eq!(product.price, BigDecimal::from_str("9.99").unwrap());
    }

    #[tokio::test]
    async fn should_keep_caller_id_when_it_is_free() {
        let caller_id = Uuid::new_v4();
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_insert().returning(|p| Ok(p.id));

        let use_case = AddProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let product = use_case
            .execute(AddProductParams {
                product: Some(draft(Some(caller_id), "Widget", "1")),
            })
            .await
            .unwrap();

        assert_eq!(product.id, caller_id);
    }

    #[tokio::test]
    async fn should_replace_caller_id_when_it_already_exists() {
        let taken_id = Uuid::new_v4();
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_get_by_id().returning(move |id| {
            Ok(Some(Product::from_repository(
                id,
                "Existing".to_string(),
                None,
                BigDecimal::from(3),
                None,
            )))
        });
        mock_repo
            .expect_insert()
            .withf(move |p| p.id != taken_id && !p.id.is_nil())
            .times(1)
            .returning(|p| Ok(p.id));

        let use_case = AddProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let product = use_case
            .execute(AddProductParams {
                product: Some(draft(Some(taken_id), "Widget", "1")),
            })
            .await
            .unwrap();

        assert_ne!(product.id, taken_id);
    }

    #[tokio::test]
    async fn should_retry_with_new_id_when_insert_reports_duplicate() {
        let caller_id = Uuid::new_v4();
        let attempts: Arc<Mutex<Vec<Uuid>>> = Arc::new(Mutex::new(Vec::new()));
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        let seen = attempts.clone();
        mock_repo.expect_insert().times(2).returning(move |p| {
            let mut seen = seen.lock().unwrap();
            seen.push(p.id);
            if seen.len() == 1 {
                Err(RepositoryError::Duplicated)
            } else {
                Ok(p.id)
            }
        });

        let use_case = AddProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let product = use_case
            .execute(AddProductParams {
                product: Some(draft(Some(caller_id), "Widget", "1")),
            })
            .await
            .unwrap();

        let attempts = attempts.lock().unwrap();
        assert_eq!(attempts[0], caller_id);
        assert_ne!(attempts[1], caller_id);
        assert_eq!(product.id, attempts[1]);
    }

    #[tokio::test]
    async fn should_reject_missing_product() {
        let mock_repo = MockProductRepo::new();

        let use_case = AddProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(AddProductParams { product: None }).await;

        assert!(matches!(result.unwrap_err(), ProductError::ProductMissing));
    }

    #[tokio::test]
    async fn should_reject_product_when_name_is_empty() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_insert().never();

        let use_case = AddProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(AddProductParams {
                product: Some(draft(None, "", "10")),
            })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NameEmpty));
    }

    #[tokio::test]
    async fn should_reject_product_when_price_is_zero() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_insert().never();

        let use_case = AddProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(AddProductParams {
                product: Some(draft(None, "x", "0")),
            })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::PriceNotPositive));
    }

    #[tokio::test]
    async fn should_propagate_storage_failure() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_insert()
            .returning(|_| Err(RepositoryError::DatabaseError));

        let use_case = AddProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(AddProductParams {
                product: Some(draft(None, "Widget", "2")),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::Repository(RepositoryError::DatabaseError)
        ));
    }

    proptest! {
        #[test]
        fn should_assign_distinct_ids_even_for_identical_caller_ids(count in 2usize..12) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let shared_id = Uuid::new_v4();
            let stored: Arc<Mutex<HashSet<Uuid>>> = Arc::new(Mutex::new(HashSet::new()));

            let mut mock_repo = MockProductRepo::new();
            let lookup = stored.clone();
            mock_repo.expect_get_by_id().returning(move |id| {
                Ok(lookup.lock().unwrap().contains(&id).then(|| {
                    Product::from_repository(id, "Stored".to_string(), None, BigDecimal::from(1), None)
                }))
            });
            let sink = stored.clone();
            mock_repo.expect_insert().returning(move |p| {
                sink.lock().unwrap().insert(p.id);
                Ok(p.id)
            });

            let use_case = AddProductUseCaseImpl {
                repository: Arc::new(mock_repo),
                logger: mock_logger(),
            };

            let mut ids = HashSet::new();
            for _ in 0..count {
                let product = runtime
                    .block_on(use_case.execute(AddProductParams {
                        product: Some(draft(Some(shared_id), "Widget", "5")),
                    }))
                    .unwrap();
                ids.insert(product.id);
            }

            prop_assert_eq!(ids.len(), count);
            prop_assert!(ids.contains(&shared_id));
        }
    }
}
