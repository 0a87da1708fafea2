use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::list::ListProductsUseCase;

pub struct ListProductsUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ListProductsUseCase for ListProductsUseCaseImpl {
    async fn execute(&self) -> Result<Vec<Product>, ProductError> {
        self.logger.info("Fetching all products");
        let products = self.repository.list_all().await?;
        self.logger
            .info(&format!("Found {} products", products.len()));
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use bigdecimal::BigDecimal;
    use mockall::mock;
    use uuid::Uuid;

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

    #[tokio::test]
    async fn should_return_every_stored_product() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_list_all().returning(|| {
            Ok(vec![
                Product::from_repository(
                    Uuid::new_v4(),
                    "Product 1".to_string(),
                    None,
                    BigDecimal::from(10),
                    None,
                ),
                Product::from_repository(
                    Uuid::new_v4(),
                    "Product 2".to_string(),
                    None,
                    BigDecimal::from(20),
                    None,
                ),
            ])
        });

        let use_case = ListProductsUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let products = use_case.execute().await.unwrap();

        assert_eq!(products.len(), 2);
        assert!(products.iter().any(|p| p.name == "Product 1"));
        assert!(products.iter().any(|p| p.name == "Product 2"));
    }

    #[tokio::test]
    async fn should_propagate_storage_failure() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_list_all()
            .returning(|| Err(RepositoryError::DatabaseError));

        let use_case = ListProductsUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        assert!(use_case.execute().await.is_err());
    }
}
