use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::remove::{RemoveProductParams, RemoveProductUseCase};

pub struct RemoveProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveProductUseCase for RemoveProductUseCaseImpl {
    async fn execute(&self, params: RemoveProductParams) -> Result<Option<Product>, ProductError> {
        self.logger
            .info(&format!("Removing product: {}", params.id));

        let Some(product) = self.repository.get_by_id(params.id).await? else {
            self.logger
                .debug(&format!("Product not found: {}", params.id));
            return Ok(None);
        };

        if !self.repository.delete(params.id).await? {
            self.logger
                .warn(&format!("Product disappeared before delete: {}", params.id));
            return Ok(None);
        }

        self.logger.info(&format!("Product removed: {}", params.id));
        Ok(Some(product))
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
    async fn should_return_removed_product_when_exists() {
        let product_id = Uuid::new_v4();
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_get_by_id().returning(|id| {
            Ok(Some(Product::from_repository(
                id,
                "Product 1".to_string(),
                None,
                BigDecimal::from(100),
                None,
            )))
        });
        mock_repo
            .expect_delete()
            .withf(move |id| *id == product_id)
            .times(1)
            .returning(|_| Ok(true));

        let use_case = RemoveProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let removed = use_case
            .execute(RemoveProductParams { id: product_id })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(removed.id, product_id);
        assert_eq!(removed.name, "Product 1");
    }

    #[tokio::test]
    async fn should_return_none_when_product_not_found() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_delete().never();

        let use_case = RemoveProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(RemoveProductParams { id: Uuid::new_v4() })
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_propagate_storage_failure_on_delete() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_get_by_id().returning(|id| {
            Ok(Some(Product::from_repository(
                id,
                "Product 1".to_string(),
                None,
                BigDecimal::from(1),
                None,
            )))
        });
        mock_repo
            .expect_delete()
            .returning(|_| Err(RepositoryError::Persistence));

        let use_case = RemoveProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(RemoveProductParams { id: Uuid::new_v4() })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::Repository(RepositoryError::Persistence)
        ));
    }
}
