use std::sync::Arc;

use logger::TracingLogger;

use business::application::product::add::AddProductUseCaseImpl;
use business::application::product::edit::EditProductUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::list::ListProductsUseCaseImpl;
use business::application::product::remove::RemoveProductUseCaseImpl;
use business::application::product::search::SearchProductUseCaseImpl;
use business::domain::product::repository::ProductRepository;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub product_api: crate::api::product::routes::ProductApi,
}

impl DependencyContainer {
    /// Wires every catalog use case over the same store.
    pub fn new(repository: Arc<dyn ProductRepository>, storage_name: &'static str) -> Self {
        let logger = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new(storage_name);

        let add_use_case = Arc::new(AddProductUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let list_use_case = Arc::new(ListProductsUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let get_by_id_use_case = Arc::new(GetProductByIdUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let search_use_case = Arc::new(SearchProductUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let edit_use_case = Arc::new(EditProductUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let remove_use_case = Arc::new(RemoveProductUseCaseImpl { repository, logger });

        let product_api = crate::api::product::routes::ProductApi::new(
            add_use_case,
            list_use_case,
            get_by_id_use_case,
            search_use_case,
            edit_use_case,
            remove_use_case,
        );

        Self {
            health_api,
            product_api,
        }
    }
}
