use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};
use uuid::Uuid;

use business::domain::product::errors::ProductError;
use business::domain::product::model::Product;
use business::domain::product::use_cases::add::{AddProductParams, AddProductUseCase};
use business::domain::product::use_cases::edit::{EditProductParams, EditProductUseCase};
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::list::ListProductsUseCase;
use business::domain::product::use_cases::remove::{RemoveProductParams, RemoveProductUseCase};
use business::domain::product::use_cases::search::{SearchProductParams, SearchProductUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::product::dto::{ProductRequest, ProductResponse, price_from_f64};
use crate::api::tags::ApiTags;

const INVALID_ID: &str = "product.invalid_id";
const INVALID_PRICE: &str = "product.invalid_price";
const NOT_FOUND: &str = "product.not_found";

pub struct ProductApi {
    add_use_case: Arc<dyn AddProductUseCase>,
    list_use_case: Arc<dyn ListProductsUseCase>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    search_use_case: Arc<dyn SearchProductUseCase>,
    edit_use_case: Arc<dyn EditProductUseCase>,
    remove_use_case: Arc<dyn RemoveProductUseCase>,
}

impl ProductApi {
    pub fn new(
        add_use_case: Arc<dyn AddProductUseCase>,
        list_use_case: Arc<dyn ListProductsUseCase>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
        search_use_case: Arc<dyn SearchProductUseCase>,
        edit_use_case: Arc<dyn EditProductUseCase>,
        remove_use_case: Arc<dyn RemoveProductUseCase>,
    ) -> Self {
        Self {
            add_use_case,
            list_use_case,
            get_by_id_use_case,
            search_use_case,
            edit_use_case,
            remove_use_case,
        }
    }
}

/// Product catalog API
///
/// Endpoints for adding, reading, searching, editing and removing products.
#[OpenApi]
impl ProductApi {
    /// Add a product
    ///
    /// The server assigns a fresh id when none is given or the given one is taken.
    #[oai(path = "/api/products", method = "post", tag = "ApiTags::Products")]
    async fn add_product(&self, body: Json<Option<ProductRequest>>) -> AddProductResponse {
        let product = match body.0.map(ProductRequest::into_draft) {
            Some(None) => {
                return AddProductResponse::BadRequest(ErrorResponse::validation(INVALID_PRICE));
            }
            other => other.flatten(),
        };

        match self
            .add_use_case
            .execute(AddProductParams { product })
            .await
            .and_then(ProductResponse::try_from)
        {
            Ok(product) => AddProductResponse::Created(Json(product)),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => AddProductResponse::BadRequest(json),
                    _ => AddProductResponse::InternalError(json),
                }
            }
        }
    }

    /// List all products
    #[oai(path = "/api/products", method = "get", tag = "ApiTags::Products")]
    async fn list_products(&self) -> ListProductsResponse {
        let responses = self.list_use_case.execute().await.and_then(|products| {
            products
                .into_iter()
                .map(ProductResponse::try_from)
                .collect::<Result<Vec<_>, _>>()
        });

        match responses {
            Ok(responses) => ListProductsResponse::Ok(Json(responses)),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                ListProductsResponse::InternalError(json)
            }
        }
    }

    /// Search for a product
    ///
    /// Returns the first product whose name contains `name` (case-insensitive)
    /// and whose price equals `price`. Both filters are optional.
    #[oai(path = "/api/products/search", method = "get", tag = "ApiTags::Products")]
    async fn search_product(
        &self,
        name: Query<Option<String>>,
        price: Query<Option<f64>>,
    ) -> SearchProductResponse {
        let price = match price.0.map(price_from_f64) {
            Some(None) => {
                return SearchProductResponse::BadRequest(ErrorResponse::validation(
                    INVALID_PRICE,
                ));
            }
            other => other.flatten(),
        };

        match self
            .search_use_case
            .execute(SearchProductParams {
                name: name.0,
                price,
            })
            .await
            .and_then(into_response)
        {
            Ok(Some(product)) => SearchProductResponse::Ok(Json(product)),
            Ok(None) => SearchProductResponse::NotFound(ErrorResponse::not_found(NOT_FOUND)),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                SearchProductResponse::InternalError(json)
            }
        }
    }

    /// Get a product by ID
    #[oai(path = "/api/products/:id", method = "get", tag = "ApiTags::Products")]
    async fn get_product_by_id(&self, id: Path<String>) -> GetProductByIdResponse {
        let Ok(uuid) = Uuid::parse_str(&id.0) else {
            return GetProductByIdResponse::BadRequest(ErrorResponse::validation(INVALID_ID));
        };

        match self
            .get_by_id_use_case
            .execute(GetProductByIdParams { id: uuid })
            .await
            .and_then(into_response)
        {
            Ok(Some(product)) => GetProductByIdResponse::Ok(Json(product)),
            Ok(None) => GetProductByIdResponse::NotFound(ErrorResponse::not_found(NOT_FOUND)),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetProductByIdResponse::InternalError(json)
            }
        }
    }

    /// Edit a product
    ///
    /// Overwrites name, definition, price and image of the product whose id is
    /// given in the body.
    #[oai(path = "/api/products", method = "put", tag = "ApiTags::Products")]
    async fn edit_product(&self, body: Json<Option<ProductRequest>>) -> EditProductResponse {
        let product = match body.0.map(ProductRequest::into_draft) {
            Some(None) => {
                return EditProductResponse::BadRequest(ErrorResponse::validation(INVALID_PRICE));
            }
            other => other.flatten(),
        };

        match self
            .edit_use_case
            .execute(EditProductParams { product })
            .await
            .and_then(into_response)
        {
            Ok(Some(product)) => EditProductResponse::Ok(Json(product)),
            Ok(None) => EditProductResponse::NotFound(ErrorResponse::not_found(NOT_FOUND)),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => EditProductResponse::BadRequest(json),
                    _ => EditProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Remove a product
    ///
    /// Returns the record as it was before removal.
    #[oai(path = "/api/products/:id", method = "delete", tag = "ApiTags::Products")]
    async fn remove_product(&self, id: Path<String>) -> RemoveProductResponse {
        let Ok(uuid) = Uuid::parse_str(&id.0) else {
            return RemoveProductResponse::BadRequest(ErrorResponse::validation(INVALID_ID));
        };

        match self
            .remove_use_case
            .execute(RemoveProductParams { id: uuid })
            .await
            .and_then(into_response)
        {
            Ok(Some(product)) => RemoveProductResponse::Ok(Json(product)),
            Ok(None) => RemoveProductResponse::NotFound(ErrorResponse::not_found(NOT_FOUND)),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                RemoveProductResponse::InternalError(json)
            }
        }
    }
}

fn into_response(found: Option<Product>) -> Result<Option<ProductResponse>, ProductError> {
    found.map(ProductResponse::try_from).transpose()
}

#[derive(poem_openapi::ApiResponse)]
pub enum AddProductResponse {
    #[oai(status = 201)]
    Created(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ListProductsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<ProductResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum SearchProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetProductByIdResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum EditProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum RemoveProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
