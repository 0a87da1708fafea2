use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::product::errors::ProductError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ProductError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match self {
            ProductError::ProductMissing
            | ProductError::NameEmpty
            | ProductError::PriceNotPositive => {
                (StatusCode::BAD_REQUEST, ErrorResponse::validation(&self.to_string()))
            }
            ProductError::Repository(inner) => {
                tracing::error!(error = %inner, "catalog storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        name: "InternalError".to_string(),
                        message: inner.to_string(),
                    }),
                )
            }
        }
    }
}
