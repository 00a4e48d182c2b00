//! Response envelope shared by every handler.
//!
//! Replies always carry `{success, code, message, data}`. List replies nest the
//! pagination block alongside an `items` array inside `data`:
//!
//! ```json
//! {
//!   "success": true,
//!   "code": 200,
//!   "message": "Success fetching pokemons data",
//!   "data": {
//!     "currentPage": 2,
//!     "totalPages": 3,
//!     "totalItems": 12,
//!     "limit": 5,
//!     "hasNextPage": true,
//!     "hasPreviousPage": true,
//!     "items": [...]
//!   }
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::pagination::PaginationState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, data)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, data)
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            success: status.is_success(),
            code: status.as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Pagination block plus the page's items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResponse<T> {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub items: T,
}

impl<T> DataResponse<T> {
    pub fn new(pagination: &PaginationState, items: T) -> Self {
        Self {
            current_page: pagination.page,
            total_pages: pagination.total_pages,
            total_items: pagination.total_items,
            limit: pagination.limit,
            has_next_page: pagination.has_next_page,
            has_previous_page: pagination.has_previous_page,
            items,
        }
    }

    /// Single-object reply shaped like a one-item page.
    pub fn single(item: T) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 1,
            limit: 1,
            has_next_page: false,
            has_previous_page: false,
            items: item,
        }
    }
}
