use axum::{
    Json,
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use rollcall_db::Listing;
use serde::Serialize;

pub static TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// A JSON array body with the unpaginated match count in `X-Total-Count`.
#[derive(Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> From<Listing<T>> for Paginated<T> {
    fn from(listing: Listing<T>) -> Self {
        Self {
            items: listing.items,
            total: listing.total,
        }
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.items).into_response();
        response
            .headers_mut()
            .insert(TOTAL_COUNT_HEADER.clone(), HeaderValue::from(self.total));
        response
    }
}
