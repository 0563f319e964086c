use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message),
        }
    }
}

/// Reply body of the public AJAX form endpoints.
///
/// Failures are answered with HTTP 400 and a single human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormResponse {
    pub success: bool,
    pub message: String,
}

impl FormResponse {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl IntoResponse for FormResponse {
    fn into_response(self) -> axum::response::Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        Self {
            items,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        }
    }

    pub fn map<U: Serialize>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        0
    } else {
        total.div_ceil(per_page)
    }
}

/// `?page=` as sent by a browser: kept as a raw string so that garbage input
/// falls back to the first page instead of rejecting the request.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PaginationQuery {
    pub page: Option<String>,
}

impl PaginationQuery {
    /// Resolve the requested page against the result size.
    ///
    /// Non-numeric → 1; below 1 or past the end → last page.
    pub fn resolve(&self, total: u64, per_page: u64) -> u64 {
        let last = total_pages(total, per_page).max(1);
        match self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
        {
            None => 1,
            Some(p) if p < 1 => last,
            Some(p) => (p as u64).min(last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>) -> PaginationQuery {
        PaginationQuery {
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn total_pages_basic() {
        let resp = PaginatedResponse::<String>::new(vec![], 99, 1, 9);
        assert_eq!(resp.total_pages, 11);
    }

    #[test]
    fn total_pages_with_remainder() {
        let resp = PaginatedResponse::<String>::new(vec![], 10, 1, 9);
        assert_eq!(resp.total_pages, 2);
    }

    #[test]
    fn total_pages_zero_per_page() {
        let resp = PaginatedResponse::<String>::new(vec![], 10, 1, 0);
        assert_eq!(resp.total_pages, 0);
    }

    #[test]
    fn total_pages_zero_total() {
        let resp = PaginatedResponse::<String>::new(vec![], 0, 1, 9);
        assert_eq!(resp.total_pages, 0);
    }

    #[test]
    fn missing_page_is_first() {
        assert_eq!(query(None).resolve(30, 9), 1);
    }

    #[test]
    fn garbage_page_is_first() {
        assert_eq!(query(Some("abc")).resolve(30, 9), 1);
        assert_eq!(query(Some("")).resolve(30, 9), 1);
    }

    #[test]
    fn page_below_one_is_last() {
        assert_eq!(query(Some("0")).resolve(30, 9), 4);
        assert_eq!(query(Some("-2")).resolve(30, 9), 4);
        assert_eq!(query(Some("0")).resolve(0, 9), 1);
    }

    #[test]
    fn page_past_end_is_clamped() {
        assert_eq!(query(Some("99")).resolve(30, 9), 4);
    }

    #[test]
    fn empty_result_stays_on_first_page() {
        assert_eq!(query(Some("5")).resolve(0, 9), 1);
    }

    #[test]
    fn form_response_status() {
        assert_eq!(
            FormResponse::accepted("ok").into_response().status(),
            StatusCode::OK
        );
        assert_eq!(
            FormResponse::rejected("no").into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
