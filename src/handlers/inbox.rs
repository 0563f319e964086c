//! Admin views over what visitors sent in: newsletter subscribers and
//! contact messages.

use crate::{
    error::{AppError, AppResult},
    middleware::AdminUser,
    models::{ContactMessageModel, NewsletterSubscriberModel},
    response::{ApiResponse, PaginatedResponse, PaginationQuery},
    services::{contact::ContactService, newsletter::NewsletterService},
};
use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Extension, Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[utoipa::path(
    get,
    path = "/admin/subscribers",
    security(("admin_token" = [])),
    params(("page" = Option<String>, Query, description = "Page number")),
    responses(
        (status = 200, description = "Subscribers, newest first", body = PaginatedResponse<NewsletterSubscriberModel>),
        (status = 401, description = "Missing or wrong admin token", body = AppError),
    ),
    tag = "admin"
)]
pub async fn list_subscribers(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Query(query): Query<PaginationQuery>,
) -> AppResult<impl IntoResponse> {
    let subscribers = NewsletterService::new(db).list(&query).await?;
    Ok(ApiResponse::ok(subscribers))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[utoipa::path(
    put,
    path = "/admin/subscribers/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Subscriber ID")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Subscriber updated", body = NewsletterSubscriberModel),
        (status = 404, description = "Subscriber not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn set_subscriber_active(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(req): Json<SetActiveRequest>,
) -> AppResult<impl IntoResponse> {
    let subscriber = NewsletterService::new(db)
        .set_active(id, req.is_active)
        .await?;
    Ok(ApiResponse::ok(subscriber))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MessageListQuery {
    /// Only messages not yet marked as read
    #[serde(default)]
    pub unread: bool,
    pub page: Option<String>,
}

#[utoipa::path(
    get,
    path = "/admin/messages",
    security(("admin_token" = [])),
    params(MessageListQuery),
    responses(
        (status = 200, description = "Contact messages, newest first", body = PaginatedResponse<ContactMessageModel>),
        (status = 401, description = "Missing or wrong admin token", body = AppError),
    ),
    tag = "admin"
)]
pub async fn list_messages(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Query(query): Query<MessageListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = PaginationQuery { page: query.page };
    let messages = ContactService::new(db).list(query.unread, &page).await?;
    Ok(ApiResponse::ok(messages))
}

#[utoipa::path(
    post,
    path = "/admin/messages/{id}/read",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message marked as read", body = ContactMessageModel),
        (status = 404, description = "Message not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn mark_message_read(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let message = ContactService::new(db).mark_read(id).await?;
    Ok(ApiResponse::ok(message))
}
