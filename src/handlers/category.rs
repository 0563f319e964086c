use crate::{
    error::{AppError, AppResult},
    middleware::AdminUser,
    models::CategoryModel,
    response::ApiResponse,
    services::{
        cache::CacheService,
        category::{CategoryDraft, CategoryService, CategorySummary},
    },
};
use super::pages::category_service;
use axum::{extract::Path, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/admin/categories",
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Categories with published article counts", body = Vec<CategorySummary>),
        (status = 401, description = "Missing or wrong admin token", body = AppError),
    ),
    tag = "admin"
)]
pub async fn list_categories(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryService::new(db).list_with_counts().await?;
    Ok(ApiResponse::ok(categories))
}

#[utoipa::path(
    get,
    path = "/admin/categories/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = CategoryModel),
        (status = 404, description = "Category not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn get_category(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryService::new(db).get_by_id(id).await?;
    Ok(ApiResponse::ok(category))
}

#[utoipa::path(
    post,
    path = "/admin/categories",
    security(("admin_token" = [])),
    request_body = CategoryDraft,
    responses(
        (status = 200, description = "Category created", body = CategoryModel),
        (status = 400, description = "Validation error", body = AppError),
        (status = 409, description = "Slug already in use", body = AppError),
    ),
    tag = "admin"
)]
pub async fn create_category(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    _admin: AdminUser,
    Json(req): Json<CategoryDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let category = category_service(&db, cache.map(|c| c.0)).create(req).await?;
    Ok(ApiResponse::ok(category))
}

#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryDraft,
    responses(
        (status = 200, description = "Category updated", body = CategoryModel),
        (status = 404, description = "Category not found", body = AppError),
        (status = 409, description = "Slug already in use", body = AppError),
    ),
    tag = "admin"
)]
pub async fn update_category(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(req): Json<CategoryDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let category = category_service(&db, cache.map(|c| c.0)).update(id, req).await?;
    Ok(ApiResponse::ok(category))
}

/// Articles filed under the category become uncategorised.
#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn delete_category(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    category_service(&db, cache.map(|c| c.0)).delete(id).await?;
    Ok(ApiResponse::ok(serde_json::json!({ "deleted": true })))
}
