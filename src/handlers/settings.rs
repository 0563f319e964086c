//! Admin endpoints for the site-wide singleton records: homepage SEO,
//! cookie banner and cookie policy. Saving a record as active deactivates
//! every other record of the same kind.

use crate::{
    error::{AppError, AppResult},
    middleware::AdminUser,
    models::{CookieConsentModel, CookiePolicyModel, HomepageSeoModel},
    response::ApiResponse,
    services::settings::{CookieConsentDraft, CookiePolicyDraft, HomepageSeoDraft, SettingsService},
};
use axum::{extract::Path, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use validator::Validate;

// Homepage SEO record

#[utoipa::path(
    get,
    path = "/admin/homepage-seo",
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Every stored homepage SEO record", body = Vec<HomepageSeoModel>),
        (status = 401, description = "Missing or wrong admin token", body = AppError),
    ),
    tag = "admin"
)]
pub async fn list_homepage_seo(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
) -> AppResult<impl IntoResponse> {
    let records = SettingsService::new(db).list_homepage_seo().await?;
    Ok(ApiResponse::ok(records))
}

#[utoipa::path(
    post,
    path = "/admin/homepage-seo",
    security(("admin_token" = [])),
    request_body = HomepageSeoDraft,
    responses(
        (status = 200, description = "Homepage SEO record created", body = HomepageSeoModel),
        (status = 400, description = "Validation error", body = AppError),
    ),
    tag = "admin"
)]
pub async fn create_homepage_seo(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Json(req): Json<HomepageSeoDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let record = SettingsService::new(db).create_homepage_seo(req).await?;
    Ok(ApiResponse::ok(record))
}

#[utoipa::path(
    put,
    path = "/admin/homepage-seo/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Record ID")),
    request_body = HomepageSeoDraft,
    responses(
        (status = 200, description = "Homepage SEO record updated", body = HomepageSeoModel),
        (status = 404, description = "Record not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn update_homepage_seo(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(req): Json<HomepageSeoDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let record = SettingsService::new(db).update_homepage_seo(id, req).await?;
    Ok(ApiResponse::ok(record))
}

#[utoipa::path(
    delete,
    path = "/admin/homepage-seo/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Homepage SEO record deleted"),
        (status = 404, description = "Record not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn delete_homepage_seo(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    SettingsService::new(db).delete_homepage_seo(id).await?;
    Ok(ApiResponse::ok(serde_json::json!({ "deleted": true })))
}

// Cookie banner

#[utoipa::path(
    get,
    path = "/admin/cookie-consents",
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Every stored cookie banner", body = Vec<CookieConsentModel>),
        (status = 401, description = "Missing or wrong admin token", body = AppError),
    ),
    tag = "admin"
)]
pub async fn list_cookie_consents(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
) -> AppResult<impl IntoResponse> {
    let records = SettingsService::new(db).list_cookie_consents().await?;
    Ok(ApiResponse::ok(records))
}

#[utoipa::path(
    post,
    path = "/admin/cookie-consents",
    security(("admin_token" = [])),
    request_body = CookieConsentDraft,
    responses(
        (status = 200, description = "Cookie banner created", body = CookieConsentModel),
        (status = 400, description = "Validation error", body = AppError),
    ),
    tag = "admin"
)]
pub async fn create_cookie_consent(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Json(req): Json<CookieConsentDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let record = SettingsService::new(db).create_cookie_consent(req).await?;
    Ok(ApiResponse::ok(record))
}

#[utoipa::path(
    put,
    path = "/admin/cookie-consents/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Record ID")),
    request_body = CookieConsentDraft,
    responses(
        (status = 200, description = "Cookie banner updated", body = CookieConsentModel),
        (status = 404, description = "Record not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn update_cookie_consent(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(req): Json<CookieConsentDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let record = SettingsService::new(db).update_cookie_consent(id, req).await?;
    Ok(ApiResponse::ok(record))
}

#[utoipa::path(
    delete,
    path = "/admin/cookie-consents/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Cookie banner deleted"),
        (status = 404, description = "Record not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn delete_cookie_consent(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    SettingsService::new(db).delete_cookie_consent(id).await?;
    Ok(ApiResponse::ok(serde_json::json!({ "deleted": true })))
}

// Cookie policy

#[utoipa::path(
    get,
    path = "/admin/cookie-policies",
    security(("admin_token" = [])),
    responses(
        (status = 200, description = "Every stored cookie policy", body = Vec<CookiePolicyModel>),
        (status = 401, description = "Missing or wrong admin token", body = AppError),
    ),
    tag = "admin"
)]
pub async fn list_cookie_policies(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
) -> AppResult<impl IntoResponse> {
    let records = SettingsService::new(db).list_cookie_policies().await?;
    Ok(ApiResponse::ok(records))
}

#[utoipa::path(
    post,
    path = "/admin/cookie-policies",
    security(("admin_token" = [])),
    request_body = CookiePolicyDraft,
    responses(
        (status = 200, description = "Cookie policy created", body = CookiePolicyModel),
        (status = 400, description = "Validation error", body = AppError),
    ),
    tag = "admin"
)]
pub async fn create_cookie_policy(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Json(req): Json<CookiePolicyDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let record = SettingsService::new(db).create_cookie_policy(req).await?;
    Ok(ApiResponse::ok(record))
}

#[utoipa::path(
    put,
    path = "/admin/cookie-policies/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Record ID")),
    request_body = CookiePolicyDraft,
    responses(
        (status = 200, description = "Cookie policy updated", body = CookiePolicyModel),
        (status = 404, description = "Record not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn update_cookie_policy(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(req): Json<CookiePolicyDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let record = SettingsService::new(db).update_cookie_policy(id, req).await?;
    Ok(ApiResponse::ok(record))
}

#[utoipa::path(
    delete,
    path = "/admin/cookie-policies/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Cookie policy deleted"),
        (status = 404, description = "Record not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn delete_cookie_policy(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    SettingsService::new(db).delete_cookie_policy(id).await?;
    Ok(ApiResponse::ok(serde_json::json!({ "deleted": true })))
}
