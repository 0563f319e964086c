//! Admin endpoints for articles and their paragraph/image bodies.

use crate::{
    error::{AppError, AppResult},
    middleware::AdminUser,
    models::{ArticleImageModel, ArticleModel, ArticleParagraphModel},
    response::{ApiResponse, PaginatedResponse, PaginationQuery},
    services::{
        article::{ArticleDraft, ArticleService},
        article_content::{ArticleContentService, ImageDraft, ParagraphDraft},
    },
};
use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Extension, Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ArticleListQuery {
    /// Only published (`true`) or only drafts (`false`)
    pub published: Option<bool>,
    pub page: Option<String>,
}

/// An article with its stored paragraphs and images, for editing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleWithContent {
    #[serde(flatten)]
    pub article: ArticleModel,
    pub paragraphs: Vec<ArticleParagraphModel>,
    pub images: Vec<ArticleImageModel>,
}

#[utoipa::path(
    get,
    path = "/admin/articles",
    security(("admin_token" = [])),
    params(ArticleListQuery),
    responses(
        (status = 200, description = "Articles, newest first", body = PaginatedResponse<ArticleModel>),
        (status = 401, description = "Missing or wrong admin token", body = AppError),
    ),
    tag = "admin"
)]
pub async fn list_articles(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Query(query): Query<ArticleListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = PaginationQuery { page: query.page };
    let articles = ArticleService::new(db)
        .admin_list(query.published, &page)
        .await?;
    Ok(ApiResponse::ok(articles))
}

#[utoipa::path(
    get,
    path = "/admin/articles/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article with its body", body = ArticleWithContent),
        (status = 404, description = "Article not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn get_article(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let article = ArticleService::new(db.clone()).get_by_id(id).await?;
    let content = ArticleContentService::new(db);
    let paragraphs = content.paragraphs(article.id).await?;
    let images = content.images(article.id).await?;
    Ok(ApiResponse::ok(ArticleWithContent {
        article,
        paragraphs,
        images,
    }))
}

#[utoipa::path(
    post,
    path = "/admin/articles",
    security(("admin_token" = [])),
    request_body = ArticleDraft,
    responses(
        (status = 200, description = "Article created", body = ArticleModel),
        (status = 400, description = "Validation error", body = AppError),
        (status = 409, description = "Slug already in use", body = AppError),
    ),
    tag = "admin"
)]
pub async fn create_article(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Json(req): Json<ArticleDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let article = ArticleService::new(db).create(req).await?;
    Ok(ApiResponse::ok(article))
}

#[utoipa::path(
    put,
    path = "/admin/articles/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Article ID")),
    request_body = ArticleDraft,
    responses(
        (status = 200, description = "Article updated", body = ArticleModel),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "Article not found", body = AppError),
        (status = 409, description = "Slug already in use", body = AppError),
    ),
    tag = "admin"
)]
pub async fn update_article(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(req): Json<ArticleDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let article = ArticleService::new(db).update(id, req).await?;
    Ok(ApiResponse::ok(article))
}

#[utoipa::path(
    delete,
    path = "/admin/articles/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article and its body deleted"),
        (status = 404, description = "Article not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn delete_article(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    ArticleService::new(db).delete(id).await?;
    Ok(ApiResponse::ok(serde_json::json!({ "deleted": true })))
}

// Paragraphs

#[utoipa::path(
    post,
    path = "/admin/articles/{id}/paragraphs",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Article ID")),
    request_body = ParagraphDraft,
    responses(
        (status = 200, description = "Paragraph added", body = ArticleParagraphModel),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "Article not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn add_paragraph(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(article_id): Path<i32>,
    Json(req): Json<ParagraphDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let paragraph = ArticleContentService::new(db)
        .add_paragraph(article_id, req)
        .await?;
    Ok(ApiResponse::ok(paragraph))
}

#[utoipa::path(
    put,
    path = "/admin/paragraphs/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Paragraph ID")),
    request_body = ParagraphDraft,
    responses(
        (status = 200, description = "Paragraph updated", body = ArticleParagraphModel),
        (status = 404, description = "Paragraph not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn update_paragraph(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(req): Json<ParagraphDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let paragraph = ArticleContentService::new(db)
        .update_paragraph(id, req)
        .await?;
    Ok(ApiResponse::ok(paragraph))
}

#[utoipa::path(
    delete,
    path = "/admin/paragraphs/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Paragraph ID")),
    responses(
        (status = 200, description = "Paragraph deleted"),
        (status = 404, description = "Paragraph not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn delete_paragraph(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    ArticleContentService::new(db).delete_paragraph(id).await?;
    Ok(ApiResponse::ok(serde_json::json!({ "deleted": true })))
}

// Images

#[utoipa::path(
    post,
    path = "/admin/articles/{id}/images",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Article ID")),
    request_body = ImageDraft,
    responses(
        (status = 200, description = "Image added", body = ArticleImageModel),
        (status = 400, description = "Anchor paragraph belongs to another article", body = AppError),
        (status = 404, description = "Article not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn add_image(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(article_id): Path<i32>,
    Json(req): Json<ImageDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let image = ArticleContentService::new(db)
        .add_image(article_id, req)
        .await?;
    Ok(ApiResponse::ok(image))
}

#[utoipa::path(
    put,
    path = "/admin/images/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Image ID")),
    request_body = ImageDraft,
    responses(
        (status = 200, description = "Image updated", body = ArticleImageModel),
        (status = 404, description = "Image not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn update_image(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(req): Json<ImageDraft>,
) -> AppResult<impl IntoResponse> {
    req.validate()?;
    let image = ArticleContentService::new(db).update_image(id, req).await?;
    Ok(ApiResponse::ok(image))
}

#[utoipa::path(
    delete,
    path = "/admin/images/{id}",
    security(("admin_token" = [])),
    params(("id" = i32, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Image deleted"),
        (status = 404, description = "Image not found", body = AppError),
    ),
    tag = "admin"
)]
pub async fn delete_image(
    Extension(db): Extension<DatabaseConnection>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    ArticleContentService::new(db).delete_image(id).await?;
    Ok(ApiResponse::ok(serde_json::json!({ "deleted": true })))
}
