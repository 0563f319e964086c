use crate::{
    config::site::SiteConfig,
    error::AppResult,
    services::sitemap::{render_sitemap, robots_txt, SitemapService},
};
use axum::{http::header, response::IntoResponse, Extension};
use sea_orm::DatabaseConnection;

#[utoipa::path(
    get,
    path = "/robots.txt",
    responses((status = 200, description = "Crawler rules", body = String, content_type = "text/plain")),
    tag = "seo"
)]
pub async fn robots(Extension(site): Extension<SiteConfig>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&site.base_url),
    )
}

#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses((status = 200, description = "Sitemap of all indexable pages", body = String, content_type = "application/xml")),
    tag = "seo"
)]
pub async fn sitemap(
    Extension(db): Extension<DatabaseConnection>,
    Extension(site): Extension<SiteConfig>,
) -> AppResult<impl IntoResponse> {
    let items = SitemapService::new(db).items(&site.base_url).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&items),
    ))
}
