pub mod article;
pub mod article_content;
pub mod cache;
pub mod category;
pub mod contact;
pub mod newsletter;
pub mod settings;
pub mod sitemap;
pub mod upload;

use crate::{
    error::AppResult,
    response::{PaginatedResponse, PaginationQuery},
};
use sea_orm::{DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, Select};
use serde::Serialize;

/// Run `select` one page at a time, clamping the requested page into range.
pub(crate) async fn paginate<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    per_page: u64,
    query: &PaginationQuery,
) -> AppResult<PaginatedResponse<E::Model>>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Serialize + Send + Sync,
{
    let paginator = select.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let page = query.resolve(total, per_page);
    let items = paginator.fetch_page(page - 1).await?;
    Ok(PaginatedResponse::new(items, total, page, per_page))
}
