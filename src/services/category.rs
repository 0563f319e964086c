use crate::{
    error::{AppError, AppResult},
    models::{article, category, Article, Category, CategoryModel},
    services::cache::{CacheService, CATEGORY_LIST_KEY, CATEGORY_LIST_TTL},
    utils::slugify,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_ICON: &str = "📝";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryDraft {
    /// Display name (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// URL slug; derived from the name when blank
    #[serde(default)]
    #[validate(length(max = 100))]
    pub slug: String,
    /// Emoji icon
    #[validate(length(max = 10))]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// A category together with the number of published articles filed under it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategorySummary {
    pub category: CategoryModel,
    pub published_article_count: u64,
}

pub struct CategoryService {
    db: DatabaseConnection,
    cache: Option<CacheService>,
}

impl CategoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, cache: None }
    }

    pub fn with_cache(mut self, cache: CacheService) -> Self {
        self.cache = Some(cache);
        self
    }

    /// All categories in display order (`sort_order`, then name).
    pub async fn list(&self) -> AppResult<Vec<CategoryModel>> {
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get_json::<Vec<CategoryModel>>(CATEGORY_LIST_KEY).await {
                return Ok(cached);
            }
        }

        let categories = Category::find()
            .order_by_asc(category::Column::SortOrder)
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;

        if let Some(cache) = &self.cache {
            cache
                .set_json(CATEGORY_LIST_KEY, &categories, CATEGORY_LIST_TTL)
                .await;
        }

        Ok(categories)
    }

    pub async fn list_with_counts(&self) -> AppResult<Vec<CategorySummary>> {
        let categories = self.list().await?;
        let counts = self.published_counts().await?;

        Ok(categories
            .into_iter()
            .map(|category| CategorySummary {
                published_article_count: counts.get(&category.id).copied().unwrap_or(0),
                category,
            })
            .collect())
    }

    async fn published_counts(&self) -> AppResult<HashMap<i32, u64>> {
        let rows: Vec<(Option<i32>, i64)> = Article::find()
            .select_only()
            .column(article::Column::CategoryId)
            .column_as(Expr::col(article::Column::Id).count(), "article_count")
            .filter(article::Column::IsPublished.eq(true))
            .filter(article::Column::CategoryId.is_not_null())
            .group_by(article::Column::CategoryId)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, count)| id.map(|id| (id, count.max(0) as u64)))
            .collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<CategoryModel> {
        Category::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<CategoryModel> {
        Category::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(&self, draft: CategoryDraft) -> AppResult<CategoryModel> {
        let slug = resolve_slug(&draft)?;
        self.ensure_slug_free(&slug, None).await?;

        let model = category::ActiveModel {
            name: Set(draft.name.trim().to_string()),
            slug: Set(slug),
            icon: Set(draft.icon.unwrap_or_else(|| DEFAULT_ICON.to_string())),
            description: Set(draft.description),
            sort_order: Set(draft.sort_order),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(category_id = model.id, slug = %model.slug, "category created");
        self.invalidate_list_cache().await;
        Ok(model)
    }

    pub async fn update(&self, id: i32, draft: CategoryDraft) -> AppResult<CategoryModel> {
        let existing = self.get_by_id(id).await?;
        let slug = resolve_slug(&draft)?;
        self.ensure_slug_free(&slug, Some(id)).await?;

        let mut active: category::ActiveModel = existing.into();
        active.name = Set(draft.name.trim().to_string());
        active.slug = Set(slug);
        if let Some(icon) = draft.icon {
            active.icon = Set(icon);
        }
        active.description = Set(draft.description);
        active.sort_order = Set(draft.sort_order);

        let updated = active.update(&self.db).await?;
        self.invalidate_list_cache().await;
        Ok(updated)
    }

    /// Delete a category. Its articles stay and become uncategorised.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let existing = self.get_by_id(id).await?;

        // Not every backend enforces the foreign key action, so detach explicitly.
        Article::update_many()
            .col_expr(article::Column::CategoryId, Expr::value(Option::<i32>::None))
            .filter(article::Column::CategoryId.eq(existing.id))
            .exec(&self.db)
            .await?;

        Category::delete_by_id(existing.id).exec(&self.db).await?;
        tracing::info!(category_id = existing.id, "category deleted");
        self.invalidate_list_cache().await;
        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &str, except: Option<i32>) -> AppResult<()> {
        let mut query = Category::find().filter(category::Column::Slug.eq(slug));
        if let Some(id) = except {
            query = query.filter(category::Column::Id.ne(id));
        }
        if query.one(&self.db).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Category slug '{}' is already taken",
                slug
            )));
        }
        Ok(())
    }

    async fn invalidate_list_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate(CATEGORY_LIST_KEY).await;
        }
    }
}

fn resolve_slug(draft: &CategoryDraft) -> AppResult<String> {
    let slug = if draft.slug.trim().is_empty() {
        slugify(&draft.name)
    } else {
        draft.slug.trim().to_string()
    };
    if slug.is_empty() {
        return Err(AppError::Validation(
            "Category name does not produce a usable slug".to_string(),
        ));
    }
    Ok(slug)
}
