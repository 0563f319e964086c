use crate::{
    error::{AppError, AppResult},
    models::{
        article::{self, ArticleLanguage, TwitterCardType},
        Article, ArticleModel, Category,
    },
    response::{PaginatedResponse, PaginationQuery},
    services::paginate,
    utils::{slugify, truncate_chars},
};
use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::{BinOper, Expr, Func, SimpleExpr},
    ActiveModelTrait,
    ActiveValue::Set,
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

pub const PUBLIC_PAGE_SIZE: u64 = 9;
pub const ADMIN_PAGE_SIZE: u64 = 20;
pub const FEATURED_LIMIT: u64 = 3;
pub const RELATED_LIMIT: u64 = 3;

const META_TITLE_MAX: usize = 60;
const OG_TITLE_MAX: usize = 95;
const OG_DESCRIPTION_MAX: usize = 200;

/// Editable fields of an article as sent by the admin API.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ArticleDraft {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub title_en: String,
    /// URL slug; derived from the title when blank
    #[serde(default)]
    #[validate(length(max = 200))]
    pub slug: String,
    pub category_id: Option<i32>,
    #[serde(default)]
    pub language: ArticleLanguage,
    #[validate(length(min = 1, max = 300))]
    pub excerpt: String,
    #[serde(default)]
    #[validate(length(max = 300))]
    pub excerpt_en: String,
    /// Stored path returned by the thumbnail upload endpoint
    #[validate(length(min = 1, max = 255))]
    pub thumbnail: String,
    #[validate(length(min = 1, max = 200))]
    pub thumbnail_alt: String,
    #[validate(length(min = 1, max = 100))]
    pub author_name: String,
    #[serde(default)]
    pub author_bio: String,
    /// Estimated reading time in minutes
    #[serde(default = "default_reading_time")]
    #[validate(range(min = 1))]
    pub reading_time: i32,
    pub published_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub canonical_url: String,
    #[serde(default)]
    pub noindex: bool,
    /// Defaults to the first 60 characters of the title
    #[serde(default)]
    #[validate(length(max = 60))]
    pub meta_title: String,
    #[validate(length(min = 50, max = 160))]
    pub meta_description: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub meta_keywords: String,
    #[serde(default)]
    #[validate(length(max = 95))]
    pub og_title: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub og_description: String,
    pub og_image: Option<String>,
    #[serde(default)]
    pub twitter_card_type: TwitterCardType,
    #[serde(default)]
    #[validate(length(max = 60))]
    pub meta_title_en: String,
    #[serde(default)]
    #[validate(length(max = 160))]
    pub meta_description_en: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub meta_keywords_en: String,
}

fn default_reading_time() -> i32 {
    5
}

impl ArticleDraft {
    /// Fill derived fields the way a save does: slug from the title, SEO
    /// titles and descriptions from title/excerpt, and a publication stamp.
    fn prepare(mut self, now: NaiveDateTime) -> AppResult<Self> {
        self.title = self.title.trim().to_string();

        self.slug = if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            self.slug.trim().to_string()
        };
        if self.slug.is_empty() {
            return Err(AppError::Validation(
                "Title does not produce a usable slug".to_string(),
            ));
        }

        if self.meta_title.trim().is_empty() {
            self.meta_title = truncate_chars(&self.title, META_TITLE_MAX);
        }
        if self.og_title.trim().is_empty() {
            self.og_title = truncate_chars(&self.title, OG_TITLE_MAX);
        }
        if self.og_description.trim().is_empty() {
            self.og_description = truncate_chars(&self.excerpt, OG_DESCRIPTION_MAX);
        }
        if self.is_published && self.published_date.is_none() {
            self.published_date = Some(now);
        }

        Ok(self)
    }

    fn apply(self, active: &mut article::ActiveModel) {
        active.title = Set(self.title);
        active.title_en = Set(self.title_en);
        active.slug = Set(self.slug);
        active.category_id = Set(self.category_id);
        active.language = Set(self.language);
        active.excerpt = Set(self.excerpt);
        active.excerpt_en = Set(self.excerpt_en);
        active.thumbnail = Set(self.thumbnail);
        active.thumbnail_alt = Set(self.thumbnail_alt);
        active.author_name = Set(self.author_name);
        active.author_bio = Set(self.author_bio);
        active.reading_time = Set(self.reading_time);
        active.published_date = Set(self.published_date);
        active.is_published = Set(self.is_published);
        active.is_featured = Set(self.is_featured);
        active.canonical_url = Set(self.canonical_url);
        active.noindex = Set(self.noindex);
        active.meta_title = Set(self.meta_title);
        active.meta_description = Set(self.meta_description);
        active.meta_keywords = Set(self.meta_keywords);
        active.og_title = Set(self.og_title);
        active.og_description = Set(self.og_description);
        active.og_image = Set(self.og_image);
        active.twitter_card_type = Set(self.twitter_card_type);
        active.meta_title_en = Set(self.meta_title_en);
        active.meta_description_en = Set(self.meta_description_en);
        active.meta_keywords_en = Set(self.meta_keywords_en);
    }
}

/// Escape `%`, `_` and the escape character itself so user input matches
/// literally inside a LIKE pattern.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive substring match over the searchable text columns.
/// Both sides are folded by the database's `LOWER` so column and pattern
/// go through the same case mapping.
fn search_condition(query: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(query));
    [
        article::Column::Title,
        article::Column::TitleEn,
        article::Column::Excerpt,
        article::Column::ExcerptEn,
        article::Column::MetaDescription,
    ]
    .into_iter()
    .fold(Condition::any(), |cond, column| {
        cond.add(
            Expr::expr(Func::lower(Expr::col(column)))
                .binary(BinOper::Like, lowered_pattern(&pattern)),
        )
    })
}

/// `LOWER(?) ESCAPE '\'`
fn lowered_pattern(pattern: &str) -> SimpleExpr {
    SimpleExpr::Binary(
        Box::new(Func::lower(Expr::val(pattern)).into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant('\\'.into())),
    )
}

fn published() -> Select<Article> {
    Article::find().filter(article::Column::IsPublished.eq(true))
}

fn newest_first(select: Select<Article>) -> Select<Article> {
    select
        .order_by_desc(article::Column::PublishedDate)
        .order_by_desc(article::Column::CreatedAt)
}

pub struct ArticleService {
    db: DatabaseConnection,
}

impl ArticleService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn featured(&self) -> AppResult<Vec<ArticleModel>> {
        let articles = newest_first(published().filter(article::Column::IsFeatured.eq(true)))
            .limit(FEATURED_LIMIT)
            .all(&self.db)
            .await?;
        Ok(articles)
    }

    pub async fn list_published(
        &self,
        query: &PaginationQuery,
    ) -> AppResult<PaginatedResponse<ArticleModel>> {
        paginate(&self.db, newest_first(published()), PUBLIC_PAGE_SIZE, query).await
    }

    pub async fn list_published_in_category(
        &self,
        category_id: i32,
        query: &PaginationQuery,
    ) -> AppResult<PaginatedResponse<ArticleModel>> {
        let select = published().filter(article::Column::CategoryId.eq(category_id));
        paginate(&self.db, newest_first(select), PUBLIC_PAGE_SIZE, query).await
    }

    pub async fn recent_in_category(
        &self,
        category_id: i32,
        limit: u64,
    ) -> AppResult<Vec<ArticleModel>> {
        let articles =
            newest_first(published().filter(article::Column::CategoryId.eq(category_id)))
                .limit(limit)
                .all(&self.db)
                .await?;
        Ok(articles)
    }

    /// Published, indexable articles for the sitemap.
    pub async fn indexable(&self) -> AppResult<Vec<ArticleModel>> {
        let articles = newest_first(published().filter(article::Column::Noindex.eq(false)))
            .all(&self.db)
            .await?;
        Ok(articles)
    }

    /// Look up a published article. Drafts are indistinguishable from
    /// missing articles.
    pub async fn get_published_by_slug(&self, slug: &str) -> AppResult<ArticleModel> {
        published()
            .filter(article::Column::Slug.eq(slug))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Count one view and return the stored total.
    pub async fn record_view(&self, id: i32) -> AppResult<i32> {
        Article::update_many()
            .col_expr(
                article::Column::ViewCount,
                Expr::col(article::Column::ViewCount).add(1),
            )
            .filter(article::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        let count: Option<i32> = Article::find_by_id(id)
            .select_only()
            .column(article::Column::ViewCount)
            .into_tuple()
            .one(&self.db)
            .await?;
        count.ok_or(AppError::NotFound)
    }

    /// Other published articles from the same category, or other
    /// uncategorised ones when the article has no category.
    pub async fn related(&self, article: &ArticleModel) -> AppResult<Vec<ArticleModel>> {
        let select = published().filter(article::Column::Id.ne(article.id));
        let select = match article.category_id {
            Some(category_id) => select.filter(article::Column::CategoryId.eq(category_id)),
            None => select.filter(article::Column::CategoryId.is_null()),
        };

        let articles = newest_first(select)
            .limit(RELATED_LIMIT)
            .all(&self.db)
            .await?;
        Ok(articles)
    }

    /// Full-text-ish search over published articles. A blank query yields no
    /// result set at all.
    pub async fn search(
        &self,
        raw_query: &str,
        page: &PaginationQuery,
    ) -> AppResult<Option<PaginatedResponse<ArticleModel>>> {
        let query = raw_query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let select = published().filter(search_condition(query));
        let results = paginate(&self.db, newest_first(select), PUBLIC_PAGE_SIZE, page).await?;
        Ok(Some(results))
    }

    pub async fn admin_list(
        &self,
        published_filter: Option<bool>,
        query: &PaginationQuery,
    ) -> AppResult<PaginatedResponse<ArticleModel>> {
        let mut select = Article::find();
        if let Some(is_published) = published_filter {
            select = select.filter(article::Column::IsPublished.eq(is_published));
        }
        let select = select
            .order_by_desc(article::Column::PublishedDate)
            .order_by_desc(article::Column::CreatedAt);
        paginate(&self.db, select, ADMIN_PAGE_SIZE, query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ArticleModel> {
        Article::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(&self, draft: ArticleDraft) -> AppResult<ArticleModel> {
        let now = chrono::Utc::now().naive_utc();
        let draft = draft.prepare(now)?;
        self.ensure_category_exists(draft.category_id).await?;
        self.ensure_slug_free(&draft.slug, None).await?;

        let mut active = article::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            view_count: Set(0),
            ..Default::default()
        };
        draft.apply(&mut active);

        let article = active.insert(&self.db).await?;
        tracing::info!(article_id = article.id, slug = %article.slug, "article created");
        Ok(article)
    }

    pub async fn update(&self, id: i32, draft: ArticleDraft) -> AppResult<ArticleModel> {
        let existing = self.get_by_id(id).await?;
        let now = chrono::Utc::now().naive_utc();
        let draft = draft.prepare(now)?;
        self.ensure_category_exists(draft.category_id).await?;
        self.ensure_slug_free(&draft.slug, Some(id)).await?;

        let mut active: article::ActiveModel = existing.into();
        draft.apply(&mut active);
        active.updated_at = Set(now);

        let article = active.update(&self.db).await?;
        tracing::info!(article_id = article.id, "article updated");
        Ok(article)
    }

    /// Delete an article together with its paragraphs and images.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let existing = self.get_by_id(id).await?;
        crate::services::article_content::ArticleContentService::new(self.db.clone())
            .delete_all_for(existing.id)
            .await?;
        Article::delete_by_id(existing.id).exec(&self.db).await?;
        tracing::info!(article_id = existing.id, "article deleted");
        Ok(())
    }

    async fn ensure_category_exists(&self, category_id: Option<i32>) -> AppResult<()> {
        if let Some(id) = category_id {
            if Category::find_by_id(id).one(&self.db).await?.is_none() {
                return Err(AppError::Validation(format!("Category {} does not exist", id)));
            }
        }
        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &str, except: Option<i32>) -> AppResult<()> {
        let mut query = Article::find().filter(article::Column::Slug.eq(slug));
        if let Some(id) = except {
            query = query.filter(article::Column::Id.ne(id));
        }
        if query.one(&self.db).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Article slug '{}' is already taken",
                slug
            )));
        }
        Ok(())
    }
}
