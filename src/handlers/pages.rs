//! Public site pages, served as JSON page contexts.

use crate::{
    error::AppResult,
    handlers::views::{
        ArticleCard, ArticleDetailView, CardMaker, CategoryView, PageBuilder, PageContext,
    },
    i18n::{localized, Language},
    middleware::CurrentLanguage,
    models::cookie_policy,
    response::{PaginatedResponse, PaginationQuery},
    services::{
        article::ArticleService, article_content::ArticleContentService, cache::CacheService,
        category::CategoryService, settings::SettingsService,
    },
    utils::render_markdown,
};
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const HOME_CATEGORY_LIMIT: usize = 4;
const CATEGORY_PREVIEW_LIMIT: u64 = 3;

const PLACEHOLDER_POLICY_TR: &str = "Çerez politikası içeriği henüz eklenmemiş.";
const PLACEHOLDER_POLICY_EN: &str = "Cookie policy content not yet added.";

pub(crate) fn category_service(db: &DatabaseConnection, cache: Option<CacheService>) -> CategoryService {
    let service = CategoryService::new(db.clone());
    match cache {
        Some(c) => service.with_cache(c),
        None => service,
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    pub featured_articles: Vec<ArticleCard>,
    pub categories: Vec<CategoryView>,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Home page context", body = HomePage)),
    tag = "pages"
)]
pub async fn home(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    CurrentLanguage(lang): CurrentLanguage,
) -> AppResult<Json<PageContext<HomePage>>> {
    let cache = cache.map(|c| c.0);
    let cards = CardMaker::load(&db, cache.clone(), lang).await?;
    let featured = ArticleService::new(db.clone()).featured().await?;
    let categories = category_service(&db, cache).list().await?;

    let content = HomePage {
        featured_articles: cards.cards(&featured),
        categories: categories
            .iter()
            .take(HOME_CATEGORY_LIMIT)
            .map(CategoryView::from)
            .collect(),
    };

    let page = PageBuilder::new(db, lang)
        .with_seo()
        .build(localized(lang, "Ana Sayfa", "Home"), "", content)
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlogListPage {
    pub articles: PaginatedResponse<ArticleCard>,
}

#[utoipa::path(
    get,
    path = "/blog/",
    params(("page" = Option<String>, Query, description = "Page number, clamped into range")),
    responses((status = 200, description = "Published articles, newest first", body = BlogListPage)),
    tag = "pages"
)]
pub async fn blog_list(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    CurrentLanguage(lang): CurrentLanguage,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<PageContext<BlogListPage>>> {
    let cards = CardMaker::load(&db, cache.map(|c| c.0), lang).await?;
    let articles = ArticleService::new(db.clone())
        .list_published(&query)
        .await?
        .map(|a| cards.card(&a));

    let page = PageBuilder::new(db, lang)
        .build(
            localized(lang, "Tüm Yazılar - EdebAi", "All Articles - EdebAi"),
            localized(
                lang,
                "Yapay zeka, prompt engineering ve dijital üretkenlik üzerine tüm makalelerimiz.",
                "All our articles on artificial intelligence, prompt engineering and digital productivity.",
            ),
            BlogListPage { articles },
        )
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryWithArticles {
    pub category: CategoryView,
    pub articles: Vec<ArticleCard>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryListPage {
    pub categories: Vec<CategoryWithArticles>,
}

#[utoipa::path(
    get,
    path = "/kategoriler/",
    responses((status = 200, description = "Every category with its latest articles", body = CategoryListPage)),
    tag = "pages"
)]
pub async fn category_list(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    CurrentLanguage(lang): CurrentLanguage,
) -> AppResult<Json<PageContext<CategoryListPage>>> {
    let cache = cache.map(|c| c.0);
    let cards = CardMaker::load(&db, cache.clone(), lang).await?;
    let articles = ArticleService::new(db.clone());

    let mut categories = Vec::new();
    for category in category_service(&db, cache).list().await? {
        let recent = articles
            .recent_in_category(category.id, CATEGORY_PREVIEW_LIMIT)
            .await?;
        categories.push(CategoryWithArticles {
            category: CategoryView::from(&category),
            articles: cards.cards(&recent),
        });
    }

    let page = PageBuilder::new(db, lang)
        .build(
            localized(lang, "Kategoriler - EdebAi", "Categories - EdebAi"),
            localized(
                lang,
                "Yapay zeka, prompt engineering, dijital üretkenlik ve etik AI kategorilerindeki makaleler.",
                "Articles on artificial intelligence, prompt engineering, digital productivity and ethical AI.",
            ),
            CategoryListPage { categories },
        )
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDetailPage {
    pub category: CategoryView,
    pub articles: PaginatedResponse<ArticleCard>,
}

#[utoipa::path(
    get,
    path = "/kategori/{slug}/",
    params(
        ("slug" = String, Path, description = "Category slug"),
        ("page" = Option<String>, Query, description = "Page number, clamped into range"),
    ),
    responses(
        (status = 200, description = "Category with its published articles", body = CategoryDetailPage),
        (status = 404, description = "Unknown category", body = crate::error::AppError),
    ),
    tag = "pages"
)]
pub async fn category_detail(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    CurrentLanguage(lang): CurrentLanguage,
    Path(slug): Path<String>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<PageContext<CategoryDetailPage>>> {
    let cache = cache.map(|c| c.0);
    let category = category_service(&db, cache.clone())
        .get_by_slug(&slug)
        .await?;
    let cards = CardMaker::load(&db, cache, lang).await?;
    let articles = ArticleService::new(db.clone())
        .list_published_in_category(category.id, &query)
        .await?
        .map(|a| cards.card(&a));

    let meta_description = if category.description.trim().is_empty() {
        match lang {
            Language::Tr => format!("{} kategorisindeki tüm makaleler.", category.name),
            Language::En => format!("All articles in the {} category.", category.name),
        }
    } else {
        category.description.clone()
    };

    let page = PageBuilder::new(db, lang)
        .build(
            format!("{} - EdebAi", category.name),
            meta_description,
            CategoryDetailPage {
                category: CategoryView::from(&category),
                articles,
            },
        )
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticlePage {
    pub article: ArticleDetailView,
    pub related_articles: Vec<ArticleCard>,
}

#[utoipa::path(
    get,
    path = "/makale/{slug}/",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Published article with its body", body = ArticlePage),
        (status = 404, description = "Unknown or unpublished article", body = crate::error::AppError),
    ),
    tag = "pages"
)]
pub async fn article_detail(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    CurrentLanguage(lang): CurrentLanguage,
    Path(slug): Path<String>,
) -> AppResult<Json<PageContext<ArticlePage>>> {
    let service = ArticleService::new(db.clone());
    let mut article = service.get_published_by_slug(&slug).await?;
    article.view_count = service.record_view(article.id).await?;

    let content = ArticleContentService::new(db.clone())
        .content(article.id)
        .await?;
    let related = service.related(&article).await?;
    let cards = CardMaker::load(&db, cache.map(|c| c.0), lang).await?;

    let page_title = article.meta_title_in(lang).to_string();
    let page_title = if page_title.is_empty() {
        article.title_in(lang).to_string()
    } else {
        page_title
    };
    let meta_description = article.meta_description_in(lang).to_string();

    let page = PageBuilder::new(db, lang)
        .build(
            page_title,
            meta_description,
            ArticlePage {
                article: ArticleDetailView::new(&article, &content, &cards, lang),
                related_articles: cards.cards(&related),
            },
        )
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchPage {
    pub query: String,
    /// `null` when no query was given
    pub results: Option<PaginatedResponse<ArticleCard>>,
}

#[utoipa::path(
    get,
    path = "/ara/",
    params(
        ("q" = Option<String>, Query, description = "Search text"),
        ("page" = Option<String>, Query, description = "Page number, clamped into range"),
    ),
    responses((status = 200, description = "Search results", body = SearchPage)),
    tag = "pages"
)]
pub async fn search(
    Extension(db): Extension<DatabaseConnection>,
    cache: Option<Extension<CacheService>>,
    CurrentLanguage(lang): CurrentLanguage,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<PageContext<SearchPage>>> {
    let query = params.q.trim().to_string();
    let page_query = PaginationQuery { page: params.page };

    let results = match ArticleService::new(db.clone())
        .search(&query, &page_query)
        .await?
    {
        Some(found) => {
            let cards = CardMaker::load(&db, cache.map(|c| c.0), lang).await?;
            Some(found.map(|a| cards.card(&a)))
        }
        None => None,
    };

    let (page_title, meta_description) = match (query.is_empty(), lang) {
        (true, Language::Tr) => (
            "Arama - EdebAi".to_string(),
            "EdebAi'de arama yapın.".to_string(),
        ),
        (true, Language::En) => (
            "Search - EdebAi".to_string(),
            "Search EdebAi.".to_string(),
        ),
        (false, Language::Tr) => (
            format!("Arama: {}", query),
            format!("{} ile ilgili arama sonuçları.", query),
        ),
        (false, Language::En) => (
            format!("Search: {}", query),
            format!("Search results for {}.", query),
        ),
    };

    let page = PageBuilder::new(db, lang)
        .with_seo()
        .build(page_title, meta_description, SearchPage { query, results })
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaticPage {
    pub page: String,
}

#[utoipa::path(
    get,
    path = "/hakkinda/",
    responses((status = 200, description = "About page context", body = StaticPage)),
    tag = "pages"
)]
pub async fn about(
    Extension(db): Extension<DatabaseConnection>,
    CurrentLanguage(lang): CurrentLanguage,
) -> AppResult<Json<PageContext<StaticPage>>> {
    let page = PageBuilder::new(db, lang)
        .build(
            localized(lang, "Hakkında - EdebAi", "About - EdebAi"),
            localized(
                lang,
                "EdebAi, yapay zeka ve edebiyatın buluştuğu noktada kaliteli içerikler üreten bir platformdur.",
                "EdebAi is a platform producing quality content where artificial intelligence meets literature.",
            ),
            StaticPage {
                page: "about".to_string(),
            },
        )
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/iletisim/",
    responses((status = 200, description = "Contact page context", body = StaticPage)),
    tag = "pages"
)]
pub async fn contact(
    Extension(db): Extension<DatabaseConnection>,
    CurrentLanguage(lang): CurrentLanguage,
) -> AppResult<Json<PageContext<StaticPage>>> {
    let page = PageBuilder::new(db, lang)
        .build(
            localized(lang, "İletişim - EdebAi", "Contact - EdebAi"),
            localized(
                lang,
                "EdebAi ile iletişime geçin. Sorularınız, önerileriniz ve iş birliği teklifleriniz için bize ulaşın.",
                "Get in touch with EdebAi for questions, suggestions and collaboration offers.",
            ),
            StaticPage {
                page: "contact".to_string(),
            },
        )
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CookiePolicyView {
    pub title: String,
    pub content: String,
    pub content_html: String,
    /// `YYYY-MM-DD`; absent for the placeholder
    pub last_updated: Option<String>,
    /// True when no policy has been published yet
    pub is_placeholder: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CookiePolicyPage {
    pub policy: CookiePolicyView,
}

#[utoipa::path(
    get,
    path = "/cerez-politikasi/",
    responses((status = 200, description = "Active cookie policy or a placeholder", body = CookiePolicyPage)),
    tag = "pages"
)]
pub async fn cookie_policy(
    Extension(db): Extension<DatabaseConnection>,
    CurrentLanguage(lang): CurrentLanguage,
) -> AppResult<Json<PageContext<CookiePolicyPage>>> {
    let active = SettingsService::new(db.clone())
        .active_cookie_policy()
        .await?;

    let (policy, meta_description) = match active {
        Some(policy) => {
            let content = policy.content_in(lang).to_string();
            let view = CookiePolicyView {
                title: policy.title_in(lang).to_string(),
                content_html: render_markdown(&content),
                content,
                last_updated: Some(policy.last_updated.format("%Y-%m-%d").to_string()),
                is_placeholder: false,
            };
            (view, policy.meta_description_in(lang).to_string())
        }
        None => {
            let content = localized(lang, PLACEHOLDER_POLICY_TR, PLACEHOLDER_POLICY_EN).to_string();
            let view = CookiePolicyView {
                title: localized(
                    lang,
                    cookie_policy::DEFAULT_TITLE_TR,
                    cookie_policy::DEFAULT_TITLE_EN,
                )
                .to_string(),
                content_html: render_markdown(&content),
                content,
                last_updated: None,
                is_placeholder: true,
            };
            (view, String::new())
        }
    };

    let meta_description = if meta_description.is_empty() {
        localized(lang, "EdebAi çerez politikası", "EdebAi cookie policy").to_string()
    } else {
        meta_description
    };

    let page = PageBuilder::new(db, lang)
        .with_seo()
        .build(policy.title.clone(), meta_description, CookiePolicyPage { policy })
        .await?;
    Ok(Json(page))
}
