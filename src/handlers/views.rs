//! Serialized shapes of the public page contexts.

use crate::{
    error::AppResult,
    i18n::Language,
    models::{
        article::{ArticleLanguage, TwitterCardType},
        article_paragraph::ParagraphType,
        ArticleImageModel, ArticleModel, ArticleParagraphModel, CategoryModel, CookieConsentModel,
        HomepageSeoModel,
    },
    services::{
        article_content::ContentItem,
        cache::CacheService,
        category::CategoryService,
        settings::SettingsService,
        sitemap::{article_path, category_path},
        upload::media_url,
    },
    utils::{render_code_block, render_markdown},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

pub const COOKIE_POLICY_PATH: &str = "/cerez-politikasi/";

fn format_datetime(value: chrono::NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Envelope shared by every public page: language, head metadata, the
/// cookie banner, and the page-specific payload flattened alongside.
#[derive(Debug, Serialize)]
pub struct PageContext<T: Serialize> {
    pub language: Language,
    pub page_title: String,
    pub meta_description: String,
    /// Active homepage SEO record (home, search and cookie policy pages)
    pub seo: Option<SeoView>,
    pub cookie_consent: Option<CookieConsentView>,
    #[serde(flatten)]
    pub content: T,
}

/// Builds [`PageContext`]s for one request.
pub struct PageBuilder {
    db: DatabaseConnection,
    pub lang: Language,
    with_seo: bool,
}

impl PageBuilder {
    pub fn new(db: DatabaseConnection, lang: Language) -> Self {
        Self {
            db,
            lang,
            with_seo: false,
        }
    }

    pub fn with_seo(mut self) -> Self {
        self.with_seo = true;
        self
    }

    pub async fn build<T: Serialize>(
        self,
        page_title: impl Into<String>,
        meta_description: impl Into<String>,
        content: T,
    ) -> AppResult<PageContext<T>> {
        let settings = SettingsService::new(self.db);
        let cookie_consent = settings
            .active_cookie_consent()
            .await?
            .map(|c| CookieConsentView::new(&c, self.lang));
        let seo = if self.with_seo {
            settings.active_homepage_seo().await?.map(SeoView::from)
        } else {
            None
        };

        Ok(PageContext {
            language: self.lang,
            page_title: page_title.into(),
            meta_description: meta_description.into(),
            seo,
            cookie_consent,
            content,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CookieConsentView {
    pub message: String,
    pub button_text: String,
    pub policy_link_text: String,
    pub policy_url: String,
}

impl CookieConsentView {
    pub fn new(consent: &CookieConsentModel, lang: Language) -> Self {
        Self {
            message: consent.message_in(lang).to_string(),
            button_text: consent.button_text_in(lang).to_string(),
            policy_link_text: consent.policy_link_text_in(lang).to_string(),
            policy_url: COOKIE_POLICY_PATH.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeoView {
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image_url: Option<String>,
    pub twitter_card_type: TwitterCardType,
    pub canonical_url: String,
    pub structured_data: Option<serde_json::Value>,
}

impl From<HomepageSeoModel> for SeoView {
    fn from(seo: HomepageSeoModel) -> Self {
        Self {
            meta_title: seo.meta_title,
            meta_description: seo.meta_description,
            meta_keywords: seo.meta_keywords,
            og_title: seo.og_title,
            og_description: seo.og_description,
            og_image_url: seo.og_image.as_deref().map(media_url),
            twitter_card_type: seo.twitter_card_type,
            canonical_url: seo.canonical_url,
            structured_data: seo.structured_data,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub description: String,
    pub url: String,
}

impl From<&CategoryModel> for CategoryView {
    fn from(c: &CategoryModel) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            slug: c.slug.clone(),
            icon: c.icon.clone(),
            description: c.description.clone(),
            url: category_path(&c.slug),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleCard {
    pub id: i32,
    pub slug: String,
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub thumbnail_url: String,
    pub thumbnail_alt: String,
    pub category: Option<CategoryView>,
    pub author_name: String,
    pub reading_time: i32,
    pub published_date: Option<String>,
    pub is_featured: bool,
    pub view_count: i32,
}

/// Turns article rows into localized cards, resolving their categories
/// from one category listing.
pub struct CardMaker {
    lang: Language,
    categories: HashMap<i32, CategoryView>,
}

impl CardMaker {
    pub async fn load(
        db: &DatabaseConnection,
        cache: Option<CacheService>,
        lang: Language,
    ) -> AppResult<Self> {
        let mut service = CategoryService::new(db.clone());
        if let Some(cache) = cache {
            service = service.with_cache(cache);
        }
        let categories = service
            .list()
            .await?
            .iter()
            .map(|c| (c.id, CategoryView::from(c)))
            .collect();
        Ok(Self { lang, categories })
    }

    pub fn card(&self, article: &ArticleModel) -> ArticleCard {
        ArticleCard {
            id: article.id,
            slug: article.slug.clone(),
            url: article_path(&article.slug),
            title: article.title_in(self.lang).to_string(),
            excerpt: article.excerpt_in(self.lang).to_string(),
            thumbnail_url: media_url(&article.thumbnail),
            thumbnail_alt: article.thumbnail_alt.clone(),
            category: article
                .category_id
                .and_then(|id| self.categories.get(&id).cloned()),
            author_name: article.author_name.clone(),
            reading_time: article.reading_time,
            published_date: article.published_date.map(format_datetime),
            is_featured: article.is_featured,
            view_count: article.view_count,
        }
    }

    pub fn cards(&self, articles: &[ArticleModel]) -> Vec<ArticleCard> {
        articles.iter().map(|a| self.card(a)).collect()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParagraphView {
    pub id: i32,
    pub paragraph_type: ParagraphType,
    pub heading: String,
    pub content: String,
    pub code_language: String,
    /// Sanitized HTML ready to embed
    pub html: String,
}

impl ParagraphView {
    pub fn new(p: &ArticleParagraphModel, lang: Language) -> Self {
        let content = p.content_in(lang).to_string();
        let heading = p.heading_in(lang).to_string();
        let html = match p.paragraph_type {
            ParagraphType::Text | ParagraphType::Quote => render_markdown(&content),
            ParagraphType::Code => render_code_block(&content, &p.code_language),
            ParagraphType::Heading => {
                format!("<h2>{}</h2>", html_escape::encode_text(&heading))
            }
        };

        Self {
            id: p.id,
            paragraph_type: p.paragraph_type,
            heading,
            content,
            code_language: p.code_language.clone(),
            html,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageView {
    pub id: i32,
    pub url: String,
    pub alt_text: String,
    pub caption: String,
}

impl From<&ArticleImageModel> for ImageView {
    fn from(i: &ArticleImageModel) -> Self {
        Self {
            id: i.id,
            url: media_url(&i.image),
            alt_text: i.alt_text.clone(),
            caption: i.caption.clone(),
        }
    }
}

/// One block of the article body: `{"type": "paragraph"|"image", "data": {...}}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ContentBlock {
    Paragraph(ParagraphView),
    Image(ImageView),
}

impl ContentBlock {
    pub fn new(item: &ContentItem, lang: Language) -> Self {
        match item {
            ContentItem::Paragraph(p) => ContentBlock::Paragraph(ParagraphView::new(p, lang)),
            ContentItem::Image(i) => ContentBlock::Image(ImageView::from(i)),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleSeoView {
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image_url: Option<String>,
    pub twitter_card_type: TwitterCardType,
    pub canonical_url: String,
    pub noindex: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleDetailView {
    #[serde(flatten)]
    pub card: ArticleCard,
    pub language: ArticleLanguage,
    pub author_bio: String,
    pub updated_at: String,
    pub seo: ArticleSeoView,
    pub content: Vec<ContentBlock>,
}

impl ArticleDetailView {
    pub fn new(
        article: &ArticleModel,
        content: &[ContentItem],
        cards: &CardMaker,
        lang: Language,
    ) -> Self {
        let og_image = article.og_image.as_deref().unwrap_or(&article.thumbnail);
        Self {
            card: cards.card(article),
            language: article.language,
            author_bio: article.author_bio.clone(),
            updated_at: format_datetime(article.updated_at),
            seo: ArticleSeoView {
                meta_title: article.meta_title_in(lang).to_string(),
                meta_description: article.meta_description_in(lang).to_string(),
                meta_keywords: article.meta_keywords_in(lang).to_string(),
                og_title: article.og_title.clone(),
                og_description: article.og_description.clone(),
                og_image_url: Some(media_url(og_image)),
                twitter_card_type: article.twitter_card_type,
                canonical_url: article.canonical_url.clone(),
                noindex: article.noindex,
            },
            content: content.iter().map(|item| ContentBlock::new(item, lang)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_block_is_tagged() {
        let block = ContentBlock::Image(ImageView {
            id: 3,
            url: "/media/a.jpg".to_string(),
            alt_text: "alt".to_string(),
            caption: String::new(),
        });
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["data"]["id"], 3);
    }

    #[test]
    fn paragraph_html_by_type() {
        let mut p = ArticleParagraphModel {
            id: 1,
            article_id: 1,
            sort_order: 0,
            paragraph_type: ParagraphType::Text,
            content: "**kalın**".to_string(),
            content_en: "**bold**".to_string(),
            heading_text: "Başlık".to_string(),
            heading_text_en: String::new(),
            code_language: "rust".to_string(),
        };
        assert!(ParagraphView::new(&p, Language::En)
            .html
            .contains("<strong>bold</strong>"));

        p.paragraph_type = ParagraphType::Heading;
        let view = ParagraphView::new(&p, Language::En);
        assert_eq!(view.heading, "Başlık");
        assert_eq!(view.html, "<h2>Başlık</h2>");

        p.paragraph_type = ParagraphType::Code;
        p.content = "a < b".to_string();
        assert!(ParagraphView::new(&p, Language::Tr)
            .html
            .contains("language-rust"));
    }
}
