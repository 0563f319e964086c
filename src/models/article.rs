use crate::i18n::{localized, Language};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which audiences an article was written for.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum ArticleLanguage {
    #[sea_orm(string_value = "tr")]
    Tr,
    #[sea_orm(string_value = "en")]
    En,
    #[default]
    #[sea_orm(string_value = "both")]
    Both,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "snake_case")]
pub enum TwitterCardType {
    #[sea_orm(string_value = "summary")]
    Summary,
    #[default]
    #[sea_orm(string_value = "summary_large_image")]
    SummaryLargeImage,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub title_en: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub category_id: Option<i32>,
    pub language: ArticleLanguage,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt_en: String,
    pub thumbnail: String,
    pub thumbnail_alt: String,
    pub author_name: String,
    #[sea_orm(column_type = "Text")]
    pub author_bio: String,
    pub reading_time: i32,
    pub published_date: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub is_published: bool,
    pub is_featured: bool,
    pub canonical_url: String,
    pub noindex: bool,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: Option<String>,
    pub twitter_card_type: TwitterCardType,
    pub meta_title_en: String,
    pub meta_description_en: String,
    pub meta_keywords_en: String,
    pub view_count: i32,
}

impl Model {
    pub fn title_in(&self, lang: Language) -> &str {
        localized(lang, &self.title, &self.title_en)
    }

    pub fn excerpt_in(&self, lang: Language) -> &str {
        localized(lang, &self.excerpt, &self.excerpt_en)
    }

    pub fn meta_title_in(&self, lang: Language) -> &str {
        localized(lang, &self.meta_title, &self.meta_title_en)
    }

    pub fn meta_description_in(&self, lang: Language) -> &str {
        localized(lang, &self.meta_description, &self.meta_description_en)
    }

    pub fn meta_keywords_in(&self, lang: Language) -> &str {
        localized(lang, &self.meta_keywords, &self.meta_keywords_en)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(has_many = "super::article_paragraph::Entity")]
    Paragraph,
    #[sea_orm(has_many = "super::article_image::Entity")]
    Image,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::article_paragraph::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Paragraph.def()
    }
}

impl Related<super::article_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
