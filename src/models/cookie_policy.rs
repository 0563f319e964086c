use crate::i18n::{localized, Language};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_TITLE_TR: &str = "Çerez Politikası";
pub const DEFAULT_TITLE_EN: &str = "Cookie Policy";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "cookie_policies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title_tr: String,
    pub title_en: String,
    #[sea_orm(column_type = "Text")]
    pub content_tr: String,
    #[sea_orm(column_type = "Text")]
    pub content_en: String,
    #[schema(value_type = String, format = Date)]
    pub last_updated: Date,
    pub is_active: bool,
    pub meta_description_tr: String,
    pub meta_description_en: String,
}

impl Model {
    pub fn title_in(&self, lang: Language) -> &str {
        localized(lang, &self.title_tr, &self.title_en)
    }

    pub fn content_in(&self, lang: Language) -> &str {
        localized(lang, &self.content_tr, &self.content_en)
    }

    pub fn meta_description_in(&self, lang: Language) -> &str {
        localized(lang, &self.meta_description_tr, &self.meta_description_en)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
