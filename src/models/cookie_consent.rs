use crate::i18n::{localized, Language};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_MESSAGE_TR: &str =
    "Bu web sitesi, deneyiminizi geliştirmek için çerezler kullanmaktadır.";
pub const DEFAULT_MESSAGE_EN: &str = "This website uses cookies to improve your experience.";
pub const DEFAULT_BUTTON_TR: &str = "Anladım";
pub const DEFAULT_BUTTON_EN: &str = "I Understand";
pub const DEFAULT_POLICY_LINK_TR: &str = "Çerez Politikası";
pub const DEFAULT_POLICY_LINK_EN: &str = "Cookie Policy";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "cookie_consents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub is_active: bool,
    #[sea_orm(column_type = "Text")]
    pub message_tr: String,
    #[sea_orm(column_type = "Text")]
    pub message_en: String,
    pub button_text_tr: String,
    pub button_text_en: String,
    pub policy_link_text_tr: String,
    pub policy_link_text_en: String,
}

impl Model {
    pub fn message_in(&self, lang: Language) -> &str {
        localized(lang, &self.message_tr, &self.message_en)
    }

    pub fn button_text_in(&self, lang: Language) -> &str {
        localized(lang, &self.button_text_tr, &self.button_text_en)
    }

    pub fn policy_link_text_in(&self, lang: Language) -> &str {
        localized(lang, &self.policy_link_text_tr, &self.policy_link_text_en)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
