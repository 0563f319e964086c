use super::article::TwitterCardType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "homepage_seo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: Option<String>,
    pub twitter_card_type: TwitterCardType,
    pub is_active: bool,
    pub canonical_url: String,
    /// schema.org JSON-LD (Organization, WebSite, ...).
    #[schema(value_type = Option<Object>)]
    pub structured_data: Option<Json>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
