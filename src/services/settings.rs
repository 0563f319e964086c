//! Site-wide configuration records: homepage SEO, the cookie banner and the
//! cookie policy. Several rows may exist for each, but at most one is active.

use crate::{
    error::{AppError, AppResult},
    models::{
        article::TwitterCardType, cookie_consent, cookie_policy, homepage_seo, CookieConsent,
        CookieConsentModel, CookiePolicy, CookiePolicyModel, HomepageSeo, HomepageSeoModel,
    },
};
use sea_orm::{
    sea_query::Expr, ActiveModelBehavior, ActiveModelTrait, ActiveValue::Set, ColumnTrait,
    DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// An entity of which only one row may be active at a time.
pub trait Singleton: EntityTrait {
    fn active_column() -> Self::Column;
    fn id_column() -> Self::Column;
}

impl Singleton for HomepageSeo {
    fn active_column() -> Self::Column {
        homepage_seo::Column::IsActive
    }
    fn id_column() -> Self::Column {
        homepage_seo::Column::Id
    }
}

impl Singleton for CookieConsent {
    fn active_column() -> Self::Column {
        cookie_consent::Column::IsActive
    }
    fn id_column() -> Self::Column {
        cookie_consent::Column::Id
    }
}

impl Singleton for CookiePolicy {
    fn active_column() -> Self::Column {
        cookie_policy::Column::IsActive
    }
    fn id_column() -> Self::Column {
        cookie_policy::Column::Id
    }
}

/// The most recently created active row.
async fn find_active<E: Singleton>(db: &DatabaseConnection) -> Result<Option<E::Model>, DbErr> {
    E::find()
        .filter(E::active_column().eq(true))
        .order_by_desc(E::id_column())
        .one(db)
        .await
}

async fn list_all<E: Singleton>(db: &DatabaseConnection) -> Result<Vec<E::Model>, DbErr> {
    E::find().order_by_desc(E::id_column()).all(db).await
}

/// Insert (`existing_id = None`) or update a row. When the row is active,
/// every other active row is switched off in the same transaction.
async fn save_exclusive<E, A>(
    db: &DatabaseConnection,
    model: A,
    is_active: bool,
    existing_id: Option<i32>,
) -> AppResult<E::Model>
where
    E: Singleton,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    E::Model: IntoActiveModel<A>,
{
    let txn = db.begin().await?;

    if is_active {
        let mut deactivate = E::update_many()
            .col_expr(E::active_column(), Expr::value(false))
            .filter(E::active_column().eq(true));
        if let Some(id) = existing_id {
            deactivate = deactivate.filter(E::id_column().ne(id));
        }
        deactivate.exec(&txn).await?;
    }

    let saved = match existing_id {
        Some(_) => model.update(&txn).await?,
        None => model.insert(&txn).await?,
    };

    txn.commit().await?;
    Ok(saved)
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct HomepageSeoDraft {
    #[validate(length(min = 1, max = 60))]
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
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub canonical_url: String,
    /// schema.org JSON-LD object
    pub structured_data: Option<serde_json::Value>,
}

impl HomepageSeoDraft {
    fn apply(self, active: &mut homepage_seo::ActiveModel) {
        active.meta_title = Set(self.meta_title);
        active.meta_description = Set(self.meta_description);
        active.meta_keywords = Set(self.meta_keywords);
        active.og_title = Set(self.og_title);
        active.og_description = Set(self.og_description);
        active.og_image = Set(self.og_image);
        active.twitter_card_type = Set(self.twitter_card_type);
        active.is_active = Set(self.is_active);
        active.canonical_url = Set(self.canonical_url);
        active.structured_data = Set(self.structured_data);
    }
}

fn default_message_tr() -> String {
    cookie_consent::DEFAULT_MESSAGE_TR.to_string()
}
fn default_message_en() -> String {
    cookie_consent::DEFAULT_MESSAGE_EN.to_string()
}
fn default_button_tr() -> String {
    cookie_consent::DEFAULT_BUTTON_TR.to_string()
}
fn default_button_en() -> String {
    cookie_consent::DEFAULT_BUTTON_EN.to_string()
}
fn default_policy_link_tr() -> String {
    cookie_consent::DEFAULT_POLICY_LINK_TR.to_string()
}
fn default_policy_link_en() -> String {
    cookie_consent::DEFAULT_POLICY_LINK_EN.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CookieConsentDraft {
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_message_tr")]
    #[validate(length(min = 1))]
    pub message_tr: String,
    #[serde(default = "default_message_en")]
    #[validate(length(min = 1))]
    pub message_en: String,
    #[serde(default = "default_button_tr")]
    #[validate(length(min = 1, max = 50))]
    pub button_text_tr: String,
    #[serde(default = "default_button_en")]
    #[validate(length(min = 1, max = 50))]
    pub button_text_en: String,
    #[serde(default = "default_policy_link_tr")]
    #[validate(length(min = 1, max = 50))]
    pub policy_link_text_tr: String,
    #[serde(default = "default_policy_link_en")]
    #[validate(length(min = 1, max = 50))]
    pub policy_link_text_en: String,
}

impl CookieConsentDraft {
    fn apply(self, active: &mut cookie_consent::ActiveModel) {
        active.is_active = Set(self.is_active);
        active.message_tr = Set(self.message_tr);
        active.message_en = Set(self.message_en);
        active.button_text_tr = Set(self.button_text_tr);
        active.button_text_en = Set(self.button_text_en);
        active.policy_link_text_tr = Set(self.policy_link_text_tr);
        active.policy_link_text_en = Set(self.policy_link_text_en);
    }
}

fn default_title_tr() -> String {
    cookie_policy::DEFAULT_TITLE_TR.to_string()
}
fn default_title_en() -> String {
    cookie_policy::DEFAULT_TITLE_EN.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CookiePolicyDraft {
    #[serde(default = "default_title_tr")]
    #[validate(length(min = 1, max = 200))]
    pub title_tr: String,
    #[serde(default = "default_title_en")]
    #[validate(length(min = 1, max = 200))]
    pub title_en: String,
    /// Markdown
    #[validate(length(min = 1))]
    pub content_tr: String,
    #[validate(length(min = 1))]
    pub content_en: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    #[validate(length(max = 160))]
    pub meta_description_tr: String,
    #[serde(default)]
    #[validate(length(max = 160))]
    pub meta_description_en: String,
}

impl CookiePolicyDraft {
    fn apply(self, active: &mut cookie_policy::ActiveModel) {
        active.title_tr = Set(self.title_tr);
        active.title_en = Set(self.title_en);
        active.content_tr = Set(self.content_tr);
        active.content_en = Set(self.content_en);
        active.is_active = Set(self.is_active);
        active.meta_description_tr = Set(self.meta_description_tr);
        active.meta_description_en = Set(self.meta_description_en);
        active.last_updated = Set(chrono::Utc::now().date_naive());
    }
}

pub struct SettingsService {
    db: DatabaseConnection,
}

impl SettingsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn active_homepage_seo(&self) -> AppResult<Option<HomepageSeoModel>> {
        Ok(find_active::<HomepageSeo>(&self.db).await?)
    }

    pub async fn active_cookie_consent(&self) -> AppResult<Option<CookieConsentModel>> {
        Ok(find_active::<CookieConsent>(&self.db).await?)
    }

    pub async fn active_cookie_policy(&self) -> AppResult<Option<CookiePolicyModel>> {
        Ok(find_active::<CookiePolicy>(&self.db).await?)
    }

    // Homepage SEO

    pub async fn list_homepage_seo(&self) -> AppResult<Vec<HomepageSeoModel>> {
        Ok(list_all::<HomepageSeo>(&self.db).await?)
    }

    pub async fn create_homepage_seo(&self, draft: HomepageSeoDraft) -> AppResult<HomepageSeoModel> {
        let now = chrono::Utc::now().naive_utc();
        let is_active = draft.is_active;
        let mut active = homepage_seo::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        draft.apply(&mut active);

        let saved = save_exclusive(&self.db, active, is_active, None).await?;
        tracing::info!(id = saved.id, is_active, "homepage SEO created");
        Ok(saved)
    }

    pub async fn update_homepage_seo(
        &self,
        id: i32,
        draft: HomepageSeoDraft,
    ) -> AppResult<HomepageSeoModel> {
        let existing = HomepageSeo::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;
        let is_active = draft.is_active;
        let mut active: homepage_seo::ActiveModel = existing.into();
        draft.apply(&mut active);
        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let saved = save_exclusive(&self.db, active, is_active, Some(id)).await?;
        tracing::info!(id, is_active, "homepage SEO updated");
        Ok(saved)
    }

    pub async fn delete_homepage_seo(&self, id: i32) -> AppResult<()> {
        let result = HomepageSeo::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // Cookie consent banner

    pub async fn list_cookie_consents(&self) -> AppResult<Vec<CookieConsentModel>> {
        Ok(list_all::<CookieConsent>(&self.db).await?)
    }

    pub async fn create_cookie_consent(
        &self,
        draft: CookieConsentDraft,
    ) -> AppResult<CookieConsentModel> {
        let is_active = draft.is_active;
        let mut active = <cookie_consent::ActiveModel as Default>::default();
        draft.apply(&mut active);

        let saved = save_exclusive(&self.db, active, is_active, None).await?;
        tracing::info!(id = saved.id, is_active, "cookie consent created");
        Ok(saved)
    }

    pub async fn update_cookie_consent(
        &self,
        id: i32,
        draft: CookieConsentDraft,
    ) -> AppResult<CookieConsentModel> {
        let existing = CookieConsent::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;
        let is_active = draft.is_active;
        let mut active: cookie_consent::ActiveModel = existing.into();
        draft.apply(&mut active);

        let saved = save_exclusive(&self.db, active, is_active, Some(id)).await?;
        tracing::info!(id, is_active, "cookie consent updated");
        Ok(saved)
    }

    pub async fn delete_cookie_consent(&self, id: i32) -> AppResult<()> {
        let result = CookieConsent::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // Cookie policy

    pub async fn list_cookie_policies(&self) -> AppResult<Vec<CookiePolicyModel>> {
        Ok(list_all::<CookiePolicy>(&self.db).await?)
    }

    pub async fn create_cookie_policy(
        &self,
        draft: CookiePolicyDraft,
    ) -> AppResult<CookiePolicyModel> {
        let is_active = draft.is_active;
        let mut active = <cookie_policy::ActiveModel as Default>::default();
        draft.apply(&mut active);

        let saved = save_exclusive(&self.db, active, is_active, None).await?;
        tracing::info!(id = saved.id, is_active, "cookie policy created");
        Ok(saved)
    }

    pub async fn update_cookie_policy(
        &self,
        id: i32,
        draft: CookiePolicyDraft,
    ) -> AppResult<CookiePolicyModel> {
        let existing = CookiePolicy::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;
        let is_active = draft.is_active;
        let mut active: cookie_policy::ActiveModel = existing.into();
        draft.apply(&mut active);

        let saved = save_exclusive(&self.db, active, is_active, Some(id)).await?;
        tracing::info!(id, is_active, "cookie policy updated");
        Ok(saved)
    }

    pub async fn delete_cookie_policy(&self, id: i32) -> AppResult<()> {
        let result = CookiePolicy::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_consent_defaults_to_stock_text() {
        let draft: CookieConsentDraft = serde_json::from_str("{}").unwrap();
        assert!(draft.is_active);
        assert_eq!(draft.button_text_tr, "Anladım");
        assert_eq!(draft.policy_link_text_en, "Cookie Policy");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn cookie_policy_titles_default() {
        let draft: CookiePolicyDraft =
            serde_json::from_str(r#"{"content_tr":"içerik","content_en":"content"}"#).unwrap();
        assert_eq!(draft.title_tr, "Çerez Politikası");
        assert_eq!(draft.title_en, "Cookie Policy");
        assert!(draft.is_active);
    }

    #[test]
    fn homepage_seo_requires_long_description() {
        let draft: HomepageSeoDraft = serde_json::from_str(
            r#"{"meta_title":"EdebAi","meta_description":"çok kısa"}"#,
        )
        .unwrap();
        assert!(draft.validate().is_err());
    }
}
