use crate::{
    error::{AppError, AppResult},
    models::{newsletter_subscriber, NewsletterSubscriber, NewsletterSubscriberModel},
    response::{PaginatedResponse, PaginationQuery},
    services::paginate,
};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue::Set,
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

pub const ADMIN_PAGE_SIZE: u64 = 50;

/// What a subscription request did to the subscriber list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Created,
    Reactivated,
    AlreadyActive,
}

pub struct NewsletterService {
    db: DatabaseConnection,
}

impl NewsletterService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Subscribe `email`, reactivating a lapsed subscription in place.
    ///
    /// Runs as insert-on-conflict followed by a conditional update, so
    /// concurrent requests for the same address never create a second row.
    pub async fn subscribe(&self, email: &str) -> AppResult<SubscribeOutcome> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::Validation("Email address is required".to_string()));
        }

        let row = newsletter_subscriber::ActiveModel {
            email: Set(email.to_string()),
            is_active: Set(true),
            subscribed_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        };

        let inserted = NewsletterSubscriber::insert(row)
            .on_conflict(
                OnConflict::column(newsletter_subscriber::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        if inserted > 0 {
            tracing::info!("newsletter subscription created");
            return Ok(SubscribeOutcome::Created);
        }

        let reactivated = NewsletterSubscriber::update_many()
            .col_expr(newsletter_subscriber::Column::IsActive, Expr::value(true))
            .filter(newsletter_subscriber::Column::Email.eq(email))
            .filter(newsletter_subscriber::Column::IsActive.eq(false))
            .exec(&self.db)
            .await?;
        if reactivated.rows_affected > 0 {
            tracing::info!("newsletter subscription reactivated");
            return Ok(SubscribeOutcome::Reactivated);
        }

        Ok(SubscribeOutcome::AlreadyActive)
    }

    pub async fn list(
        &self,
        query: &PaginationQuery,
    ) -> AppResult<PaginatedResponse<NewsletterSubscriberModel>> {
        let select = NewsletterSubscriber::find()
            .order_by_desc(newsletter_subscriber::Column::SubscribedAt)
            .order_by_desc(newsletter_subscriber::Column::Id);
        paginate(&self.db, select, ADMIN_PAGE_SIZE, query).await
    }

    pub async fn set_active(&self, id: i32, is_active: bool) -> AppResult<NewsletterSubscriberModel> {
        let result = NewsletterSubscriber::update_many()
            .col_expr(newsletter_subscriber::Column::IsActive, Expr::value(is_active))
            .filter(newsletter_subscriber::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        NewsletterSubscriber::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}
