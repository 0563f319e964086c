use crate::{
    error::{AppError, AppResult},
    models::{contact_message, ContactMessage, ContactMessageModel},
    response::{PaginatedResponse, PaginationQuery},
    services::paginate,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};

pub const ADMIN_PAGE_SIZE: u64 = 50;

pub struct ContactService {
    db: DatabaseConnection,
}

impl ContactService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a message from the contact form. All three fields are required
    /// after trimming; identical messages are stored again.
    pub async fn submit(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> AppResult<ContactMessageModel> {
        let (name, email, message) = (name.trim(), email.trim(), message.trim());
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(AppError::Validation("All fields are required".to_string()));
        }

        let saved = contact_message::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            message: Set(message.to_string()),
            created_at: Set(chrono::Utc::now().naive_utc()),
            is_read: Set(false),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(message_id = saved.id, "contact message received");
        Ok(saved)
    }

    pub async fn list(
        &self,
        unread_only: bool,
        query: &PaginationQuery,
    ) -> AppResult<PaginatedResponse<ContactMessageModel>> {
        let mut select = ContactMessage::find();
        if unread_only {
            select = select.filter(contact_message::Column::IsRead.eq(false));
        }
        let select = select
            .order_by_desc(contact_message::Column::CreatedAt)
            .order_by_desc(contact_message::Column::Id);
        paginate(&self.db, select, ADMIN_PAGE_SIZE, query).await
    }

    pub async fn mark_read(&self, id: i32) -> AppResult<ContactMessageModel> {
        let result = ContactMessage::update_many()
            .col_expr(contact_message::Column::IsRead, Expr::value(true))
            .filter(contact_message::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        ContactMessage::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}
