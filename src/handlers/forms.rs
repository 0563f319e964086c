//! AJAX form endpoints of the public site.

use crate::{
    error::{AppError, AppResult},
    i18n::Message,
    middleware::CurrentLanguage,
    response::FormResponse,
    services::{
        contact::ContactService,
        newsletter::{NewsletterService, SubscribeOutcome},
    },
};
use axum::{Extension, Form};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}

#[utoipa::path(
    post,
    path = "/ajax/bulten-abone/",
    request_body(content = SubscribeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Subscribed or reactivated", body = FormResponse),
        (status = 400, description = "Missing email or already subscribed", body = FormResponse),
    ),
    tag = "forms"
)]
pub async fn newsletter_subscribe(
    Extension(db): Extension<DatabaseConnection>,
    CurrentLanguage(lang): CurrentLanguage,
    Form(form): Form<SubscribeForm>,
) -> AppResult<FormResponse> {
    if form.email.trim().is_empty() {
        return Ok(FormResponse::rejected(Message::EmailRequired.text(lang)));
    }

    let outcome = NewsletterService::new(db).subscribe(&form.email).await?;
    Ok(match outcome {
        SubscribeOutcome::Created => FormResponse::accepted(Message::Subscribed.text(lang)),
        SubscribeOutcome::Reactivated => FormResponse::accepted(Message::Resubscribed.text(lang)),
        SubscribeOutcome::AlreadyActive => {
            FormResponse::rejected(Message::AlreadySubscribed.text(lang))
        }
    })
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/ajax/iletisim-gonder/",
    request_body(content = ContactForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Message stored", body = FormResponse),
        (status = 400, description = "A field is missing", body = FormResponse),
    ),
    tag = "forms"
)]
pub async fn contact_submit(
    Extension(db): Extension<DatabaseConnection>,
    CurrentLanguage(lang): CurrentLanguage,
    Form(form): Form<ContactForm>,
) -> AppResult<FormResponse> {
    match ContactService::new(db)
        .submit(&form.name, &form.email, &form.message)
        .await
    {
        Ok(_) => Ok(FormResponse::accepted(Message::ContactReceived.text(lang))),
        Err(AppError::Validation(_)) => Ok(FormResponse::rejected(Message::FillAllFields.text(lang))),
        Err(e) => Err(e),
    }
}
