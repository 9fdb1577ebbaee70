use crate::domain::{ContactEmail, ContactMessage, ContactName, NewContact};
use crate::email_client::EmailClient;
use crate::notifications::notify_support;
use crate::routes::error_chain_fmt;
use crate::startup::SupportEmail;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use chrono::Utc;
use sqlx::PgPool;
use std::fmt::Formatter;
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct ContactForm {
    // Missing fields fall through to domain validation instead of
    // failing JSON deserialization with a 400.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub message: String,
}

impl TryFrom<ContactForm> for NewContact {
    type Error = String;
    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let name = ContactName::parse(form.name)?;
        let email = ContactEmail::parse(form.email)?;
        let message = ContactMessage::parse(form.message)?;
        Ok(NewContact {
            name,
            email,
            company: form.company,
            message,
        })
    }
}

//region ContactError & Implementations
#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ContactError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
//endregion

#[derive(serde::Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
    pub email_sent: bool,
}

//region HTTP handlers
#[tracing::instrument(
    name = "Handle a contact form submission",
    skip(form, pool, email_client, support_email),
    fields(
        contact_email = %form.email,
        contact_name = %form.name,
    )
)]
pub async fn submit_contact(
    form: web::Json<ContactForm>,
    pool: web::Data<PgPool>,
    email_client: web::Data<EmailClient>,
    support_email: web::Data<SupportEmail>,
) -> Result<HttpResponse, ContactError> {
    let new_contact: NewContact = form
        .into_inner()
        .try_into()
        .map_err(ContactError::ValidationError)?;

    let contact_id = insert_contact(&pool, &new_contact, &support_email.0)
        .await
        .context("Failed to store the contact submission")?;

    // Best effort: the submission is already persisted, a failed email
    // only clears the `email_sent` flag.
    let message_id = notify_support(&email_client, &new_contact, &support_email.0).await;

    Ok(HttpResponse::Ok().json(ContactResponse {
        success: true,
        message: format!(
            "Thank you for reaching out. Our team at {} will be in touch soon.",
            support_email.0
        ),
        id: contact_id,
        email_sent: message_id.is_some(),
    }))
}
//endregion

//region Helper functions
#[tracing::instrument(
    name = "Saving new contact submission in the database",
    skip(pool, contact)
)]
pub async fn insert_contact(
    pool: &PgPool,
    contact: &NewContact,
    notification_email: &ContactEmail,
) -> Result<Uuid, sqlx::Error> {
    let contact_id = Uuid::new_v4();
    sqlx::query(
        r#"
    INSERT INTO contacts (id, name, email, company, message, created_at, notification_email)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    "#,
    )
    .bind(contact_id)
    .bind(contact.name.as_ref())
    .bind(contact.email.as_ref())
    .bind(&contact.company)
    .bind(contact.message.as_ref())
    .bind(Utc::now())
    .bind(notification_email.as_ref())
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query {:?}", e);
        e
    })?;
    Ok(contact_id)
}
//endregion
