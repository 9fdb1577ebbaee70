use crate::routes::ContactError;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(serde::Serialize, sqlx::FromRow)]
pub struct StoredContact {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub notification_email: String,
}

#[derive(serde::Serialize)]
pub struct ContactList {
    pub contacts: Vec<StoredContact>,
}

#[tracing::instrument(name = "List stored contact submissions", skip(pool))]
pub async fn get_contacts(pool: web::Data<PgPool>) -> Result<HttpResponse, ContactError> {
    let contacts = list_contacts(&pool)
        .await
        .context("Failed to fetch stored contact submissions")?;
    Ok(HttpResponse::Ok().json(ContactList { contacts }))
}

// The internal row id stays internal: callers only ever see submission
// fields and the server-side timestamp.
async fn list_contacts(pool: &PgPool) -> Result<Vec<StoredContact>, sqlx::Error> {
    sqlx::query_as::<_, StoredContact>(
        "SELECT name, email, company, message, created_at, notification_email FROM contacts",
    )
    .fetch_all(pool)
    .await
}
