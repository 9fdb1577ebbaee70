use crate::startup::SupportEmail;
use actix_web::{web, HttpResponse};

pub async fn get_support_email(support_email: web::Data<SupportEmail>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "email": support_email.0.as_ref()
    }))
}
