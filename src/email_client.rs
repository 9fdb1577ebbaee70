use crate::domain::ContactEmail;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};

/// Thin client for the transactional email provider's REST API.
///
/// The API key is optional: without one the client is "disabled" and
/// `send_email` fails fast with [`EmailClientError::NotConfigured`]
/// instead of hitting the network.
pub struct EmailClient {
    http_client: reqwest::Client,
    base_url: String,
    sender: ContactEmail,
    api_key: Option<Secret<String>>,
}

#[derive(thiserror::Error, Debug)]
pub enum EmailClientError {
    #[error("No email provider API key is configured")]
    NotConfigured,
    #[error("Failed to reach the email provider")]
    Request(#[from] reqwest::Error),
    #[error("The email provider rejected the request ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    reply_to: &'a str,
}

#[derive(serde::Deserialize)]
struct SendEmailResponse {
    id: String,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: ContactEmail,
        api_key: Option<Secret<String>>,
        timeout: std::time::Duration,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http_client,
            base_url,
            sender,
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Submit one email to the provider. Returns the provider-assigned
    /// message id.
    pub async fn send_email(
        &self,
        recipient: &ContactEmail,
        subject: &str,
        html_body: &str,
        reply_to: &str,
    ) -> Result<String, EmailClientError> {
        let api_key = self.api_key.as_ref().ok_or(EmailClientError::NotConfigured)?;
        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: [recipient.as_ref()],
            subject,
            html: html_body,
            reply_to,
        };
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&request_body)
            .send()
            .await?;

        if response.status().is_success() {
            let body = response.json::<SendEmailResponse>().await?;
            Ok(body.id)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(EmailClientError::Rejected { status, body })
        }
    }
}
