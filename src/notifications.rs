use crate::domain::{ContactEmail, NewContact};
use crate::email_client::{EmailClient, EmailClientError};

/// Best-effort notification to the support mailbox. Returns the provider
/// message id when the email went out; every failure mode is logged and
/// collapsed into `None` so a broken provider can never fail a submission.
#[tracing::instrument(
    name = "Send notification email to support",
    skip(email_client, contact),
    fields(contact_email = %contact.email)
)]
pub async fn notify_support(
    email_client: &EmailClient,
    contact: &NewContact,
    support_email: &ContactEmail,
) -> Option<String> {
    if !email_client.is_configured() {
        tracing::warn!("Email notification skipped: no provider API key is configured");
        return None;
    }

    let subject = notification_subject(contact);
    let html_body = notification_html(contact);
    match email_client
        .send_email(support_email, &subject, &html_body, contact.email.as_ref())
        .await
    {
        Ok(message_id) => {
            tracing::info!(%message_id, "Notification email sent successfully");
            Some(message_id)
        }
        Err(EmailClientError::Rejected { status, body }) if is_verification_issue(&body) => {
            tracing::warn!(
                %status,
                "Email provider is in testing mode; verify a sending domain to reach {}",
                support_email
            );
            None
        }
        Err(error) => {
            tracing::error!(error.cause_chain = ?error, "Failed to send notification email");
            None
        }
    }
}

// Providers without a verified sending domain reject everything except
// test recipients; that rejection is expected in fresh deployments.
fn is_verification_issue(body: &str) -> bool {
    let body = body.to_lowercase();
    body.contains("verify a domain") || body.contains("testing emails")
}

pub fn notification_subject(contact: &NewContact) -> String {
    let company = if contact.company.is_empty() {
        "Individual"
    } else {
        contact.company.as_str()
    };
    format!("New Contact: {} - {}", contact.name.as_ref(), company)
}

pub fn notification_html(contact: &NewContact) -> String {
    let company = if contact.company.is_empty() {
        "Not provided"
    } else {
        contact.company.as_str()
    };
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background-color: #0f172a; padding: 30px; border-radius: 8px;">
        <h1 style="color: #38bdf8; margin-bottom: 20px;">New Contact Form Submission</h1>
        <div style="background-color: #1e293b; padding: 20px; border-radius: 4px; margin-bottom: 20px;">
            <p style="color: #94a3b8; margin: 0 0 10px 0;"><strong style="color: #f8fafc;">Name:</strong> {name}</p>
            <p style="color: #94a3b8; margin: 0 0 10px 0;"><strong style="color: #f8fafc;">Email:</strong> {email}</p>
            <p style="color: #94a3b8; margin: 0 0 10px 0;"><strong style="color: #f8fafc;">Company:</strong> {company}</p>
        </div>
        <div style="background-color: #1e293b; padding: 20px; border-radius: 4px;">
            <p style="color: #f8fafc; margin: 0 0 10px 0;"><strong>Message:</strong></p>
            <p style="color: #94a3b8; margin: 0; white-space: pre-wrap;">{message}</p>
        </div>
        <p style="color: #64748b; font-size: 12px; margin-top: 20px; text-align: center;">
            This email was sent from the Beskar IT website contact form.
        </p>
    </div>
</body>
</html>"#,
        name = contact.name.as_ref(),
        email = contact.email.as_ref(),
        company = company,
        message = contact.message.as_ref(),
    )
}
