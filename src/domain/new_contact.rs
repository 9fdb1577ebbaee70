use crate::domain::{ContactEmail, ContactMessage, ContactName};

/// A validated contact-form submission, before it has been persisted.
pub struct NewContact {
    pub name: ContactName,
    pub email: ContactEmail,
    pub company: String,
    pub message: ContactMessage,
}
