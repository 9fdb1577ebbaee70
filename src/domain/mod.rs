mod contact_email;
mod contact_message;
mod contact_name;
mod new_contact;

pub use contact_email::ContactEmail;
pub use contact_message::ContactMessage;
pub use contact_name::ContactName;
pub use new_contact::NewContact;
