use crate::domain::EmailAddress;

/// A provider-independent plaintext email addressed to the site owner.
#[derive(Debug, Clone)]
pub struct Notification {
    pub subject: String,
    pub text_body: String,
    pub reply_to: EmailAddress,
    pub reply_to_name: Option<String>,
}
