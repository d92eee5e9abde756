use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

use crate::domain::{EmailAddress, Notification};
use crate::email_client::{endpoint, reject_unless_success, EmailSender, SendError};

/// Client for Resend's `POST /emails` API, authenticated with a bearer key.
pub struct ResendClient {
    http_client: Client,
    base_url: String,
    sender: EmailAddress,
    sender_name: String,
    recipient: EmailAddress,
    api_key: Option<Secret<String>>,
}

impl ResendClient {
    pub fn new(
        http_client: Client,
        base_url: String,
        sender: EmailAddress,
        sender_name: String,
        recipient: EmailAddress,
        api_key: Option<Secret<String>>,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            sender_name,
            recipient,
            api_key,
        }
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: Vec<&'a str>,
    subject: &'a str,
    reply_to: &'a str,
    text: &'a str,
}

#[derive(serde::Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[async_trait::async_trait]
impl EmailSender for ResendClient {
    #[tracing::instrument(
        name = "Sending a notification through Resend",
        skip(self, notification),
        fields(subject = %notification.subject)
    )]
    async fn send(&self, notification: &Notification) -> Result<(), SendError> {
        let api_key = match &self.api_key {
            Some(api_key) => api_key,
            None => {
                tracing::error!("Resend API key is not set");
                return Err(SendError::MissingCredentials);
            }
        };
        let request_body = SendEmailRequest {
            from: format!("{} <{}>", self.sender_name, self.sender),
            to: vec![self.recipient.as_ref()],
            subject: &notification.subject,
            reply_to: notification.reply_to.as_ref(),
            text: &notification.text_body,
        };
        let response = self
            .http_client
            .post(&endpoint(&self.base_url, "emails"))
            .bearer_auth(api_key.expose_secret())
            .json(&request_body)
            .send()
            .await?;
        let response = reject_unless_success(response).await?;

        match response.json::<SendEmailResponse>().await {
            Ok(sent) => tracing::info!(email_id = %sent.id, "Resend accepted the email"),
            Err(e) => tracing::warn!(
                error.message = %e,
                "Resend accepted the email but its response could not be read"
            ),
        }
        Ok(())
    }
}
