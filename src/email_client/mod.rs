mod mailchannels;
mod resend;

pub use mailchannels::MailChannelsClient;
pub use resend::ResendClient;

use std::fmt::Formatter;
use std::sync::Arc;

use crate::configuration::{EmailClientSettings, EmailProvider};
use crate::domain::Notification;
use crate::routes::error_chain_fmt;

/// Delivers a notification to the site owner through a transactional-email
/// provider.
#[async_trait::async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), SendError>;
}

#[derive(thiserror::Error)]
pub enum SendError {
    #[error("No API key is configured for the email provider")]
    MissingCredentials,
    #[error("The email provider answered {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Failed to reach the email provider")]
    Transport(#[from] reqwest::Error),
}

impl std::fmt::Debug for SendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Turns a non-2xx provider response into a `SendError::Rejected`.
async fn reject_unless_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, SendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SendError::Rejected { status, body })
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

/// Builds the provider client selected in configuration. Invalid sender or
/// recipient addresses fail here, at startup, rather than per request.
pub fn build_email_sender(
    settings: &EmailClientSettings,
) -> Result<Arc<dyn EmailSender>, anyhow::Error> {
    let sender = settings
        .sender()
        .map_err(|e| anyhow::anyhow!("Invalid sender email in configuration: {}", e))?;
    let recipient = settings
        .recipient()
        .map_err(|e| anyhow::anyhow!("Invalid recipient email in configuration: {}", e))?;
    let http_client = reqwest::Client::builder()
        .timeout(settings.timeout())
        .build()?;

    let email_sender: Arc<dyn EmailSender> = match settings.provider {
        EmailProvider::Resend => {
            if settings.api_key.is_none() {
                tracing::warn!(
                    "No Resend API key configured, every submission will fail to send"
                );
            }
            Arc::new(ResendClient::new(
                http_client,
                settings.base_url.clone(),
                sender,
                settings.sender_name.clone(),
                recipient,
                settings.api_key.clone(),
            ))
        }
        EmailProvider::MailChannels => {
            let dkim_domain = settings
                .dkim_domain()
                .map_err(|e| anyhow::anyhow!("Invalid sender email in configuration: {}", e))?;
            Arc::new(MailChannelsClient::new(
                http_client,
                settings.base_url.clone(),
                sender,
                settings.sender_name.clone(),
                recipient,
                dkim_domain,
                settings.dkim_selector.clone(),
            ))
        }
    };
    Ok(email_sender)
}
