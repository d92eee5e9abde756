use reqwest::Client;

use crate::domain::{EmailAddress, Notification};
use crate::email_client::{endpoint, reject_unless_success, EmailSender, SendError};

/// Client for MailChannels' transactional API. No credentials are sent: the
/// provider trusts the sender through the DKIM domain.
pub struct MailChannelsClient {
    http_client: Client,
    base_url: String,
    sender: EmailAddress,
    sender_name: String,
    recipient: EmailAddress,
    dkim_domain: String,
    dkim_selector: String,
}

impl MailChannelsClient {
    pub fn new(
        http_client: Client,
        base_url: String,
        sender: EmailAddress,
        sender_name: String,
        recipient: EmailAddress,
        dkim_domain: String,
        dkim_selector: String,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            sender_name,
            recipient,
            dkim_domain,
            dkim_selector,
        }
    }
}

#[derive(serde::Serialize)]
struct SendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Mailbox<'a>,
    reply_to: Mailbox<'a>,
    content: Vec<Content<'a>>,
}

#[derive(serde::Serialize)]
struct Personalization<'a> {
    to: Vec<Mailbox<'a>>,
    dkim_domain: &'a str,
    dkim_selector: &'a str,
}

#[derive(serde::Serialize)]
struct Mailbox<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

#[async_trait::async_trait]
impl EmailSender for MailChannelsClient {
    #[tracing::instrument(
        name = "Sending a notification through MailChannels",
        skip(self, notification),
        fields(subject = %notification.subject)
    )]
    async fn send(&self, notification: &Notification) -> Result<(), SendError> {
        let request_body = SendRequest {
            personalizations: vec![Personalization {
                to: vec![Mailbox {
                    email: self.recipient.as_ref(),
                    name: None,
                }],
                dkim_domain: &self.dkim_domain,
                dkim_selector: &self.dkim_selector,
            }],
            from: Mailbox {
                email: self.sender.as_ref(),
                name: Some(self.sender_name.as_str()),
            },
            reply_to: Mailbox {
                email: notification.reply_to.as_ref(),
                name: notification.reply_to_name.as_deref(),
            },
            content: vec![Content {
                content_type: "text/plain",
                value: &notification.text_body,
            }],
        };
        let response = self
            .http_client
            .post(&endpoint(&self.base_url, "tx/v1/send"))
            .json(&request_body)
            .send()
            .await?;
        reject_unless_success(response).await?;

        tracing::info!("MailChannels accepted the email");
        Ok(())
    }
}
