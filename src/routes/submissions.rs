use actix_web::http::header::ORIGIN;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use std::fmt::Formatter;

use crate::configuration::FormSettings;
use crate::domain::{EmailAddress, FormKind, Outcome, Submission};
use crate::email_client::{EmailSender, SendError};
use crate::form_fields::FormFields;
use crate::utils::found;

#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error("The honeypot field was filled in")]
    Spam,
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("{0}")]
    InvalidEmail(String),
    #[error("Failed to send the notification email")]
    SendFailed(#[from] SendError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Writes an error followed by every error in its `source()` chain.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

impl SubmissionError {
    /// Unexpected failures are reported as send failures, never as success.
    pub fn outcome(&self) -> Outcome {
        match self {
            SubmissionError::Spam => Outcome::Spam,
            SubmissionError::MissingFields(_) => Outcome::MissingFields,
            SubmissionError::InvalidEmail(_) => Outcome::InvalidEmail,
            SubmissionError::SendFailed(_) | SubmissionError::UnexpectedError(_) => {
                Outcome::SendFailed
            }
        }
    }
}

#[tracing::instrument(
    name = "Handling a form submission",
    skip(request, form, email_sender, form_settings),
    fields(
        origin = tracing::field::Empty,
        outcome = tracing::field::Empty
    )
)]
pub async fn submit_form(
    request: HttpRequest,
    form: Result<FormFields, actix_web::Error>,
    email_sender: web::Data<dyn EmailSender>,
    form_settings: web::Data<FormSettings>,
) -> HttpResponse {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|value| value.to_str().ok());
    if let Some(origin) = origin {
        tracing::Span::current().record("origin", &tracing::field::display(origin));
    }

    let outcome = match process_submission(form, email_sender.get_ref(), &form_settings).await {
        Ok(()) => {
            tracing::info!("Form submitted successfully");
            Outcome::Success
        }
        Err(e) => {
            match &e {
                SubmissionError::SendFailed(_) | SubmissionError::UnexpectedError(_) => {
                    tracing::error!(
                        error.cause_chain = ?e,
                        error.message = %e,
                        "Failed to process the form submission"
                    )
                }
                _ => tracing::info!(error.message = %e, "Form submission rejected"),
            }
            e.outcome()
        }
    };
    tracing::Span::current().record("outcome", &tracing::field::display(outcome));

    found(&outcome.redirect_location(origin))
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}

async fn process_submission(
    form: Result<FormFields, actix_web::Error>,
    email_sender: &dyn EmailSender,
    form_settings: &FormSettings,
) -> Result<(), SubmissionError> {
    let pairs = form
        .map_err(|e| anyhow::anyhow!("Failed to decode the form body: {}", e))?
        .into_inner();
    let submission = Submission::from_pairs(pairs);

    let reply_to = screen(&submission, form_settings.kind)?;
    let notification = form_settings.kind.notification(
        &submission,
        reply_to,
        &form_settings.site_name,
        Utc::now(),
    );
    email_sender.send(&notification).await?;
    Ok(())
}

/// Runs the checks that happen before anything is sent, in order: honeypot,
/// required fields, email format. Returns the submitter's address.
fn screen(submission: &Submission, kind: FormKind) -> Result<EmailAddress, SubmissionError> {
    if submission.is_spam() {
        return Err(SubmissionError::Spam);
    }

    let missing = submission.missing(kind.required_fields());
    if !missing.is_empty() {
        return Err(SubmissionError::MissingFields(missing));
    }

    let email = submission.get("email").unwrap_or_default().to_string();
    EmailAddress::parse(email).map_err(SubmissionError::InvalidEmail)
}
