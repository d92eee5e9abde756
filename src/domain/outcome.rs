/// The terminal classification of a single form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    MissingFields,
    InvalidEmail,
    SendFailed,
    Spam,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::MissingFields => "missing_fields",
            Outcome::InvalidEmail => "invalid_email",
            Outcome::SendFailed => "send_failed",
            Outcome::Spam => "spam",
        }
    }

    /// The query string the front-end page reads on load.
    pub fn query_param(&self) -> String {
        match self {
            Outcome::Success => "submitted=true".to_string(),
            failure => format!("error={}", failure.as_str()),
        }
    }

    /// Where to send the browser back to: the submitting origin, or the site
    /// root when the request carried no `Origin`.
    pub fn redirect_location(&self, origin: Option<&str>) -> String {
        let origin = origin
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .unwrap_or("/");
        format!("{}?{}", origin, self.query_param())
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
