use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::{EmailAddress, Notification, Submission};

/// Which of the site's forms this instance serves.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Partnership,
    Contact,
}

impl FormKind {
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            FormKind::Partnership => &[
                "company_name_chinese",
                "company_name_english",
                "email",
                "support_needed",
            ],
            FormKind::Contact => &["name", "email", "message"],
        }
    }

    /// Fields the message template lays out under their own headings.
    fn template_fields(&self) -> &'static [&'static str] {
        match self {
            FormKind::Partnership => &[
                "company_name_chinese",
                "company_name_english",
                "segment",
                "year_established",
                "phone",
                "email",
                "website_social",
                "exports_to_brazil",
                "main_products_brazil",
                "challenges_brazil",
                "support_needed",
                "language",
            ],
            FormKind::Contact => &[
                "name",
                "email",
                "phone",
                "wechat",
                "company",
                "business_type",
                "products",
                "message",
                "language",
            ],
        }
    }

    fn display_name_field(&self) -> &'static str {
        match self {
            FormKind::Partnership => "company_name_english",
            FormKind::Contact => "name",
        }
    }

    pub fn subject(&self, submission: &Submission, site_name: &str) -> String {
        let display_name = field(submission, self.display_name_field(), "Unknown");
        match self {
            FormKind::Partnership => {
                format!("New Partnership: {} - {}", display_name, site_name)
            }
            FormKind::Contact => format!("New Contact: {} - {}", display_name, site_name),
        }
    }

    pub fn text_body(
        &self,
        submission: &Submission,
        site_name: &str,
        submitted_at: DateTime<Utc>,
    ) -> String {
        let details = match self {
            FormKind::Partnership => partnership_details(submission),
            FormKind::Contact => contact_details(submission),
        };
        let details = details + &additional_fields(submission, self.template_fields());
        let footer = match self {
            FormKind::Partnership => "Partnership Form",
            FormKind::Contact => "Contact Form",
        };
        format!(
            "{details}\n\n\
             Metadata:\n\
             ---------\n\
             Language: {language}\n\
             Submitted from: {page_url}\n\
             User Agent: {user_agent}\n\
             Timestamp: {timestamp}\n\
             \n\
             ---\n\
             Sent via {site_name} {footer}",
            details = details,
            language = field(submission, "language", "en"),
            page_url = field(submission, "_page_url", "Unknown"),
            user_agent = field(submission, "_user_agent", "Unknown"),
            timestamp = submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            site_name = site_name,
            footer = footer,
        )
    }

    /// Builds the email the site owner receives for a validated submission.
    pub fn notification(
        &self,
        submission: &Submission,
        reply_to: EmailAddress,
        site_name: &str,
        submitted_at: DateTime<Utc>,
    ) -> Notification {
        Notification {
            subject: self.subject(submission, site_name),
            text_body: self.text_body(submission, site_name, submitted_at),
            reply_to,
            reply_to_name: submission
                .non_blank(self.display_name_field())
                .map(str::to_string),
        }
    }
}

fn field<'a>(submission: &'a Submission, name: &str, fallback: &'a str) -> &'a str {
    submission.non_blank(name).unwrap_or(fallback)
}

/// Lists submitted fields the template has no slot for. Underscore-prefixed
/// fields are form plumbing and stay out.
fn additional_fields(submission: &Submission, template_fields: &[&str]) -> String {
    let lines: Vec<String> = submission
        .iter()
        .filter(|(name, value)| {
            !name.starts_with('_') && !template_fields.contains(name) && !value.trim().is_empty()
        })
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect();
    if lines.is_empty() {
        return String::new();
    }
    format!(
        "\n\nAdditional Fields:\n------------------\n{}",
        lines.join("\n")
    )
}

fn partnership_details(submission: &Submission) -> String {
    format!(
        "New Partnership Form Submission\n\
         ================================\n\
         \n\
         Company Information:\n\
         -------------------\n\
         Company Name (Chinese): {company_name_chinese}\n\
         Company Name (English): {company_name_english}\n\
         Segment(s): {segment}\n\
         Year Established: {year_established}\n\
         \n\
         Contact Information:\n\
         -------------------\n\
         Primary Phone: {phone}\n\
         Primary Email: {email}\n\
         Website/Social: {website_social}\n\
         \n\
         Export Information:\n\
         ------------------\n\
         Already exports to Brazil: {exports_to_brazil}\n\
         Main products exported: {main_products_brazil}\n\
         \n\
         Challenges & Support:\n\
         --------------------\n\
         Challenges in Brazil: {challenges_brazil}\n\
         \n\
         Support Needed:\n\
         {support_needed}",
        company_name_chinese = field(submission, "company_name_chinese", ""),
        company_name_english = field(submission, "company_name_english", ""),
        segment = field(submission, "segment", "Not specified"),
        year_established = field(submission, "year_established", "Not specified"),
        phone = field(submission, "phone", "Not provided"),
        email = field(submission, "email", ""),
        website_social = field(submission, "website_social", "Not provided"),
        exports_to_brazil = field(submission, "exports_to_brazil", "Not specified"),
        main_products_brazil = field(submission, "main_products_brazil", "N/A"),
        challenges_brazil = field(submission, "challenges_brazil", "Not specified"),
        support_needed = field(submission, "support_needed", ""),
    )
}

fn contact_details(submission: &Submission) -> String {
    format!(
        "New Contact Form Submission\n\
         ===========================\n\
         \n\
         Contact Information:\n\
         -------------------\n\
         Name/Company: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         WeChat: {wechat}\n\
         Company: {company}\n\
         \n\
         Business Details:\n\
         ----------------\n\
         Business Type: {business_type}\n\
         Products of Interest: {products}\n\
         \n\
         Message:\n\
         --------\n\
         {message}",
        name = field(submission, "name", ""),
        email = field(submission, "email", ""),
        phone = field(submission, "phone", "Not provided"),
        wechat = field(submission, "wechat", "Not provided"),
        company = field(submission, "company", "Not provided"),
        business_type = field(submission, "business_type", "Not specified"),
        products = field(submission, "products", "Not specified"),
        message = field(submission, "message", ""),
    )
}
