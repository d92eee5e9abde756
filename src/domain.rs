mod email_address;
mod form_kind;
mod notification;
mod outcome;
mod submission;

pub use email_address::EmailAddress;
pub use form_kind::FormKind;
pub use notification::Notification;
pub use outcome::Outcome;
pub use submission::Submission;
