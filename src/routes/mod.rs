mod health_check;
mod submissions;

pub use health_check::health_check;
pub use submissions::{error_chain_fmt, method_not_allowed, submit_form, SubmissionError};
