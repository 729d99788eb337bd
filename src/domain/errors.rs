use std::fmt;
use std::time::Duration;

pub const VERIFICATION_MISSING_MESSAGE: &str = "Please verify you are human.";
pub const BACKEND_UNREACHABLE_MESSAGE: &str = "Backend unreachable. Please try again later.";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Unexpected response from backend.";

// Ways a submit attempt can end without a rendered result.
// `Display` yields the exact text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    // Agree action not taken yet; only a visual nudge, no alert.
    ConsentMissing,
    VerificationMissing,
    // Covers both the timer winning the race and transport failures.
    Timeout(Duration),
    UserInput(String),
    BackendUnreachable,
    UnexpectedStatus(u16),
    MalformedResponse,
}

impl SubmitError {
    // Whether this error is surfaced through the page alert.
    pub fn alerts_user(&self) -> bool {
        !matches!(self, SubmitError::ConsentMissing)
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::ConsentMissing => write!(f, "terms not accepted"),
            SubmitError::VerificationMissing => f.write_str(VERIFICATION_MISSING_MESSAGE),
            SubmitError::Timeout(limit) => {
                write!(f, "Timeout after {} seconds", limit.as_secs_f64())
            }
            SubmitError::UserInput(message) => f.write_str(message),
            SubmitError::BackendUnreachable => f.write_str(BACKEND_UNREACHABLE_MESSAGE),
            SubmitError::UnexpectedStatus(status) => write!(
                f,
                "Request failed with status {status}. Please try again later."
            ),
            SubmitError::MalformedResponse => f.write_str(MALFORMED_RESPONSE_MESSAGE),
        }
    }
}

impl std::error::Error for SubmitError {}
