mod entities;
mod errors;
mod outcome;
mod ports;
mod view;

// Re-export the domain boundary types and ports.
pub use entities::{BigFiveTrait, PersonalityResult, SubmissionPayload};
pub use errors::{
    BACKEND_UNREACHABLE_MESSAGE, MALFORMED_RESPONSE_MESSAGE, SubmitError,
    VERIFICATION_MISSING_MESSAGE,
};
pub use outcome::ResponseOutcome;
pub use ports::{ApiResponse, Page, PersonalityApi, VerificationWidget};
pub use view::{ResultHeader, ResultView, ScoreView, percent_text};
