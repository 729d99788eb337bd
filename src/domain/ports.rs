use async_trait::async_trait;

use crate::domain::entities::SubmissionPayload;
use crate::domain::view::{ResultHeader, ScoreView};

// Raw endpoint reply; classification happens in the use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

// Port for the personality endpoint. Errors are transport-level only:
// any HTTP status, including 5xx, comes back as `Ok`.
#[async_trait]
pub trait PersonalityApi: Send + Sync {
    async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<ApiResponse, Box<dyn std::error::Error + Send + Sync>>;
}

// Port for the human-verification widget.
pub trait VerificationWidget: Send + Sync {
    // Current response token; empty while the challenge is unsolved.
    fn response_token(&self) -> String;
}

// Port for the page hosting the form. Every call is a fire-and-forget UI update
// except `handle_input`, which reads the field as it is right now.
pub trait Page: Send + Sync {
    fn handle_input(&self) -> String;

    fn set_submit_visible(&self, visible: bool);
    // Consent control turns to its accepted look and loses any error border.
    fn mark_consent_accepted(&self);
    // Consent control gets an error border to draw attention.
    fn flag_consent_required(&self);
    fn load_script(&self, src: &str);

    fn set_loading_visible(&self, visible: bool);
    fn set_results_visible(&self, visible: bool);
    fn render_score(&self, score: &ScoreView);
    fn render_header(&self, header: &ResultHeader);

    // Blocking notification to the user.
    fn alert(&self, message: &str);
}
