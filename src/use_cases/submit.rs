use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{
    ApiResponse, Page, PersonalityApi, PersonalityResult, ResponseOutcome, ResultView,
    SubmissionPayload, SubmitError, VerificationWidget,
};
use crate::use_cases::consent::ConsentGate;

// Body of a 400 reply.
#[derive(Debug, Deserialize)]
struct UserInputErrorBody {
    message: String,
}

// Settings the flow needs from configuration.
#[derive(Debug, Clone)]
pub struct SubmitSettings {
    // Upper bound on waiting for the endpoint.
    pub timeout: Duration,
    // Script that brings up the verification widget once consent is given.
    pub verification_script_url: String,
    // Prefix joined with the user name for the header link.
    pub profile_base_url: String,
}

// Stand-in for the browser submit event: tracks whether the default
// form submission was cancelled.
#[derive(Debug, Default)]
pub struct FormSubmission {
    default_prevented: bool,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

// Consent-gated submit flow with injected page, widget and endpoint.
pub struct SubmitFlow<P, W, A> {
    pub page: P,
    pub widget: W,
    pub api: A,
    pub settings: SubmitSettings,
    consent: ConsentGate,
}

impl<P, W, A> SubmitFlow<P, W, A>
where
    P: Page,
    W: VerificationWidget,
    A: PersonalityApi,
{
    pub fn new(page: P, widget: W, api: A, settings: SubmitSettings) -> Self {
        Self {
            page,
            widget,
            api,
            settings,
            consent: ConsentGate::new(),
        }
    }

    pub fn has_consent(&self) -> bool {
        self.consent.is_given()
    }

    // Agree action. Only the first call touches the page; always acknowledges.
    pub fn agree(&self) -> bool {
        if self.consent.give() {
            self.page.set_submit_visible(true);
            self.page.mark_consent_accepted();
            self.page.load_script(&self.settings.verification_script_url);
            tracing::info!(
                script = %self.settings.verification_script_url,
                "consent given, verification widget requested."
            );
        }
        true
    }

    // Form submit handler. The default submission is cancelled on every branch.
    pub async fn on_submit(&self, event: &mut FormSubmission) -> Result<ResultView, SubmitError> {
        event.prevent_default();

        if !self.consent.is_given() {
            self.page.flag_consent_required();
            tracing::debug!("submit ignored until consent is given.");
            return Err(SubmitError::ConsentMissing);
        }

        self.page.set_results_visible(false);

        let token = self.widget.response_token();
        if token.is_empty() {
            let err = SubmitError::VerificationMissing;
            tracing::info!("submit blocked, verification not completed.");
            self.page.alert(&err.to_string());
            return Err(err);
        }

        self.page.set_loading_visible(true);
        self.submit(token).await
    }

    // Sends the form and renders whatever comes back. The handle is read here,
    // not earlier, so edits made after the submit click are picked up.
    #[tracing::instrument(name = "submit", skip_all)]
    pub async fn submit(&self, token: String) -> Result<ResultView, SubmitError> {
        let payload = SubmissionPayload {
            identifier: self.page.handle_input(),
            verification_token: token,
        };
        tracing::debug!(handle = %payload.identifier, "sending submission.");

        match self.request(&payload).await {
            Ok(view) => {
                tracing::info!(handle = %payload.identifier, "personality received.");
                self.show_result(&view);
                Ok(view)
            }
            Err(err) => {
                self.show_error(&err.to_string());
                Err(err)
            }
        }
    }

    pub fn show_result(&self, view: &ResultView) {
        for score in &view.scores {
            self.page.render_score(score);
        }
        self.page.render_header(&view.header);
        self.page.set_loading_visible(false);
        self.page.set_results_visible(true);
    }

    pub fn show_error(&self, message: &str) {
        self.page.set_loading_visible(false);
        self.page.set_results_visible(false);
        tracing::warn!(%message, "submission failed.");
        self.page.alert(message);
    }

    async fn request(&self, payload: &SubmissionPayload) -> Result<ResultView, SubmitError> {
        let limit = self.settings.timeout;

        // Dropping the request future on timeout aborts the transfer.
        let response = match tokio::time::timeout(limit, self.api.submit(payload)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "submission transport failed.");
                return Err(SubmitError::Timeout(limit));
            }
            Err(_) => {
                tracing::warn!(timeout_ms = limit.as_millis() as u64, "submission timed out.");
                return Err(SubmitError::Timeout(limit));
            }
        };

        match ResponseOutcome::classify(response.status) {
            ResponseOutcome::Success => {
                let result: PersonalityResult = decode(&response)?;
                Ok(ResultView::from_result(
                    &result,
                    &self.settings.profile_base_url,
                ))
            }
            ResponseOutcome::UserInputError => {
                let body: UserInputErrorBody = decode(&response)?;
                Err(SubmitError::UserInput(body.message))
            }
            ResponseOutcome::BackendUnreachable => Err(SubmitError::BackendUnreachable),
            ResponseOutcome::OtherFailure(status) => Err(SubmitError::UnexpectedStatus(status)),
        }
    }
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, SubmitError> {
    serde_json::from_slice(&response.body).map_err(|err| {
        tracing::error!(status = response.status, error = %err, "failed to decode response body.");
        SubmitError::MalformedResponse
    })
}
