use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    ApiResponse, Page, PersonalityApi, ResultHeader, ScoreView, SubmissionPayload,
    VerificationWidget,
};

// Every UI update the flow performed, in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PageEvent {
    SubmitVisible(bool),
    ConsentAccepted,
    ConsentFlagged,
    ScriptLoaded(String),
    Loading(bool),
    Results(bool),
    Score(ScoreView),
    Header(ResultHeader),
    Alert(String),
}

#[derive(Default)]
struct PageLog {
    handle: String,
    handle_reads: usize,
    events: Vec<PageEvent>,
}

// Page fake that records updates so tests can assert on them after the flow ran.
#[derive(Clone, Default)]
pub(crate) struct RecordingPage {
    log: Arc<Mutex<PageLog>>,
}

impl RecordingPage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_handle(self, handle: &str) -> Self {
        self.set_handle(handle);
        self
    }

    pub(crate) fn set_handle(&self, handle: &str) {
        let mut guard = self.log.lock().expect("page mutex poisoned");
        guard.handle = handle.to_string();
    }

    pub(crate) fn events(&self) -> Vec<PageEvent> {
        self.log.lock().expect("page mutex poisoned").events.clone()
    }

    pub(crate) fn handle_reads(&self) -> usize {
        self.log.lock().expect("page mutex poisoned").handle_reads
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PageEvent::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn scripts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PageEvent::ScriptLoaded(src) => Some(src),
                _ => None,
            })
            .collect()
    }

    // Last known state of the loading indicator (hidden until first shown).
    pub(crate) fn loading_visible(&self) -> bool {
        self.events()
            .iter()
            .rev()
            .find_map(|event| match event {
                PageEvent::Loading(visible) => Some(*visible),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub(crate) fn results_visible(&self) -> bool {
        self.events()
            .iter()
            .rev()
            .find_map(|event| match event {
                PageEvent::Results(visible) => Some(*visible),
                _ => None,
            })
            .unwrap_or(false)
    }

    fn push(&self, event: PageEvent) {
        let mut guard = self.log.lock().expect("page mutex poisoned");
        guard.events.push(event);
    }
}

impl Page for RecordingPage {
    fn handle_input(&self) -> String {
        let mut guard = self.log.lock().expect("page mutex poisoned");
        guard.handle_reads += 1;
        guard.handle.clone()
    }

    fn set_submit_visible(&self, visible: bool) {
        self.push(PageEvent::SubmitVisible(visible));
    }

    fn mark_consent_accepted(&self) {
        self.push(PageEvent::ConsentAccepted);
    }

    fn flag_consent_required(&self) {
        self.push(PageEvent::ConsentFlagged);
    }

    fn load_script(&self, src: &str) {
        self.push(PageEvent::ScriptLoaded(src.to_string()));
    }

    fn set_loading_visible(&self, visible: bool) {
        self.push(PageEvent::Loading(visible));
    }

    fn set_results_visible(&self, visible: bool) {
        self.push(PageEvent::Results(visible));
    }

    fn render_score(&self, score: &ScoreView) {
        self.push(PageEvent::Score(score.clone()));
    }

    fn render_header(&self, header: &ResultHeader) {
        self.push(PageEvent::Header(header.clone()));
    }

    fn alert(&self, message: &str) {
        self.push(PageEvent::Alert(message.to_string()));
    }
}

// Widget fake whose token tests can change between submits.
#[derive(Clone, Default)]
pub(crate) struct ScriptedWidget {
    token: Arc<Mutex<String>>,
}

impl ScriptedWidget {
    pub(crate) fn solved(token: &str) -> Self {
        let widget = Self::default();
        widget.set_token(token);
        widget
    }

    pub(crate) fn set_token(&self, token: &str) {
        let mut guard = self.token.lock().expect("token mutex poisoned");
        *guard = token.to_string();
    }
}

impl VerificationWidget for ScriptedWidget {
    fn response_token(&self) -> String {
        self.token.lock().expect("token mutex poisoned").clone()
    }
}

#[derive(Clone)]
pub(crate) enum Reply {
    Respond(ApiResponse),
    Fail(&'static str),
    // Never settles, for exercising the timeout.
    Hang,
}

// Endpoint fake returning one canned reply and recording every payload.
#[derive(Clone)]
pub(crate) struct ScriptedApi {
    reply: Reply,
    requests: Arc<Mutex<Vec<SubmissionPayload>>>,
}

impl ScriptedApi {
    pub(crate) fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn responding(status: u16, body: serde_json::Value) -> Self {
        Self::new(Reply::Respond(ApiResponse {
            status,
            body: body.to_string().into_bytes(),
        }))
    }

    pub(crate) fn requests(&self) -> Vec<SubmissionPayload> {
        self.requests.lock().expect("requests mutex poisoned").clone()
    }
}

#[async_trait]
impl PersonalityApi for ScriptedApi {
    async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<ApiResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(payload.clone());

        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Fail(message) => Err((*message).into()),
            Reply::Hang => std::future::pending().await,
        }
    }
}
