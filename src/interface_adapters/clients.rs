use crate::domain::{ApiResponse, PersonalityApi, SubmissionPayload};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use std::fmt;
use url::Url;

// Route of the prediction endpoint, resolved against the configured origin.
pub const PERSONALITY_PATH: &str = "/api/personality";

// Thin wrapper around reqwest for the personality endpoint.
#[derive(Clone)]
pub struct PersonalityClient {
    http: Client,
    endpoint: Url,
}

#[derive(Debug)]
pub enum PersonalityClientError {
    InvalidUrl(url::ParseError),
    Transport(reqwest::Error),
    Body(reqwest::Error),
}

impl fmt::Display for PersonalityClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonalityClientError::InvalidUrl(err) => write!(f, "invalid api url: {err}"),
            PersonalityClientError::Transport(err) => write!(f, "personality transport error: {err}"),
            PersonalityClientError::Body(err) => write!(f, "personality body read error: {err}"),
        }
    }
}

impl std::error::Error for PersonalityClientError {}

impl PersonalityClient {
    pub fn new(base_url: &str) -> Result<Self, PersonalityClientError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(PERSONALITY_PATH))
            .map_err(PersonalityClientError::InvalidUrl)?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PersonalityApi for PersonalityClient {
    async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<ApiResponse, Box<dyn std::error::Error + Send + Sync>> {
        // POST the JSON payload; `json` also sets the content type.
        let res = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(PersonalityClientError::Transport)?;
        let status = res.status().as_u16();

        // Hand every status back; the flow decides what it means.
        let body = res.bytes().await.map_err(PersonalityClientError::Body)?;
        tracing::debug!(status, bytes = body.len(), "personality response received.");

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}
