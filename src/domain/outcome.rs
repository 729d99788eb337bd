// Classification of an endpoint response by HTTP status alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Success,
    // 400: the body carries a message meant for the user.
    UserInputError,
    // 502 from the proxy or 404 when the API route is not mounted.
    BackendUnreachable,
    OtherFailure(u16),
}

impl ResponseOutcome {
    pub fn classify(status: u16) -> Self {
        match status {
            200..=299 => ResponseOutcome::Success,
            400 => ResponseOutcome::UserInputError,
            404 | 502 => ResponseOutcome::BackendUnreachable,
            other => ResponseOutcome::OtherFailure(other),
        }
    }
}
