use snafu::Snafu;

/// Shown when the service rejects a request without a readable `detail`.
pub const SERVER_FALLBACK_MESSAGE: &str = "Failed to get response from AI.";
/// Shown for every failure that carries no server-provided explanation.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TransportError {
    #[snafu(display("chat endpoint '{endpoint}' is not a valid URL: {details}"))]
    InvalidEndpoint {
        stage: &'static str,
        endpoint: String,
        details: String,
    },
    #[snafu(display("failed to build http client on `{stage}`: {source}"))]
    BuildClient {
        stage: &'static str,
        source: reqwest::Error,
    },
    #[snafu(display("chat request failed on `{stage}`: {source}"))]
    Network {
        stage: &'static str,
        source: reqwest::Error,
    },
    #[snafu(display("chat endpoint returned status {status}: {}", detail.as_deref().unwrap_or("<no detail>")))]
    ServerStatus {
        stage: &'static str,
        status: u16,
        detail: Option<String>,
    },
    #[snafu(display("chat endpoint returned an unreadable payload: {details}"))]
    MalformedResponse {
        stage: &'static str,
        details: String,
    },
    #[snafu(display("chat request was interrupted on `{stage}`: {details}"))]
    Interrupted {
        stage: &'static str,
        details: String,
    },
}

impl TransportError {
    /// Text suitable for a toast. All variants collapse to one sentence.
    pub fn user_message(&self) -> String {
        match self {
            Self::ServerStatus {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::ServerStatus { detail: None, .. } => SERVER_FALLBACK_MESSAGE.to_string(),
            Self::InvalidEndpoint { .. }
            | Self::BuildClient { .. }
            | Self::Network { .. }
            | Self::MalformedResponse { .. }
            | Self::Interrupted { .. } => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidEndpoint { stage, .. }
            | Self::BuildClient { stage, .. }
            | Self::Network { stage, .. }
            | Self::ServerStatus { stage, .. }
            | Self::MalformedResponse { stage, .. }
            | Self::Interrupted { stage, .. } => stage,
        }
    }
}

pub type TransportResult<T> = Result<T, TransportError>;
