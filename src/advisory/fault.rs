use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::client::openai::v1::chat::completions;
use crate::types::advisory::AdvisoryResult;

/// Everything that can go wrong between receiving a request and answering it.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("API key not provided")]
    MissingCredential,
    #[error("request body could not be read")]
    UnreadableBody(#[source] BytesRejection),
    #[error("request body is not a valid advisory request")]
    InvalidRequest(#[source] serde_json::Error),
    #[error("CVE url missing or not a string")]
    MissingUrl,
    #[error("invalid CVE url `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to fetch CVE page")]
    Fetch(#[source] reqwest::Error),
    #[error(transparent)]
    Completion(#[from] completions::Error),
    #[error("completion contained no message content")]
    EmptyCompletion,
    #[error("completion is not a valid advisory")]
    MalformedAdvisory(#[source] serde_json::Error),
    #[error("{0} timed out")]
    TimedOut(Stage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Completion,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Fetch => write!(f, "CVE page fetch"),
            Stage::Completion => write!(f, "chat completion"),
        }
    }
}

/// What the caller is told about a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    MissingCredential,
    UpstreamAuthRejected,
    UpstreamQuotaExhausted,
    GenericFailure,
}

impl Fault {
    /// Maps a model provider error, as `(HTTP status, error code)`, to a fault.
    pub fn from_upstream(status: u16, code: Option<&str>) -> Self {
        match (status, code) {
            (401, _) | (_, Some("invalid_api_key")) => Self::UpstreamAuthRejected,
            (429, _) | (_, Some("insufficient_quota")) => Self::UpstreamQuotaExhausted,
            _ => Self::GenericFailure,
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::UpstreamAuthRejected => StatusCode::UNAUTHORIZED,
            Self::UpstreamQuotaExhausted => StatusCode::TOO_MANY_REQUESTS,
            Self::GenericFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn fallback(self) -> AdvisoryResult {
        match self {
            Self::MissingCredential => AdvisoryResult::new(
                "API key not found. Please add your OpenAI API key.",
                "Please check the CVE details for manual workarounds.",
            ),
            Self::UpstreamAuthRejected => AdvisoryResult::new(
                "Invalid API key. Please enter a valid OpenAI API key.",
                "Get your API key from https://platform.openai.com/account/api-keys",
            ),
            Self::UpstreamQuotaExhausted => AdvisoryResult::new(
                "Your API key has no credits left.",
                "Please add billing details or purchase credits at https://platform.openai.com/account/billing",
            ),
            Self::GenericFailure => AdvisoryResult::new(
                "Unable to generate fix suggestions at this time.",
                "Please check the CVE details for manual workarounds.",
            ),
        }
    }
}

impl AdvisoryError {
    /// The error and all of its sources, outermost first, joined by `: `.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            report.push_str(": ");
            report.push_str(&cause.to_string());
            source = cause.source();
        }

        report
    }

    pub fn fault(&self) -> Fault {
        match self {
            Self::MissingCredential => Fault::MissingCredential,
            Self::Completion(completions::Error::Api { status, code, .. }) => {
                Fault::from_upstream(status.as_u16(), code.as_deref())
            }
            Self::UnreadableBody(_)
            | Self::InvalidRequest(_)
            | Self::MissingUrl
            | Self::InvalidUrl { .. }
            | Self::Fetch(_)
            | Self::Completion(completions::Error::Transport(_))
            | Self::EmptyCompletion
            | Self::MalformedAdvisory(_)
            | Self::TimedOut(_) => Fault::GenericFailure,
        }
    }
}
