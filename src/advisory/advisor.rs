use std::future::Future;
use std::time::Duration;

use axum::http::StatusCode;
use reqwest::Client;
use url::Url;

use super::content;
use super::fault::{AdvisoryError, Fault, Stage};
use super::generator::Generator;
use crate::client::cve::page;
use crate::types::advisory::{AdvisoryRequest, AdvisoryResult};

#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_base_url: String,
    pub model: String,
    pub max_excerpt_chars: usize,
    pub fetch_timeout: Option<Duration>,
    pub completion_timeout: Option<Duration>,
}

/// The answer sent back for one request: always a full result and a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: StatusCode,
    pub result: AdvisoryResult,
}

impl Outcome {
    pub fn success(result: AdvisoryResult) -> Self {
        Self {
            status: StatusCode::OK,
            result,
        }
    }

    /// Replaces a failure with its fallback pair and records it for operators.
    pub fn from_error(error: &AdvisoryError) -> Self {
        let fault = error.fault();
        match fault {
            Fault::GenericFailure => {
                tracing::error!(
                    error = %error.report(),
                    ?fault,
                    "failed to generate fix suggestions"
                )
            }
            _ => tracing::warn!(error = %error.report(), ?fault, "fix suggestions refused"),
        }

        Self {
            status: fault.status(),
            result: fault.fallback(),
        }
    }
}

/// Fetch, normalize and summarize a disclosure page. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct Advisor {
    client: Client,
    settings: Settings,
}

impl Advisor {
    pub fn new(client: Client, settings: Settings) -> Self {
        Self { client, settings }
    }

    pub async fn advise(&self, request: &AdvisoryRequest) -> Outcome {
        match self.run(request).await {
            Ok(result) => {
                tracing::info!(
                    url = request.source_url().unwrap_or_default(),
                    "generated fix suggestions"
                );
                Outcome::success(result)
            }
            Err(error) => Outcome::from_error(&error),
        }
    }

    async fn run(&self, request: &AdvisoryRequest) -> Result<AdvisoryResult, AdvisoryError> {
        let api_key = request
            .credential()
            .ok_or(AdvisoryError::MissingCredential)?;
        let url = parse_url(request.source_url())?;

        let html = within(self.settings.fetch_timeout, Stage::Fetch, async {
            page::get(&self.client, &url)
                .await
                .map_err(AdvisoryError::Fetch)
        })
        .await?;
        let excerpt = content::normalize(&html);
        tracing::debug!(%url, chars = excerpt.chars().count(), "normalized advisory page");

        let generator = Generator {
            client: &self.client,
            base_url: &self.settings.openai_base_url,
            model: &self.settings.model,
            max_excerpt_chars: self.settings.max_excerpt_chars,
        };
        within(
            self.settings.completion_timeout,
            Stage::Completion,
            generator.generate(api_key, &excerpt),
        )
        .await
    }
}

fn parse_url(source_url: Option<&str>) -> Result<Url, AdvisoryError> {
    let source_url = source_url.ok_or(AdvisoryError::MissingUrl)?;

    Url::parse(source_url).map_err(|source| AdvisoryError::InvalidUrl {
        url: source_url.to_string(),
        source,
    })
}

async fn within<T>(
    limit: Option<Duration>,
    stage: Stage,
    future: impl Future<Output = Result<T, AdvisoryError>>,
) -> Result<T, AdvisoryError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, future)
            .await
            .map_err(|_| AdvisoryError::TimedOut(stage))?,
        None => future.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_and_relative_urls() {
        assert!(matches!(parse_url(None), Err(AdvisoryError::MissingUrl)));
        assert!(matches!(
            parse_url(Some("/vuln/detail/CVE-2024-3094")),
            Err(AdvisoryError::InvalidUrl { .. })
        ));
        assert!(parse_url(Some("https://nvd.nist.gov/vuln/detail/CVE-2024-3094")).is_ok());
    }

    #[tokio::test]
    async fn elapsed_stage_is_reported() {
        let result: Result<(), _> = within(
            Some(Duration::from_millis(10)),
            Stage::Fetch,
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
        )
        .await;

        assert!(matches!(result, Err(AdvisoryError::TimedOut(Stage::Fetch))));
    }

    #[tokio::test]
    async fn no_limit_waits_for_completion() {
        let result = within(None, Stage::Completion, async { Ok(7) }).await;

        assert_eq!(result.unwrap(), 7);
    }
}
