//! Plain reqwest client: fallback selection needs the upstream HTTP status and
//! error `code`, which rig-core's provider errors do not keep.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GPT_4O_MINI: &str = "gpt-4o-mini";

const MAX_ERROR_MESSAGE_CHARS: usize = 512;

#[derive(Debug, Serialize)]
pub struct Request<'a> {
    pub model: &'a str,
    pub messages: Vec<Message<'a>>,
    pub response_format: ResponseFormat,
}

impl<'a> Request<'a> {
    /// A system + user exchange that must be answered with a JSON object.
    pub fn json_object(model: &'a str, system: &'a str, user: &'a str) -> Self {
        Self {
            model,
            messages: vec![
                Message {
                    role: Role::System,
                    content: system,
                },
                Message {
                    role: Role::User,
                    content: user,
                },
            ],
            response_format: ResponseFormat::JsonObject,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: Role,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonObject,
}

#[derive(Debug, Deserialize)]
pub struct Response {
    pub choices: Vec<Choice>,
}

impl Response {
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first()?.message.content.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("chat completion request failed")]
    Transport(#[from] reqwest::Error),
    #[error("chat completion rejected with {status}: {message}")]
    Api {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },
}

pub async fn post(
    client: &Client,
    base_url: &str,
    api_key: &str,
    request: &Request<'_>,
) -> Result<Response, Error> {
    let response = client
        .post(format!("{}/chat/completions", base_url.trim_end_matches('/')))
        .bearer_auth(api_key)
        .json(request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        let (code, message) = error_details(&body);

        return Err(Error::Api {
            status,
            code,
            message,
        });
    }

    Ok(response.json::<Response>().await?)
}

/// Pulls `code` and `message` out of an error body; non-JSON bodies become the message.
fn error_details(body: &str) -> (Option<String>, String) {
    let (code, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.code, envelope.error.message.unwrap_or_default()),
        Err(_) => (None, body.to_string()),
    };

    (code, message.chars().take(MAX_ERROR_MESSAGE_CHARS).collect())
}
