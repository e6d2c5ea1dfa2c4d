use reqwest::Client;

use super::fault::AdvisoryError;
use super::prompt;
use crate::client::openai::v1::chat::completions::{self, Request};
use crate::types::advisory::AdvisoryResult;

pub struct Generator<'a> {
    pub client: &'a Client,
    pub base_url: &'a str,
    pub model: &'a str,
    pub max_excerpt_chars: usize,
}

impl Generator<'_> {
    pub async fn generate(
        &self,
        api_key: &str,
        excerpt: &str,
    ) -> Result<AdvisoryResult, AdvisoryError> {
        let user = prompt::build(excerpt, self.max_excerpt_chars);
        let request = Request::json_object(self.model, prompt::SYSTEM, &user);

        let response = completions::post(self.client, self.base_url, api_key, &request).await?;
        let content = response
            .first_content()
            .ok_or(AdvisoryError::EmptyCompletion)?;

        parse(content)
    }
}

/// Reads the model's JSON answer. Both fields must be present and be strings.
pub fn parse(content: &str) -> Result<AdvisoryResult, AdvisoryError> {
    serde_json::from_str(content).map_err(AdvisoryError::MalformedAdvisory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_fields_verbatim() {
        let result = parse(
            r#"{"fixes":"Update to v2.3.1.","workarounds":"Disable the affected plugin until patched."}"#,
        )
        .unwrap();

        assert_eq!(
            result,
            AdvisoryResult::new(
                "Update to v2.3.1.",
                "Disable the affected plugin until patched."
            )
        );
    }

    #[test]
    fn ignores_extra_fields() {
        let result =
            parse(r#"{"fixes":"none","workarounds":"none","severity":"high"}"#).unwrap();

        assert_eq!(result, AdvisoryResult::new("none", "none"));
    }

    #[test]
    fn rejects_incomplete_or_mistyped_answers() {
        let answers = [
            "",
            "Update to v2.3.1.",
            "{}",
            r#"{"fixes":"Update to v2.3.1."}"#,
            r#"{"workarounds":"none"}"#,
            r#"{"fixes":null,"workarounds":"none"}"#,
            r#"{"fixes":["a"],"workarounds":"none"}"#,
            r#"["fixes","workarounds"]"#,
        ];

        for answer in answers {
            assert!(
                matches!(parse(answer), Err(AdvisoryError::MalformedAdvisory(_))),
                "{answer:?} should be rejected"
            );
        }
    }
}
