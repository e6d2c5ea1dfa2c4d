use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound call as posted by the tool pages: `{ "cveUrl": ..., "apiKey": ... }`.
///
/// `cveUrl` is kept as raw JSON so that a mistyped url never hides a
/// missing key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvisoryRequest {
    #[serde(rename = "cveUrl", default)]
    pub source_url: Option<Value>,
    #[serde(rename = "apiKey", default)]
    pub credential: Option<String>,
}

impl AdvisoryRequest {
    pub fn new(source_url: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            source_url: Some(Value::String(source_url.into())),
            credential: Some(credential.into()),
        }
    }

    /// The url, or `None` when it is absent or not a string.
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_ref().and_then(Value::as_str)
    }

    /// The credential, or `None` when it is absent or blank.
    pub fn credential(&self) -> Option<&str> {
        self.credential
            .as_deref()
            .filter(|credential| !credential.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    pub fixes: String,
    pub workarounds: String,
}

impl AdvisoryResult {
    pub fn new(fixes: impl Into<String>, workarounds: impl Into<String>) -> Self {
        Self {
            fixes: fixes.into(),
            workarounds: workarounds.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_names() {
        let request: AdvisoryRequest = serde_json::from_str(
            r#"{"cveUrl":"https://nvd.nist.gov/vuln/detail/CVE-2024-3094","apiKey":"sk-test"}"#,
        )
        .unwrap();

        assert_eq!(
            request.source_url(),
            Some("https://nvd.nist.gov/vuln/detail/CVE-2024-3094")
        );
        assert_eq!(request.credential(), Some("sk-test"));
    }

    #[test]
    fn blank_or_missing_credential_is_none() {
        let missing: AdvisoryRequest = serde_json::from_str(r#"{"cveUrl":"https://a"}"#).unwrap();
        let null: AdvisoryRequest =
            serde_json::from_str(r#"{"cveUrl":"https://a","apiKey":null}"#).unwrap();
        let blank = AdvisoryRequest::new("https://a", "   ");

        assert_eq!(missing.credential(), None);
        assert_eq!(null.credential(), None);
        assert_eq!(blank.credential(), None);
    }

    #[test]
    fn mistyped_url_still_decodes() {
        let request: AdvisoryRequest = serde_json::from_str(r#"{"cveUrl":42}"#).unwrap();

        assert_eq!(request.source_url(), None);
        assert_eq!(request.credential(), None);
    }

    #[test]
    fn result_serializes_exactly_two_fields() {
        let value = serde_json::to_value(AdvisoryResult::new("a", "b")).unwrap();

        assert_eq!(value, serde_json::json!({ "fixes": "a", "workarounds": "b" }));
    }
}
