//! Wire types for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct RequestContent {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Clone)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

impl GenerateContentRequest {
    /// A single-turn request carrying `text` as its only content part.
    pub fn single_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![Part { text: text.into() }],
            }],
        }
    }
}

/// A content part as returned by the API. Parts without text (inline data,
/// function calls) deserialize with `text: None`.
#[derive(Debug, Deserialize, Default)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<ResponseContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Text of the first candidate's first part, if present and non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }

    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_single_part_shape() {
        let body = serde_json::to_string(&GenerateContentRequest::single_text("hi")).unwrap();
        assert_eq!(body, r#"{"contents":[{"parts":[{"text":"hi"}]}]}"#);
    }

    #[test]
    fn first_text_reads_first_candidate_first_part() {
        let raw = r#"{"candidates":[
            {"content":{"parts":[{"text":"hello"},{"text":"ignored"}]}},
            {"content":{"parts":[{"text":"second"}]}}
        ]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_text(), Some("hello"));
    }

    #[test]
    fn missing_pieces_yield_no_text() {
        for raw in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#,
        ] {
            let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
            assert_eq!(response.first_text(), None, "raw={raw}");
        }
    }

    #[test]
    fn block_reason_is_exposed() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.block_reason(), Some("SAFETY"));
        assert!(response.first_text().is_none());
    }

    #[test]
    fn wrongly_typed_fields_fail_to_parse() {
        let raw = r#"{"candidates":"nope"}"#;
        assert!(serde_json::from_str::<GenerateContentResponse>(raw).is_err());
    }
}
