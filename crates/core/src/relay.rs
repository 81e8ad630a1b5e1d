//! Wire contract for the conversational-agent webhook relay.
//!
//! The external platform POSTs a `{ "queryResult": { "intent": ...,
//! "parameters": ... } }` payload and expects `{ "fulfillmentText",
//! "fulfillmentMessages" }` back. Both shapes are fixed by the platform;
//! field names are camelCase on the wire.
//!
//! Intents are a closed enum. Names the platform sends that we do not know
//! deserialize to [`Intent::Unknown`], which handlers must match explicitly
//! instead of relying on a silent default branch.

use serde::{Deserialize, Serialize};

/// Known conversational intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    #[serde(rename = "Default Welcome Intent")]
    Welcome,
    #[serde(rename = "packages.overview")]
    PackagesOverview,
    #[serde(rename = "packages.pricing")]
    PackagesPricing,
    #[serde(rename = "briefing.start")]
    BriefingStart,
    #[serde(rename = "preview.status")]
    PreviewStatus,
    #[serde(rename = "handoff.human")]
    HumanHandoff,
    /// Any intent name not listed above.
    #[serde(other)]
    Unknown,
}

impl Intent {
    /// Stable name for logging and the `chatbot` notification payload.
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Welcome => "Default Welcome Intent",
            Intent::PackagesOverview => "packages.overview",
            Intent::PackagesPricing => "packages.pricing",
            Intent::BriefingStart => "briefing.start",
            Intent::PreviewStatus => "preview.status",
            Intent::HumanHandoff => "handoff.human",
            Intent::Unknown => "unknown",
        }
    }
}

/// The `queryResult` object of an incoming relay request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub intent: Intent,
    #[serde(default)]
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

/// Incoming relay request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub query_result: QueryResult,
}

/// A single fulfillment message (the platform accepts a list of them).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentMessage {
    pub text: FulfillmentText,
}

/// Text payload inside a fulfillment message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentText {
    pub text: Vec<String>,
}

/// Outgoing relay response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub fulfillment_text: String,
    pub fulfillment_messages: Vec<FulfillmentMessage>,
}

impl RelayResponse {
    /// Build a response carrying a single text message.
    pub fn text(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            fulfillment_text: message.clone(),
            fulfillment_messages: vec![FulfillmentMessage {
                text: FulfillmentText {
                    text: vec![message],
                },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_intent_deserializes() {
        let body = serde_json::json!({
            "queryResult": {
                "intent": "packages.pricing",
                "parameters": { "package": "single" }
            }
        });
        let req: RelayRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.query_result.intent, Intent::PackagesPricing);
        assert_eq!(
            req.query_result.parameters.get("package").unwrap(),
            "single"
        );
    }

    #[test]
    fn test_unknown_intent_maps_to_unknown_variant() {
        let body = serde_json::json!({
            "queryResult": { "intent": "never.heard.of.it" }
        });
        let req: RelayRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.query_result.intent, Intent::Unknown);
    }

    #[test]
    fn test_missing_query_result_is_an_error() {
        let body = serde_json::json!({ "somethingElse": {} });
        assert!(serde_json::from_value::<RelayRequest>(body).is_err());
    }

    #[test]
    fn test_response_uses_platform_field_names() {
        let resp = RelayResponse::text("olá");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["fulfillmentText"], "olá");
        assert_eq!(json["fulfillmentMessages"][0]["text"]["text"][0], "olá");
    }
}
