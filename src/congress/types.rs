//! Data types for Congress.gov API responses.
//!
//! Only the fields the aggregator reads are modelled; list items are kept
//! as raw JSON and passed through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response from the bill list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillsResponse {
    #[serde(default)]
    pub bills: Vec<Value>,
}

/// Response from the bill metadata endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillResponse {
    pub bill: BillMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillMetadata {
    pub title: Option<String>,
    #[serde(default)]
    pub sponsors: Vec<Sponsor>,
    pub introduced_date: Option<String>,
    pub latest_action: Option<Value>,
    /// Either an inline list or a `{count, url}` reference, depending on the endpoint.
    pub cosponsors: Option<Value>,
}

impl BillMetadata {
    pub fn sponsor_name(&self) -> String {
        self.sponsors
            .first()
            .and_then(|s| s.full_name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn cosponsor_count(&self) -> u64 {
        match &self.cosponsors {
            Some(Value::Array(list)) => list.len() as u64,
            Some(Value::Object(reference)) => reference
                .get("count")
                .and_then(Value::as_u64)
                .unwrap_or(0),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    pub full_name: Option<String>,
    pub bioguide_id: Option<String>,
    pub party: Option<String>,
    pub state: Option<String>,
}

/// Response from the bill text endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextResponse {
    #[serde(default)]
    pub text_versions: Vec<TextVersion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextVersion {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub text: Option<TextBody>,
    #[serde(default)]
    pub formats: Vec<TextFormat>,
}

impl TextVersion {
    pub fn inline_content(&self) -> Option<&str> {
        self.text
            .as_ref()
            .and_then(|t| t.content.as_deref())
            .filter(|c| !c.trim().is_empty())
    }

    pub fn formatted_text_url(&self) -> Option<&str> {
        self.formats
            .iter()
            .find(|f| f.kind == "Formatted Text")
            .map(|f| f.url.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextBody {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextFormat {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sponsor_defaults_to_unknown() {
        let bill: BillMetadata = serde_json::from_value(json!({"title": "A bill"})).unwrap();
        assert_eq!(bill.sponsor_name(), "Unknown");

        let bill: BillMetadata = serde_json::from_value(json!({"sponsors": [{}]})).unwrap();
        assert_eq!(bill.sponsor_name(), "Unknown");
    }

    #[test]
    fn first_sponsor_is_used() {
        let bill: BillMetadata = serde_json::from_value(json!({
            "sponsors": [
                {"fullName": "Rep. Smith, Jane [D-CA-12]"},
                {"fullName": "Rep. Doe, John [R-TX-1]"}
            ]
        }))
        .unwrap();
        assert_eq!(bill.sponsor_name(), "Rep. Smith, Jane [D-CA-12]");
    }

    #[test]
    fn cosponsor_count_from_list_or_reference() {
        let absent: BillMetadata = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.cosponsor_count(), 0);

        let list: BillMetadata =
            serde_json::from_value(json!({"cosponsors": [{"fullName": "a"}, {"fullName": "b"}]})).unwrap();
        assert_eq!(list.cosponsor_count(), 2);

        let reference: BillMetadata =
            serde_json::from_value(json!({"cosponsors": {"count": 14, "url": "https://x"}})).unwrap();
        assert_eq!(reference.cosponsor_count(), 14);
    }

    #[test]
    fn text_version_accessors() {
        let version: TextVersion = serde_json::from_value(json!({
            "type": "Introduced in House",
            "text": {"content": "   "},
            "formats": [
                {"type": "PDF", "url": "https://example.test/b.pdf"},
                {"type": "Formatted Text", "url": "https://example.test/b.htm"}
            ]
        }))
        .unwrap();

        assert_eq!(version.inline_content(), None);
        assert_eq!(version.formatted_text_url(), Some("https://example.test/b.htm"));
    }
}
