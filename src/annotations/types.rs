//! Canonical annotation types
//!
//! Mirrors the nested record returned by the ANNOTA analysis API
//! (`highlighted_text` plus a `nuance_data` payload), extended with the
//! OCR provenance fields the client keeps for bookmarks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier for annotations, scans and OCR results
///
/// The API has used both integer and string identifiers; both deserialize
/// into the same string form so store keys stay uniform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => RecordId(s),
            RawId::Integer(n) => RecordId(n.to_string()),
            RawId::Unsigned(n) => RecordId(n.to_string()),
        })
    }
}

/// The linguistic explanation attached to a highlighted fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuanceData {
    pub meaning: String,
    #[serde(default)]
    pub usage_example: String,
    /// When the phrase is appropriate to use
    #[serde(default)]
    pub usage_timing: String,
    #[serde(default)]
    pub word_breakdown: String,
    #[serde(default)]
    pub alternative_meaning: String,
}

/// A complete annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: RecordId,
    /// Scan the highlighted text was recognized from
    #[serde(default)]
    pub scan_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_result_id: Option<RecordId>,
    pub highlighted_text: String,
    /// Text surrounding the highlight, sent along for disambiguation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_text: Option<String>,
    pub nuance_data: NuanceData,
    /// Model that generated the nuance payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_version: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Annotation {
    /// Create an annotation stamped with the current time
    pub fn new(
        id: impl Into<RecordId>,
        scan_id: impl Into<RecordId>,
        highlighted_text: impl Into<String>,
        nuance_data: NuanceData,
    ) -> Self {
        Self {
            id: id.into(),
            scan_id: scan_id.into(),
            ocr_result_id: None,
            highlighted_text: highlighted_text.into(),
            context_text: None,
            nuance_data,
            model: None,
            prompt_version: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_text = Some(context.into());
        self
    }

    pub fn with_ocr_result(mut self, ocr_result_id: impl Into<RecordId>) -> Self {
        self.ocr_result_id = Some(ocr_result_id.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>, prompt_version: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self.prompt_version = Some(prompt_version.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids() {
        let from_number: RecordId = serde_json::from_str("42").unwrap();
        let from_string: RecordId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"42\"");
    }

    #[test]
    fn test_api_record_deserializes() {
        let json = r#"{
            "id": 7,
            "user_id": 3,
            "scan_id": 12,
            "highlighted_text": "前月比",
            "context_text": "今月はCVRが前月比+1.2pt改善",
            "nuance_data": {
                "meaning": "compared to last month",
                "usageExample": "前月比で増加",
                "usageTiming": "Monthly reports",
                "wordBreakdown": "前月 + 比",
                "alternativeMeaning": "month-over-month"
            },
            "is_bookmarked": true,
            "created_at": "2026-01-10T10:00:00Z"
        }"#;

        let annotation: Annotation = serde_json::from_str(json).unwrap();
        assert_eq!(annotation.id.as_str(), "7");
        assert_eq!(annotation.scan_id.as_str(), "12");
        assert_eq!(annotation.ocr_result_id, None);
        assert_eq!(annotation.nuance_data.usage_timing, "Monthly reports");
        assert_eq!(annotation.model, None);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let annotation = Annotation::new("a", "scan-1", "テスト", NuanceData::default());
        let value = serde_json::to_value(&annotation).unwrap();

        assert!(value.get("context_text").is_none());
        assert!(value.get("ocr_result_id").is_none());
        assert_eq!(value["nuance_data"]["usageExample"], "");
    }
}
