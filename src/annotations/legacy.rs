//! Legacy flat annotation records
//!
//! Early client builds stored bookmarks as one flat camelCase object per
//! annotation (`selectedText`, `meaning`, `whenToUse`, ...). Blobs written
//! by those builds are still read; writes always use [`Annotation`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Annotation, NuanceData, RecordId};

/// Flat record as written by the first client releases
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAnnotation {
    pub id: RecordId,
    #[serde(rename = "scanID", default)]
    pub scan_id: RecordId,
    #[serde(rename = "ocrResultID", default)]
    pub ocr_result_id: Option<RecordId>,
    pub selected_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_end: Option<usize>,
    #[serde(default)]
    pub context: String,
    pub meaning: String,
    #[serde(default)]
    pub usage_example: String,
    #[serde(default)]
    pub when_to_use: String,
    #[serde(default)]
    pub word_breakdown: String,
    #[serde(default)]
    pub alternative_meanings: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub prompt_version: String,
    pub created_at: DateTime<Utc>,
}

impl From<LegacyAnnotation> for Annotation {
    fn from(legacy: LegacyAnnotation) -> Self {
        Annotation {
            id: legacy.id,
            scan_id: legacy.scan_id,
            ocr_result_id: legacy.ocr_result_id.filter(|id| !id.is_empty()),
            highlighted_text: legacy.selected_text,
            context_text: non_empty(legacy.context),
            nuance_data: NuanceData {
                meaning: legacy.meaning,
                usage_example: legacy.usage_example,
                usage_timing: legacy.when_to_use,
                word_breakdown: legacy.word_breakdown,
                alternative_meaning: legacy.alternative_meanings,
            },
            model: non_empty(legacy.model),
            prompt_version: non_empty(legacy.prompt_version),
            created_at: legacy.created_at,
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Schema generation of a persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Flat camelCase record
    Legacy,
    /// Nested `nuance_data` record
    Current,
}

/// Any annotation shape that may be found in a persisted blob
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredAnnotation {
    Current(Annotation),
    Legacy(LegacyAnnotation),
}

impl StoredAnnotation {
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn schema(&self) -> SchemaVersion {
        match self {
            StoredAnnotation::Current(_) => SchemaVersion::Current,
            StoredAnnotation::Legacy(_) => SchemaVersion::Legacy,
        }
    }

    pub fn into_annotation(self) -> Annotation {
        match self {
            StoredAnnotation::Current(annotation) => annotation,
            StoredAnnotation::Legacy(legacy) => legacy.into(),
        }
    }
}
