//! Annotation module
//!
//! An annotation is the AI-generated explanation of a fragment the user
//! highlighted in OCR text.
//!
//! # Features
//!
//! - Canonical nested record (`highlighted_text` + `nuance_data`)
//! - Adapter for the legacy flat record still found in older bookmark blobs
//! - Selection validation for text sent to the analysis endpoint
//! - Offline mock generator

mod legacy;
mod mock;
mod selection;
mod types;

pub use legacy::{LegacyAnnotation, SchemaVersion, StoredAnnotation};
pub use mock::{mock_annotation, MOCK_MODEL, MOCK_OCR_RESULT_ID, MOCK_PROMPT_VERSION, MOCK_SCAN_ID};
pub use selection::{validate_selection, SelectionError, TextSelection, MAX_SELECTION_CHARS};
pub use types::{Annotation, NuanceData, RecordId};
