//! Data carried through one campaign run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::voice::Voice;

/// Immutable snapshot of the form, taken when a run starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignInput {
    pub caller_number: String,
    pub assistant_name: String,
    pub persona_description: String,
    pub prompt: String,
    pub customer_file: Option<PathBuf>,
    pub voice: Voice,
}

/// A customer list file ready to be uploaded.
#[derive(Debug, Clone)]
pub struct CustomerFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// One row returned by the upload step.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    /// Display name, if the row carried one.
    pub name: Option<String>,
    /// Phone number rendered as text, if the row carried one.
    pub phone: Option<String>,
    /// The row exactly as the backend returned it.
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl CustomerRecord {
    /// Identifier used in outcomes: name, then phone, then row position.
    pub fn label(&self, position: usize) -> String {
        self.name
            .clone()
            .or_else(|| self.phone.clone())
            .unwrap_or_else(|| format!("row {}", position + 1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptResult {
    pub script: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceResult {
    pub audio_path: String,
}

/// The recorded result of one call attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOutcome {
    pub customer: String,
    /// Remote status on success, failure reason otherwise.
    pub status: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub failed: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl CallOutcome {
    pub fn placed(customer: String, status: String) -> Self {
        Self {
            customer,
            status,
            failed: false,
        }
    }

    pub fn failed(customer: String, reason: String) -> Self {
        Self {
            customer,
            status: reason,
            failed: true,
        }
    }
}

/// Everything a successful run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignReport {
    pub run_id: uuid::Uuid,
    pub caller_number: String,
    pub voice: Voice,
    pub script: String,
    pub audio_path: String,
    pub outcomes: Vec<CallOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CampaignReport {
    pub fn placed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.failed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.failed).count()
    }

    /// Outcome list as pretty-printed JSON, the panel's result text.
    pub fn render_outcomes(&self) -> String {
        serde_json::to_string_pretty(&self.outcomes).unwrap_or_else(|_| "[]".to_string())
    }
}
