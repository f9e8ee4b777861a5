//! Editable campaign form.
//!
//! The form owns the mutable field values and the last rendered result. A run
//! never reads the form directly: it receives the [`CampaignInput`] produced
//! by [`CampaignForm::snapshot`].

use std::path::{Path, PathBuf};

use crate::campaign::{CampaignInput, CampaignReport};
use crate::errors::CampaignError;
use crate::voice::Voice;

#[derive(Debug, Clone, Default)]
pub struct CampaignForm {
    caller_number: String,
    assistant_name: String,
    persona_description: String,
    prompt: String,
    customer_file: Option<PathBuf>,
    voice: Voice,
    last_result: Option<String>,
}

impl CampaignForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caller_number(&self) -> &str {
        &self.caller_number
    }

    pub fn set_caller_number(&mut self, value: impl Into<String>) {
        self.caller_number = value.into();
    }

    pub fn assistant_name(&self) -> &str {
        &self.assistant_name
    }

    pub fn set_assistant_name(&mut self, value: impl Into<String>) {
        self.assistant_name = value.into();
    }

    pub fn persona_description(&self) -> &str {
        &self.persona_description
    }

    pub fn set_persona_description(&mut self, value: impl Into<String>) {
        self.persona_description = value.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, value: impl Into<String>) {
        self.prompt = value.into();
    }

    pub fn customer_file(&self) -> Option<&Path> {
        self.customer_file.as_deref()
    }

    /// Select a customer file, replacing any previous selection.
    pub fn set_customer_file(&mut self, path: impl Into<PathBuf>) {
        self.customer_file = Some(path.into());
    }

    pub fn clear_customer_file(&mut self) {
        self.customer_file = None;
    }

    pub fn voice(&self) -> Voice {
        self.voice
    }

    pub fn set_voice(&mut self, voice: Voice) {
        self.voice = voice;
    }

    /// Result text of the most recent run, if any.
    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    pub fn record_report(&mut self, report: &CampaignReport) {
        self.last_result = Some(report.render_outcomes());
    }

    pub fn record_error(&mut self, error: &CampaignError) {
        self.last_result = Some(error.to_string());
    }

    pub fn snapshot(&self) -> CampaignInput {
        CampaignInput {
            caller_number: self.caller_number.clone(),
            assistant_name: self.assistant_name.clone(),
            persona_description: self.persona_description.clone(),
            prompt: self.prompt.clone(),
            customer_file: self.customer_file.clone(),
            voice: self.voice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::UploadError;

    #[test]
    fn test_new_form_has_only_voice_default() {
        let form = CampaignForm::new();
        assert_eq!(form.caller_number(), "");
        assert_eq!(form.assistant_name(), "");
        assert_eq!(form.persona_description(), "");
        assert_eq!(form.prompt(), "");
        assert!(form.customer_file().is_none());
        assert_eq!(form.voice(), Voice::Bella);
        assert!(form.last_result().is_none());
    }

    #[test]
    fn test_setters_replace_without_validation() {
        let mut form = CampaignForm::new();
        form.set_caller_number("not a number");
        form.set_caller_number("+90 555 000 00 00");
        form.set_assistant_name("Burcu");
        form.set_persona_description("");
        assert_eq!(form.caller_number(), "+90 555 000 00 00");
        assert_eq!(form.assistant_name(), "Burcu");
        assert_eq!(form.persona_description(), "");
    }

    #[test]
    fn test_customer_file_overwrites_previous_selection() {
        let mut form = CampaignForm::new();
        form.set_customer_file("a.xlsx");
        form.set_customer_file("b.csv");
        assert_eq!(form.customer_file(), Some(Path::new("b.csv")));
        form.clear_customer_file();
        assert!(form.customer_file().is_none());
    }

    #[test]
    fn test_snapshot_is_detached_from_later_edits() {
        let mut form = CampaignForm::new();
        form.set_prompt("first");
        form.set_voice(Voice::Josh);
        let input = form.snapshot();
        form.set_prompt("second");
        assert_eq!(input.prompt, "first");
        assert_eq!(input.voice, Voice::Josh);
    }

    #[test]
    fn test_record_error_replaces_result_text() {
        let mut form = CampaignForm::new();
        form.record_error(&CampaignError::Upload(UploadError::NoFile));
        assert_eq!(
            form.last_result(),
            Some("customer upload failed: no customer file selected")
        );
    }
}
