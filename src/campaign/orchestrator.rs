//! Campaign orchestration: upload → script → voice → one call per customer.
//!
//! The first three steps are prerequisites and abort the run on failure. The
//! call step isolates failures per customer and records them as outcomes.
//! Outcomes always come back in upload order, whatever the call bound.

use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::campaign::backend::{CallRequest, CampaignBackend, ScriptRequest, VoiceRequest};
use crate::campaign::customers::{CustomerFields, parse_customers};
use crate::campaign::types::{
    CallOutcome, CampaignInput, CampaignReport, CustomerFile, CustomerRecord, ScriptResult,
    VoiceResult,
};
use crate::errors::{CallDispatchError, CampaignError, UploadError};

/// The four stages of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Upload,
    Script,
    Voice,
    Calls,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Upload => write!(f, "uploading customers"),
            Step::Script => write!(f, "generating script"),
            Step::Voice => write!(f, "synthesizing voice"),
            Step::Calls => write!(f, "placing calls"),
        }
    }
}

/// Progress events emitted while a run is in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CampaignEvent {
    StepStarted { step: Step },
    StepCompleted { step: Step },
    CustomersLoaded { count: usize },
    CallStarted { index: usize, customer: String },
    CallFinished { index: usize, outcome: CallOutcome },
    Finished { placed: usize, failed: usize },
}

/// Tuning for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Maximum call requests in flight. Values below 1 are treated as 1.
    pub max_parallel_calls: usize,
    pub customer_fields: CustomerFields,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_parallel_calls: 1,
            customer_fields: CustomerFields::default(),
        }
    }
}

impl OrchestratorConfig {
    pub fn with_max_parallel_calls(mut self, max: usize) -> Self {
        self.max_parallel_calls = max;
        self
    }

    pub fn with_customer_fields(mut self, fields: CustomerFields) -> Self {
        self.customer_fields = fields;
        self
    }
}

pub struct CampaignOrchestrator<B> {
    backend: B,
    config: OrchestratorConfig,
    events: Option<mpsc::UnboundedSender<CampaignEvent>>,
}

impl<B: CampaignBackend> CampaignOrchestrator<B> {
    pub fn new(backend: B, config: OrchestratorConfig) -> Self {
        Self {
            backend,
            config,
            events: None,
        }
    }

    /// Send progress events to `tx`. A dropped receiver is ignored.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<CampaignEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one campaign to completion.
    pub async fn run(&self, input: &CampaignInput) -> Result<CampaignReport, CampaignError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("campaign", %run_id);
        self.run_inner(run_id, input).instrument(span).await
    }

    async fn run_inner(
        &self,
        run_id: Uuid,
        input: &CampaignInput,
    ) -> Result<CampaignReport, CampaignError> {
        let started_at = Utc::now();
        info!(caller = %input.caller_number, voice = %input.voice, "campaign started");

        self.emit(CampaignEvent::StepStarted { step: Step::Upload });
        let customers = self.upload(input).await?;
        info!(count = customers.len(), "customers uploaded");
        self.emit(CampaignEvent::CustomersLoaded {
            count: customers.len(),
        });
        self.emit(CampaignEvent::StepCompleted { step: Step::Upload });

        self.emit(CampaignEvent::StepStarted { step: Step::Script });
        let script = self.generate_script(input).await?;
        info!(chars = script.script.len(), "script generated");
        self.emit(CampaignEvent::StepCompleted { step: Step::Script });

        self.emit(CampaignEvent::StepStarted { step: Step::Voice });
        let voice = self.synthesize(input, &script).await?;
        info!(audio_path = %voice.audio_path, "voice synthesized");
        self.emit(CampaignEvent::StepCompleted { step: Step::Voice });

        self.emit(CampaignEvent::StepStarted { step: Step::Calls });
        let outcomes = self.place_calls(&customers, &voice.audio_path).await;
        self.emit(CampaignEvent::StepCompleted { step: Step::Calls });

        let report = CampaignReport {
            run_id,
            caller_number: input.caller_number.clone(),
            voice: input.voice,
            script: script.script,
            audio_path: voice.audio_path,
            outcomes,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            placed = report.placed_count(),
            failed = report.failed_count(),
            "campaign finished"
        );
        self.emit(CampaignEvent::Finished {
            placed: report.placed_count(),
            failed: report.failed_count(),
        });
        Ok(report)
    }

    async fn upload(&self, input: &CampaignInput) -> Result<Vec<CustomerRecord>, UploadError> {
        let path = input.customer_file.as_deref().ok_or(UploadError::NoFile)?;
        let file = CustomerFile::load(path).await?;
        debug!(file = %file.file_name, mime = %file.mime_type, "customer file loaded");
        let body = self.backend.upload_customers(file).await?;
        parse_customers(&body, &self.config.customer_fields)
    }

    async fn generate_script(&self, input: &CampaignInput) -> Result<ScriptResult, CampaignError> {
        let request = ScriptRequest {
            character_name: input.assistant_name.clone(),
            character_description: input.persona_description.clone(),
            prompt: input.prompt.clone(),
        };
        self.backend
            .generate_script(&request)
            .await
            .map_err(CampaignError::ScriptGeneration)
    }

    async fn synthesize(
        &self,
        input: &CampaignInput,
        script: &ScriptResult,
    ) -> Result<VoiceResult, CampaignError> {
        let request = VoiceRequest {
            text: script.script.clone(),
            voice: input.voice,
        };
        self.backend
            .generate_voice(&request)
            .await
            .map_err(CampaignError::VoiceSynthesis)
    }

    async fn place_calls(&self, customers: &[CustomerRecord], audio_path: &str) -> Vec<CallOutcome> {
        let bound = self.config.max_parallel_calls.max(1);
        debug!(customers = customers.len(), bound, "dispatching calls");
        stream::iter(customers.iter().enumerate())
            .map(|(index, customer)| self.place_call(index, customer, audio_path))
            .buffered(bound)
            .collect()
            .await
    }

    async fn place_call(
        &self,
        index: usize,
        customer: &CustomerRecord,
        audio_path: &str,
    ) -> CallOutcome {
        let label = customer.label(index);
        self.emit(CampaignEvent::CallStarted {
            index,
            customer: label.clone(),
        });

        let outcome = match self.dispatch(customer, audio_path).await {
            Ok(status) => {
                info!(customer = %label, %status, "call placed");
                CallOutcome::placed(label, status)
            }
            Err(err) => {
                warn!(customer = %label, error = %err, "call failed");
                CallOutcome::failed(label, err.to_string())
            }
        };

        self.emit(CampaignEvent::CallFinished {
            index,
            outcome: outcome.clone(),
        });
        outcome
    }

    async fn dispatch(
        &self,
        customer: &CustomerRecord,
        audio_path: &str,
    ) -> Result<String, CallDispatchError> {
        let to_number = customer.phone.clone().ok_or(CallDispatchError::MissingPhone)?;
        let request = CallRequest {
            to_number,
            audio_url: audio_path.to_string(),
        };
        Ok(self.backend.start_call(&request).await?)
    }

    fn emit(&self, event: CampaignEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}
