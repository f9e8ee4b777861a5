//! Campaign execution against the remote voice marketing backend.

pub mod backend;
pub mod customers;
pub mod orchestrator;
pub mod types;

pub use backend::{CampaignBackend, DEFAULT_BACKEND_URL, HttpBackend};
pub use customers::{CustomerFields, parse_customers};
pub use orchestrator::{CampaignEvent, CampaignOrchestrator, OrchestratorConfig, Step};
pub use types::{
    CallOutcome, CampaignInput, CampaignReport, CustomerFile, CustomerRecord, ScriptResult,
    VoiceResult,
};
