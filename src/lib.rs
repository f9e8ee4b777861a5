pub mod campaign;
pub mod dialer_config;
pub mod errors;
pub mod form;
pub mod ui;
pub mod voice;

pub use campaign::{CampaignInput, CampaignOrchestrator, CampaignReport, HttpBackend};
pub use errors::{BackendError, CallDispatchError, CampaignError, UploadError};
pub use form::CampaignForm;
pub use voice::Voice;
