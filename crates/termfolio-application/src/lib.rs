pub mod bootstrap;
pub mod contact_form;
pub mod relay_service;
pub mod session;

pub use bootstrap::{build_relay_service, open_state_repository, StorageMode};
pub use contact_form::{ContactFormSubmitter, SubmitOutcome};
pub use relay_service::{RelayRequest, RelayService};
pub use session::{RuntimeSettings, SessionHandle, SessionRuntime, SessionUpdate};
