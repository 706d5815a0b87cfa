//! casegen-api - Backend HTTP client and session persistence
//!
//! Everything that leaves the process lives here: the REST client for
//! the generation backend, sign-in credential decoding, and the two-entry
//! persisted session. The TEA layer in `casegen-app` never touches
//! `reqwest` directly — it emits actions that the runner executes
//! through [`ApiClient`].

pub mod client;
pub mod credential;
pub mod protocol;
pub mod store;

// Re-export primary types
pub use client::{encode_segment, ApiClient};
pub use credential::{decode_credential, CredentialError};
pub use protocol::{
    prompt_override, GenerateRequest, JiraCreated, JiraRequest, RegenerateOutcome,
    RegenerateRequest, RegenerateTestcaseRequest, UploadRequirementResponse,
    UploadStandardResponse,
};
pub use store::SessionStore;
