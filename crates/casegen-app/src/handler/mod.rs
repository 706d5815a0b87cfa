//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `workflow`: User-intent handlers (selection, generation, editor)
//! - `completions`: Network completion handlers

pub(crate) mod completions;
pub(crate) mod keys;
pub(crate) mod update;
pub(crate) mod workflow;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use casegen_core::Testcase;

// Re-export main entry point
pub use update::update;

/// Network effects the event loop performs after update.
///
/// Each action spawns one task that sends exactly one completion
/// message back into the loop.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Fetch standards + requirements + summary (after sign-in/restore)
    LoadWorkspace,

    /// Re-fetch the standards mapping
    FetchStandards,

    /// Re-fetch the requirements mapping
    FetchRequirements,

    /// Re-fetch the authoritative generation summary
    FetchSummary,

    /// Fetch the detail view for one generation set
    FetchDetail { gen_id: String, force: bool },

    /// Fetch a detail view solely to recover the standards used in the
    /// original generation (regenerate fallback path)
    FetchDetailForRegenerate {
        req_id: String,
        gen_id: String,
        prompt: String,
    },

    /// Request generation for the selected documents
    Generate {
        requirements: Vec<String>,
        standards: Vec<String>,
        prompt: String,
    },

    /// Upload a standard document
    UploadStandard { path: PathBuf },

    /// Upload a requirement document
    UploadRequirement { path: PathBuf },

    /// Regenerate the whole set for one requirement
    RegenerateRequirement {
        req_id: String,
        standards: Vec<String>,
        prompt: String,
    },

    /// Regenerate one testcase inside a set
    RegenerateTestcase {
        gen_id: String,
        tc_id: String,
        prompt: String,
    },

    /// PATCH a full edited testcase
    SaveTestcase { gen_id: String, testcase: Testcase },

    /// File a testcase as an issue-tracker ticket
    CreateJira {
        gen_id: String,
        tc_id: String,
        project_key: String,
    },

    /// Refresh the summary and force-refresh one detail view after a
    /// successful mutation
    RefreshAfterMutation { gen_id: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<crate::message::Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: crate::message::Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
