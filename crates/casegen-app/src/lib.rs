//! casegen-app - Application state and orchestration for casegen
//!
//! This crate implements the TEA (The Elm Architecture) pattern for
//! state management: the model ([`AppState`]), the message vocabulary
//! ([`Message`]), and the pure [`handler::update`] function that maps
//! messages to state changes plus network actions for the runner to
//! execute.

pub mod auth;
pub mod cache;
pub mod config;
pub mod editor;
pub mod handler;
pub mod inflight;
pub mod input_key;
pub mod message;
pub mod selection;
pub mod state;

// Re-export primary types
pub use auth::AuthState;
pub use config::{load_settings, Settings};
pub use handler::{update, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{ApiFailure, ApiResult, Message};
pub use state::{AppState, GeneratedRow, Notice, NoticeKind, Pane, UiMode};
