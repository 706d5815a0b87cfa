//! casegen-tui - Terminal UI for casegen
//!
//! This crate provides the ratatui-based terminal interface: event
//! polling, rendering, and the runner loop that executes the network
//! actions produced by `casegen-app`.

pub mod actions;
pub mod event;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

// Re-export main entry point
pub use runner::run;
