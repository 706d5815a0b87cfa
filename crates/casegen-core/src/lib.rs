//! # casegen-core - Core Domain Types
//!
//! Foundation crate for casegen. Provides domain types mirroring the
//! backend's records, error handling, field-splitting helpers for the
//! testcase editor, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`UserProfile`] - Display identity decoded from the sign-in credential
//! - [`RequirementInfo`] - Value side of the requirement mapping
//! - [`GenerationSummaryEntry`] - One row of the generated-sets summary
//! - [`GenerationDetail`] - Detail view for one generation set
//! - [`Testcase`] - A single structured test scenario
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with an `unauthorized` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Field Splitting (`fields`)
//! - [`split_lines()`] / [`join_lines()`] - newline-delimited list fields
//! - [`split_compliance()`] / [`join_compliance()`] - comma-delimited
//!   compliance field
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use casegen_core::prelude::*;
//! ```

pub mod error;
pub mod fields;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all casegen crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use fields::{join_compliance, join_lines, split_compliance, split_lines};
pub use types::{
    GenerationDetail, GenerationSummaryEntry, RequirementInfo, Testcase, UserProfile,
};
