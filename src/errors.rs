//! Copyright © 2025-2026 The Ldx Authors. All Rights Reserved.
//!
//! This file is part of Ldx.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Ldx Error Module
//!
//! This module defines the error types and utilities used throughout the Ldx
//! framework for consistent error handling and reporting.
//!
//! ## Error Tiers
//!
//! Ldx distinguishes two tiers of failure:
//!
//! - **Configuration errors** (`Config`, `Compatibility`): raised while a
//!   pipeline is assembled or during `initialize()`, before any record is
//!   read. These are fatal and reported to the user pre-flight.
//! - **Record-level errors** (`Filter`, `Pipeline`, `Io`, `Serde`): raised
//!   while records flow through the pipeline. The execution engine logs them
//!   and still finalizes every stage.
//!
//! ## Usage
//!
//! ```rust
//! use ldx::errors::{LdxError, Result};
//!
//! fn check_ratio(sum: u32) -> Result<()> {
//!     if sum != 100 {
//!         return Err(LdxError::config(format!("ratios must sum to 100, got {sum}")));
//!     }
//!     Ok(())
//! }
//! ```

use std::io;

use thiserror::Error;

/// Convenience result type used throughout Ldx.
pub type Result<T> = std::result::Result<T, LdxError>;

/// Canonical error enumeration for Ldx.
#[derive(Debug, Error)]
pub enum LdxError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Invalid plugin options or pipeline configuration, raised pre-flight.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Adjacent pipeline stages cannot exchange records.
    #[error("incompatible stages '{upstream}' and '{downstream}': {message}")]
    Compatibility {
        upstream: String,
        downstream: String,
        message: String,
    },

    /// Any failure raised by a filter implementation.
    #[error("filter '{filter}' failed: {message}")]
    Filter { filter: String, message: String },

    /// Failures that occur while driving a pipeline.
    #[error("pipeline error at stage '{stage}': {message}")]
    Pipeline { stage: String, message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for LdxError {
    fn from(err: io::Error) -> Self {
        LdxError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LdxError {
    fn from(err: serde_json::Error) -> Self {
        LdxError::Serde(err.to_string())
    }
}

impl From<csv::Error> for LdxError {
    fn from(err: csv::Error) -> Self {
        LdxError::Io(err.to_string())
    }
}

impl From<regex::Error> for LdxError {
    fn from(err: regex::Error) -> Self {
        LdxError::Config {
            message: format!("invalid regular expression: {err}"),
        }
    }
}

impl LdxError {
    /// Helper to construct configuration errors.
    pub fn config<T: Into<String>>(message: T) -> Self {
        LdxError::Config {
            message: message.into(),
        }
    }

    /// Helper to construct compatibility errors between two stages.
    pub fn compatibility(
        upstream: impl Into<String>,
        downstream: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LdxError::Compatibility {
            upstream: upstream.into(),
            downstream: downstream.into(),
            message: message.into(),
        }
    }

    /// Helper to construct filter errors.
    pub fn filter(name: impl Into<String>, message: impl Into<String>) -> Self {
        LdxError::Filter {
            filter: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        LdxError::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        LdxError::Internal(message.into())
    }

    /// Returns true for errors raised before any record was read.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            LdxError::Config { .. } | LdxError::Compatibility { .. }
        )
    }
}
