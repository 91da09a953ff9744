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

//! # Ldx Plugin Module
//!
//! The plugin contract shared by every pipeline stage. All readers, filters
//! and writers implement `LdxPlugin` (name, description, domains, argument
//! parsing, lifecycle) plus their role-specific trait.
//!
//! ## Lifecycle
//!
//! 1. `parse_args` with the raw tokens that followed the plugin's name on
//!    the command line — validates configuration eagerly
//! 2. `initialize` with the shared session — opens resources; a failure
//!    here aborts the pipeline before any record is read
//! 3. processing calls (`read` / `process_record` / `write_*`)
//! 4. `finalize` — idempotent resource release, guaranteed to run even
//!    after a mid-stream failure
//!
//! ## Filter semantics
//!
//! `process_record` returns a vector: empty drops the record, one element
//! transforms it, several expand it. Filters whose semantics span the whole
//! collection (e.g. deterministic shuffling) report `requires_batch()` and
//! override `process_batch`; the default `process_batch` applies
//! `process_record` element-wise and flattens the results.

use std::fmt;
use std::str::FromStr;

use crate::errors::{LdxError, Result};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch};
use crate::session::LdxSessionRef;

/// Domain tag declaring which dataset shape a stage works with.
///
/// `Any` is the sentinel that matches every neighbor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LdxDomain {
    Any,
    Pairs,
    Pretrain,
    Classification,
    Translation,
}

impl LdxDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            LdxDomain::Any => "any",
            LdxDomain::Pairs => "pairs",
            LdxDomain::Pretrain => "pretrain",
            LdxDomain::Classification => "classification",
            LdxDomain::Translation => "translation",
        }
    }
}

impl fmt::Display for LdxDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LdxDomain {
    type Err = LdxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "any" => Ok(LdxDomain::Any),
            "pairs" => Ok(LdxDomain::Pairs),
            "pretrain" => Ok(LdxDomain::Pretrain),
            "classification" => Ok(LdxDomain::Classification),
            "translation" => Ok(LdxDomain::Translation),
            other => Err(LdxError::config(format!("unhandled domain: {other}"))),
        }
    }
}

/// Renders a domain list for error messages and help output.
pub fn domains_to_str(domains: &[LdxDomain]) -> String {
    domains
        .iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join("|")
}

/// Contract shared by every pipeline stage.
pub trait LdxPlugin {
    /// Command-line token of the plugin.
    fn name(&self) -> &'static str;

    /// One-line description for help output.
    fn description(&self) -> &'static str;

    /// Dataset domains the plugin works with; empty fails pipeline assembly.
    fn domains(&self) -> Vec<LdxDomain>;

    /// Parses the raw argument tokens that followed the plugin name.
    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(LdxError::config(format!(
                "{}: unrecognized option(s): {}",
                self.name(),
                args.join(" ")
            )))
        }
    }

    /// Validates configuration and opens resources.
    fn initialize(&mut self, session: &LdxSessionRef) -> Result<()>;

    /// Releases resources; must be safe to call after a failure.
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Contract for pipeline sources.
///
/// `read()` is a finite, non-restartable sequence: each call opens the next
/// underlying input source and returns its records; calling it again after
/// the current source is drained advances to the following one. Readers
/// update `session.current_input` when they open a source.
pub trait LdxReader: LdxPlugin {
    /// Record kinds this reader produces.
    fn generates(&self) -> Vec<LdxDataKind>;

    /// Reads the next input source and returns its records.
    fn read(&mut self) -> Result<LdxRecordBatch>;

    /// Returns whether all input sources have been consumed.
    fn has_finished(&self) -> bool;
}

/// Contract for pipeline filters.
pub trait LdxFilter: LdxPlugin {
    /// Record kinds this filter consumes.
    fn accepts(&self) -> Vec<LdxDataKind>;

    /// Record kinds this filter produces.
    fn generates(&self) -> Vec<LdxDataKind>;

    /// Processes one record: empty = drop, one = transform, many = expand.
    fn process_record(&mut self, record: LdxRecord) -> Result<LdxRecordBatch>;

    /// Whether the filter needs the entire current batch in one call.
    fn requires_batch(&self) -> bool {
        false
    }

    /// Processes a batch; by default element-wise with flattened results.
    fn process_batch(&mut self, batch: LdxRecordBatch) -> Result<LdxRecordBatch> {
        let mut result = Vec::with_capacity(batch.len());
        for record in batch {
            result.extend(self.process_record(record)?);
        }
        Ok(result)
    }
}

/// The two writer capability contracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LdxWriterMode {
    /// One record at a time, as they survive the filter chain.
    Stream,
    /// The whole filtered collection in one call per reader segment.
    Batch,
}

/// Contract for pipeline sinks.
///
/// A writer implements the method matching its `mode()`; the other default
/// raises a pipeline error.
pub trait LdxWriter: LdxPlugin {
    /// Record kinds this writer consumes.
    fn accepts(&self) -> Vec<LdxDataKind>;

    /// Which writing contract this writer implements.
    fn mode(&self) -> LdxWriterMode;

    fn write_stream(&mut self, _record: &LdxRecord) -> Result<()> {
        Err(LdxError::pipeline(self.name(), "not a stream writer"))
    }

    fn write_batch(&mut self, _batch: &[LdxRecord]) -> Result<()> {
        Err(LdxError::pipeline(self.name(), "not a batch writer"))
    }
}

/// Returns the injected session or a pipeline error naming the stage.
pub(crate) fn require_session<'a>(
    session: &'a Option<LdxSessionRef>,
    name: &str,
) -> Result<&'a LdxSessionRef> {
    session
        .as_ref()
        .ok_or_else(|| LdxError::pipeline(name, "session not injected before use"))
}

/// Rejects records of a kind the stage does not accept.
pub(crate) fn ensure_accepted(name: &str, record: &LdxRecord, accepted: &[LdxDataKind]) -> Result<()> {
    if accepted.contains(&record.kind()) {
        Ok(())
    } else {
        Err(LdxError::pipeline(
            name,
            format!("cannot handle {} records", record.kind()),
        ))
    }
}
