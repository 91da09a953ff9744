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

use std::str::FromStr;

use log::{debug, info};

use crate::args::LdxArgParser;
use crate::comparison::{compare_values, LdxComparison};
use crate::errors::{LdxError, Result};
use crate::plugin::{LdxDomain, LdxFilter, LdxPlugin};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch};
use crate::session::LdxSessionRef;

/// What to do with a record whose metadata matches the predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataAction {
    Keep,
    Discard,
}

impl FromStr for MetadataAction {
    type Err = LdxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keep" => Ok(MetadataAction::Keep),
            "discard" => Ok(MetadataAction::Discard),
            other => Err(LdxError::config(format!(
                "unhandled action: {other} (supported: keep discard)"
            ))),
        }
    }
}

/// Keeps or discards records based on a metadata comparison.
///
/// A record without metadata, or without the configured field, never
/// matches the predicate and is dropped regardless of action.
pub struct MetadataFilter {
    field: String,
    action: MetadataAction,
    comparison: LdxComparison,
    value: String,
    kept: usize,
    discarded: usize,
}

impl Default for MetadataFilter {
    fn default() -> Self {
        MetadataFilter {
            field: String::new(),
            action: MetadataAction::Keep,
            comparison: LdxComparison::Equal,
            value: String::new(),
            kept: 0,
            discarded: 0,
        }
    }
}

impl LdxPlugin for MetadataFilter {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn description(&self) -> &'static str {
        "Keeps or discards records based on comparing a meta-data field against a value."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Any]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.field = parser
            .value("-f", "--field")?
            .ok_or_else(|| LdxError::config("metadata: no field provided"))?;
        if let Some(action) = parser.parsed_value("-a", "--action")? {
            self.action = action;
        }
        if let Some(comparison) = parser.parsed_value("-c", "--comparison")? {
            self.comparison = comparison;
        }
        self.value = parser
            .value("-v", "--value")?
            .ok_or_else(|| LdxError::config("metadata: no value provided to compare with"))?;
        parser.finish()
    }

    fn initialize(&mut self, _session: &LdxSessionRef) -> Result<()> {
        self.kept = 0;
        self.discarded = 0;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        info!(
            "metadata filter: kept={} discarded={}",
            self.kept, self.discarded
        );
        Ok(())
    }
}

impl LdxFilter for MetadataFilter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn generates(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn process_record(&mut self, record: LdxRecord) -> Result<LdxRecordBatch> {
        let actual = match record.metadata().and_then(|meta| meta.get(&self.field)) {
            Some(actual) => actual,
            None => {
                debug!("record without metadata field '{}', discarded", self.field);
                self.discarded += 1;
                return Ok(Vec::new());
            }
        };
        let matched = compare_values(actual, self.comparison, &self.value)
            .map_err(|err| LdxError::filter(self.name(), err.to_string()))?;
        let keep = match self.action {
            MetadataAction::Keep => matched,
            MetadataAction::Discard => !matched,
        };
        if keep {
            self.kept += 1;
            Ok(vec![record])
        } else {
            self.discarded += 1;
            Ok(Vec::new())
        }
    }
}
