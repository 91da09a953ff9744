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

use super::{LdxMultiFilter, MetadataGate};
use crate::args::LdxArgParser;
use crate::errors::Result;
use crate::plugin::{LdxDomain, LdxFilter, LdxPlugin};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch};
use crate::registry;
use crate::session::LdxSessionRef;

/// Pushes records through an embedded chain of filters.
///
/// Unlike `tee`, the sub-flow's output replaces the record downstream, so
/// the chain may drop or expand it. When the metadata gate is closed the
/// record bypasses the sub-flow unchanged. Writers are not allowed in the
/// sub-flow.
#[derive(Default)]
pub struct SubProcessFilter {
    gate: MetadataGate,
    filter: LdxMultiFilter,
}

impl LdxPlugin for SubProcessFilter {
    fn name(&self) -> &'static str {
        "sub-process"
    }

    fn description(&self) -> &'static str {
        "Pushes records through the filter(s) defined as its sub-flow. \
         With a meta-data field and value this becomes conditional processing."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Any]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        if let Some(cmdline) = parser.value("-f", "--sub-flow")? {
            let subflow = registry::resolve_subflow(&cmdline, false)?;
            self.filter = LdxMultiFilter::new(subflow.filters);
        }
        self.gate.field = parser.value("--field", "--field")?;
        if let Some(comparison) = parser.parsed_value("--comparison", "--comparison")? {
            self.gate.comparison = comparison;
        }
        self.gate.value = parser.value("--value", "--value")?;
        parser.finish()
    }

    fn initialize(&mut self, session: &LdxSessionRef) -> Result<()> {
        self.gate.validate(self.name())?;
        self.filter.initialize(session)
    }

    fn finalize(&mut self) -> Result<()> {
        self.filter.finalize()
    }
}

impl LdxFilter for SubProcessFilter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn generates(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn process_record(&mut self, record: LdxRecord) -> Result<LdxRecordBatch> {
        if self.gate.is_open(&record)? {
            self.filter.process_record(record)
        } else {
            Ok(vec![record])
        }
    }
}
