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

use log::info;

use super::{LdxMultiFilter, MetadataGate};
use crate::args::LdxArgParser;
use crate::errors::Result;
use crate::plugin::{LdxDomain, LdxFilter, LdxPlugin, LdxWriter, LdxWriterMode};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch};
use crate::registry;
use crate::session::LdxSessionRef;

/// Forwards a copy of each record to an embedded sub-flow.
///
/// The sub-flow is a command line of filters optionally terminated by a
/// writer, parsed with the same tokenizer and grouping rules as the outer
/// pipeline but against a fresh token stream. The original record always
/// continues downstream unchanged; the copy only enters the sub-flow when
/// the metadata gate is open.
#[derive(Default)]
pub struct TeeFilter {
    gate: MetadataGate,
    filter: LdxMultiFilter,
    writer: Option<Box<dyn LdxWriter>>,
    buffer: Option<LdxRecordBatch>,
}

impl LdxPlugin for TeeFilter {
    fn name(&self) -> &'static str {
        "tee"
    }

    fn description(&self) -> &'static str {
        "Forwards a copy of each record to the filter(s)/writer defined as its sub-flow. \
         With a meta-data field and value this becomes conditional forwarding."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Any]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        if let Some(cmdline) = parser.value("-f", "--sub-flow")? {
            let subflow = registry::resolve_subflow(&cmdline, true)?;
            self.filter = LdxMultiFilter::new(subflow.filters);
            self.writer = subflow.writer;
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
        self.filter.initialize(session)?;
        self.buffer = None;
        if let Some(writer) = &mut self.writer {
            writer.initialize(session)?;
            if writer.mode() == LdxWriterMode::Batch {
                self.buffer = Some(Vec::new());
            }
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        if let (Some(buffer), Some(writer)) = (self.buffer.take(), self.writer.as_mut()) {
            info!("tee: flushing {} buffered record(s)", buffer.len());
            writer.write_batch(&buffer)?;
        }
        self.filter.finalize()?;
        if let Some(writer) = &mut self.writer {
            writer.finalize()?;
        }
        Ok(())
    }
}

impl LdxFilter for TeeFilter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn generates(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn process_record(&mut self, record: LdxRecord) -> Result<LdxRecordBatch> {
        if self.gate.is_open(&record)? {
            let forwarded = self.filter.process_record(record.clone())?;
            for copy in forwarded {
                match (&mut self.writer, &mut self.buffer) {
                    (Some(_), Some(buffer)) => buffer.push(copy),
                    (Some(writer), None) => writer.write_stream(&copy)?,
                    (None, _) => {}
                }
            }
        }
        Ok(vec![record])
    }
}
