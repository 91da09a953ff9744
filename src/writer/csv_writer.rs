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

use log::debug;

use super::OutputSink;
use crate::args::LdxArgParser;
use crate::errors::Result;
use crate::io::create_output;
use crate::plugin::{ensure_accepted, require_session, LdxDomain, LdxPlugin, LdxWriter, LdxWriterMode};
use crate::record::{LdxDataKind, LdxRecord};
use crate::session::LdxSessionRef;

/// Writes classification records as CSV, one file per batch.
///
/// Batch mode: the execution engine hands over the whole filtered
/// collection of a reader segment in one call.
pub struct CsvClassificationWriter {
    sink: OutputSink,
    session: Option<LdxSessionRef>,
    col_text: String,
    col_label: String,
}

impl Default for CsvClassificationWriter {
    fn default() -> Self {
        CsvClassificationWriter {
            sink: OutputSink::new(".csv"),
            session: None,
            col_text: "text".to_string(),
            col_label: "label".to_string(),
        }
    }
}

impl LdxPlugin for CsvClassificationWriter {
    fn name(&self) -> &'static str {
        "to-csv-cl"
    }

    fn description(&self) -> &'static str {
        "Writes classification records as CSV with a header row."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Classification]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.sink.parse(self.name(), &mut parser)?;
        if let Some(col) = parser.value("-t", "--col-text")? {
            self.col_text = col;
        }
        if let Some(col) = parser.value("-l", "--col-label")? {
            self.col_label = col;
        }
        parser.finish()
    }

    fn initialize(&mut self, session: &LdxSessionRef) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }
}

impl LdxWriter for CsvClassificationWriter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        vec![LdxDataKind::Classification]
    }

    fn mode(&self) -> LdxWriterMode {
        LdxWriterMode::Batch
    }

    fn write_batch(&mut self, batch: &[LdxRecord]) -> Result<()> {
        let session = require_session(&self.session, self.name())?.clone();
        let compression = session.borrow().options.compression;
        let path = self.sink.resolve(&session);
        debug!("writing {} record(s) to {}", batch.len(), path.display());

        let mut writer = csv::Writer::from_writer(create_output(&path, compression)?);
        writer.write_record([self.col_text.as_str(), self.col_label.as_str()])?;
        for record in batch {
            ensure_accepted(self.name(), record, &self.accepts())?;
            let data = match record {
                LdxRecord::Classification(data) => data,
                _ => unreachable!(),
            };
            let label = data
                .label
                .as_ref()
                .map(|l| l.to_string())
                .unwrap_or_default();
            writer.write_record([data.text.as_deref().unwrap_or(""), label.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }
}
