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

use log::{debug, warn};

use super::InputCursor;
use crate::args::LdxArgParser;
use crate::errors::Result;
use crate::io::open_input;
use crate::plugin::{require_session, LdxDomain, LdxPlugin, LdxReader};
use crate::record::{ClassificationData, LdxDataKind, LdxLabel, LdxRecord, LdxRecordBatch};
use crate::session::LdxSessionRef;

/// Reads classification records from CSV files with a header row.
///
/// The text and label columns default to `text` and `label`; numeric labels
/// become class indices, everything else a symbolic label.
pub struct CsvClassificationReader {
    cursor: InputCursor,
    session: Option<LdxSessionRef>,
    col_text: String,
    col_label: String,
}

impl Default for CsvClassificationReader {
    fn default() -> Self {
        CsvClassificationReader {
            cursor: InputCursor::default(),
            session: None,
            col_text: "text".to_string(),
            col_label: "label".to_string(),
        }
    }
}

impl LdxPlugin for CsvClassificationReader {
    fn name(&self) -> &'static str {
        "from-csv-cl"
    }

    fn description(&self) -> &'static str {
        "Reads classification records from CSV files with a header row."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Classification]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.cursor.parse(self.name(), &mut parser)?;
        if let Some(col) = parser.value("-t", "--col-text")? {
            self.col_text = col;
        }
        if let Some(col) = parser.value("-l", "--col-label")? {
            self.col_label = col;
        }
        parser.finish()
    }

    fn initialize(&mut self, session: &LdxSessionRef) -> Result<()> {
        self.cursor.validate(self.name())?;
        self.session = Some(session.clone());
        Ok(())
    }
}

impl LdxReader for CsvClassificationReader {
    fn generates(&self) -> Vec<LdxDataKind> {
        vec![LdxDataKind::Classification]
    }

    fn read(&mut self) -> Result<LdxRecordBatch> {
        let name = self.name();
        let session = require_session(&self.session, name)?.clone();
        let path = match self.cursor.advance(&session) {
            Some(path) => path,
            None => return Ok(Vec::new()),
        };
        debug!("reading {}", path.display());

        let mut reader = csv::Reader::from_reader(open_input(&path)?);
        let headers = reader.headers()?.clone();
        let text_idx = headers.iter().position(|h| h == self.col_text);
        let label_idx = headers.iter().position(|h| h == self.col_label);

        let mut records = Vec::new();
        for (number, row) in reader.records().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    warn!(
                        "{}:{}: skipping malformed row: {err}",
                        path.display(),
                        number + 2
                    );
                    continue;
                }
            };
            let text = text_idx
                .and_then(|i| row.get(i))
                .map(|s| s.to_string());
            let label = label_idx.and_then(|i| row.get(i)).map(|raw| {
                match raw.parse::<i64>() {
                    Ok(index) => LdxLabel::Index(index),
                    Err(_) => LdxLabel::Text(raw.to_string()),
                }
            });
            records.push(LdxRecord::from(ClassificationData::new(text, label)));
        }
        Ok(records)
    }

    fn has_finished(&self) -> bool {
        self.cursor.has_finished()
    }
}
