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

use std::collections::BTreeMap;
use std::io::BufRead;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::InputCursor;
use crate::args::LdxArgParser;
use crate::errors::Result;
use crate::io::open_input;
use crate::plugin::{require_session, LdxDomain, LdxPlugin, LdxReader};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch, PairData, TranslationData};
use crate::session::LdxSessionRef;

/// One line of translation JSONL: `{"translation": {"en": "...", "de": "..."}}`.
#[derive(Serialize, Deserialize)]
pub(crate) struct TranslationLine {
    pub translation: BTreeMap<String, String>,
}

/// Reads pair records from JSON Lines files.
///
/// Malformed lines are logged and skipped; they do not abort the file.
#[derive(Default)]
pub struct JsonlPairReader {
    cursor: InputCursor,
    session: Option<LdxSessionRef>,
}

impl LdxPlugin for JsonlPairReader {
    fn name(&self) -> &'static str {
        "from-jsonl-pr"
    }

    fn description(&self) -> &'static str {
        "Reads prompt/response pairs in JSON Lines format."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Pairs]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.cursor.parse(self.name(), &mut parser)?;
        parser.finish()
    }

    fn initialize(&mut self, session: &LdxSessionRef) -> Result<()> {
        self.cursor.validate(self.name())?;
        self.session = Some(session.clone());
        Ok(())
    }
}

impl LdxReader for JsonlPairReader {
    fn generates(&self) -> Vec<LdxDataKind> {
        vec![LdxDataKind::Pair]
    }

    fn read(&mut self) -> Result<LdxRecordBatch> {
        let name = self.name();
        let session = require_session(&self.session, name)?.clone();
        let path = match self.cursor.advance(&session) {
            Some(path) => path,
            None => return Ok(Vec::new()),
        };
        debug!("reading {}", path.display());

        let mut records = Vec::new();
        for (number, line) in open_input(&path)?.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<PairData>(&line) {
                Ok(pair) => records.push(LdxRecord::from(pair)),
                Err(err) => warn!(
                    "{}:{}: skipping malformed line: {err}",
                    path.display(),
                    number + 1
                ),
            }
        }
        Ok(records)
    }

    fn has_finished(&self) -> bool {
        self.cursor.has_finished()
    }
}

/// Reads translation records from JSON Lines files.
///
/// Each line carries a `translation` object mapping language codes to text.
#[derive(Default)]
pub struct JsonlTranslationReader {
    cursor: InputCursor,
    session: Option<LdxSessionRef>,
}

impl LdxPlugin for JsonlTranslationReader {
    fn name(&self) -> &'static str {
        "from-jsonl-t9n"
    }

    fn description(&self) -> &'static str {
        "Reads translation records in JSON Lines format, \
         e.g. {\"translation\": {\"en\": \"...\", \"ro\": \"...\"}}."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Translation]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.cursor.parse(self.name(), &mut parser)?;
        parser.finish()
    }

    fn initialize(&mut self, session: &LdxSessionRef) -> Result<()> {
        self.cursor.validate(self.name())?;
        self.session = Some(session.clone());
        Ok(())
    }
}

impl LdxReader for JsonlTranslationReader {
    fn generates(&self) -> Vec<LdxDataKind> {
        vec![LdxDataKind::Translation]
    }

    fn read(&mut self) -> Result<LdxRecordBatch> {
        let name = self.name();
        let session = require_session(&self.session, name)?.clone();
        let path = match self.cursor.advance(&session) {
            Some(path) => path,
            None => return Ok(Vec::new()),
        };
        debug!("reading {}", path.display());

        let mut records = Vec::new();
        for (number, line) in open_input(&path)?.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<TranslationLine>(&line) {
                Ok(parsed) => {
                    records.push(LdxRecord::from(TranslationData::new(parsed.translation)))
                }
                Err(err) => warn!(
                    "{}:{}: skipping malformed line: {err}",
                    path.display(),
                    number + 1
                ),
            }
        }
        Ok(records)
    }

    fn has_finished(&self) -> bool {
        self.cursor.has_finished()
    }
}
