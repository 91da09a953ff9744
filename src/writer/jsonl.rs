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

use std::io::Write;

use super::OutputSink;
use crate::args::LdxArgParser;
use crate::reader::TranslationLine;
use crate::errors::{LdxError, Result};
use crate::plugin::{ensure_accepted, require_session, LdxDomain, LdxPlugin, LdxWriter, LdxWriterMode};
use crate::record::{LdxDataKind, LdxRecord};
use crate::session::LdxSessionRef;

/// Writes pair records as JSON Lines, one object per record.
pub struct JsonlPairWriter {
    sink: OutputSink,
    session: Option<LdxSessionRef>,
}

impl Default for JsonlPairWriter {
    fn default() -> Self {
        JsonlPairWriter {
            sink: OutputSink::new(".jsonl"),
            session: None,
        }
    }
}

impl LdxPlugin for JsonlPairWriter {
    fn name(&self) -> &'static str {
        "to-jsonl-pr"
    }

    fn description(&self) -> &'static str {
        "Writes prompt/response pairs in JSON Lines format."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Pairs]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.sink.parse(self.name(), &mut parser)?;
        parser.finish()
    }

    fn initialize(&mut self, session: &LdxSessionRef) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.sink.close()
    }
}

impl LdxWriter for JsonlPairWriter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        vec![LdxDataKind::Pair]
    }

    fn mode(&self) -> LdxWriterMode {
        LdxWriterMode::Stream
    }

    fn write_stream(&mut self, record: &LdxRecord) -> Result<()> {
        ensure_accepted(self.name(), record, &self.accepts())?;
        let pair = match record {
            LdxRecord::Pair(pair) => pair,
            _ => unreachable!(),
        };
        let session = require_session(&self.session, self.name())?.clone();
        let stream = self.sink.stream(&session)?;
        serde_json::to_writer(&mut *stream, pair)?;
        stream.write_all(b"\n").map_err(LdxError::from)
    }
}

/// Writes translation records as JSON Lines with a `translation` object.
pub struct JsonlTranslationWriter {
    sink: OutputSink,
    session: Option<LdxSessionRef>,
}

impl Default for JsonlTranslationWriter {
    fn default() -> Self {
        JsonlTranslationWriter {
            sink: OutputSink::new(".jsonl"),
            session: None,
        }
    }
}

impl LdxPlugin for JsonlTranslationWriter {
    fn name(&self) -> &'static str {
        "to-jsonl-t9n"
    }

    fn description(&self) -> &'static str {
        "Writes translation records in JSON Lines format, \
         e.g. {\"translation\": {\"en\": \"...\", \"ro\": \"...\"}}."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Translation]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.sink.parse(self.name(), &mut parser)?;
        parser.finish()
    }

    fn initialize(&mut self, session: &LdxSessionRef) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.sink.close()
    }
}

impl LdxWriter for JsonlTranslationWriter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        vec![LdxDataKind::Translation]
    }

    fn mode(&self) -> LdxWriterMode {
        LdxWriterMode::Stream
    }

    fn write_stream(&mut self, record: &LdxRecord) -> Result<()> {
        ensure_accepted(self.name(), record, &self.accepts())?;
        let translations = match record {
            LdxRecord::Translation(data) => &data.translations,
            _ => unreachable!(),
        };
        let line = TranslationLine {
            translation: translations.clone(),
        };
        let session = require_session(&self.session, self.name())?.clone();
        let stream = self.sink.stream(&session)?;
        serde_json::to_writer(&mut *stream, &line)?;
        stream.write_all(b"\n").map_err(LdxError::from)
    }
}
