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
use crate::errors::{LdxError, Result};
use crate::plugin::{ensure_accepted, require_session, LdxDomain, LdxPlugin, LdxWriter, LdxWriterMode};
use crate::record::{LdxDataKind, LdxRecord};
use crate::session::LdxSessionRef;

/// Writes pretrain records as plain text, records separated by a blank line.
pub struct TxtPretrainWriter {
    sink: OutputSink,
    session: Option<LdxSessionRef>,
    first: bool,
}

impl Default for TxtPretrainWriter {
    fn default() -> Self {
        TxtPretrainWriter {
            sink: OutputSink::new(".txt"),
            session: None,
            first: true,
        }
    }
}

impl LdxPlugin for TxtPretrainWriter {
    fn name(&self) -> &'static str {
        "to-txt-pt"
    }

    fn description(&self) -> &'static str {
        "Writes pretrain data as plain text, separating records with a blank line."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Pretrain]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.sink.parse(self.name(), &mut parser)?;
        parser.finish()
    }

    fn initialize(&mut self, session: &LdxSessionRef) -> Result<()> {
        self.session = Some(session.clone());
        self.first = true;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.sink.close()
    }
}

impl LdxWriter for TxtPretrainWriter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        vec![LdxDataKind::Pretrain]
    }

    fn mode(&self) -> LdxWriterMode {
        LdxWriterMode::Stream
    }

    fn write_stream(&mut self, record: &LdxRecord) -> Result<()> {
        ensure_accepted(self.name(), record, &self.accepts())?;
        let content = match record {
            LdxRecord::Pretrain(data) => data.content.as_deref().unwrap_or(""),
            _ => unreachable!(),
        };
        let session = require_session(&self.session, self.name())?.clone();
        let stream = self.sink.stream(&session)?;
        if !self.first {
            stream.write_all(b"\n").map_err(LdxError::from)?;
        }
        stream.write_all(content.as_bytes())?;
        stream.write_all(b"\n").map_err(LdxError::from)?;
        self.first = false;
        Ok(())
    }
}
