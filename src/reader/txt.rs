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

use std::io::Read;

use log::debug;

use super::InputCursor;
use crate::args::LdxArgParser;
use crate::errors::Result;
use crate::io::open_input;
use crate::plugin::{require_session, LdxDomain, LdxPlugin, LdxReader};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch, PretrainData};
use crate::session::LdxSessionRef;

/// Reads plain-text files as pretrain records, one record per file.
#[derive(Default)]
pub struct TxtPretrainReader {
    cursor: InputCursor,
    session: Option<LdxSessionRef>,
}

impl LdxPlugin for TxtPretrainReader {
    fn name(&self) -> &'static str {
        "from-txt-pt"
    }

    fn description(&self) -> &'static str {
        "Reads plain-text files as pretrain data, each file becoming one record."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Pretrain]
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

impl LdxReader for TxtPretrainReader {
    fn generates(&self) -> Vec<LdxDataKind> {
        vec![LdxDataKind::Pretrain]
    }

    fn read(&mut self) -> Result<LdxRecordBatch> {
        let name = self.name();
        let session = require_session(&self.session, name)?.clone();
        let path = match self.cursor.advance(&session) {
            Some(path) => path,
            None => return Ok(Vec::new()),
        };
        debug!("reading {}", path.display());

        let mut content = String::new();
        open_input(&path)?.read_to_string(&mut content)?;
        Ok(vec![LdxRecord::from(PretrainData::new(Some(content)))])
    }

    fn has_finished(&self) -> bool {
        self.cursor.has_finished()
    }
}
