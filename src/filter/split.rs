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

use std::path::PathBuf;

use log::info;

use crate::args::LdxArgParser;
use crate::errors::{LdxError, Result};
use crate::plugin::{require_session, LdxDomain, LdxFilter, LdxPlugin};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch};
use crate::session::LdxSessionRef;
use crate::splitter::{LdxSplitter, DEFAULT_SPLIT_KEY};

/// Assigns each record to a named split via the metadata key `split`.
///
/// The scheduler restarts whenever the session's current input changes, so
/// every input file receives the configured proportions independently.
#[derive(Default)]
pub struct SplitFilter {
    ratios: Vec<u32>,
    names: Vec<String>,
    splitter: Option<LdxSplitter>,
    session: Option<LdxSessionRef>,
    last_input: Option<PathBuf>,
}

impl LdxPlugin for SplitFilter {
    fn name(&self) -> &'static str {
        "split"
    }

    fn description(&self) -> &'static str {
        "Assigns records to the given split ratios by setting the 'split' meta-data value."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Any]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.ratios = parser
            .values("-r", "--ratios")?
            .iter()
            .map(|raw| {
                raw.parse::<u32>().map_err(|_| {
                    LdxError::config(format!("split: invalid ratio '{raw}'"))
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        self.names = parser.values("-n", "--names")?;
        parser.finish()
    }

    fn initialize(&mut self, session: &LdxSessionRef) -> Result<()> {
        self.splitter = Some(LdxSplitter::new(self.ratios.clone(), self.names.clone())?);
        self.session = Some(session.clone());
        self.last_input = None;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        if let Some(splitter) = &self.splitter {
            for (name, count) in splitter.stats() {
                info!("split '{name}': {count}");
            }
        }
        Ok(())
    }
}

impl LdxFilter for SplitFilter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn generates(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn process_record(&mut self, mut record: LdxRecord) -> Result<LdxRecordBatch> {
        let name = self.name();
        let session = require_session(&self.session, name)?;
        let current_input = session.borrow().current_input.clone();
        let splitter = self
            .splitter
            .as_mut()
            .ok_or_else(|| LdxError::pipeline(name, "not initialized"))?;

        if current_input != self.last_input {
            if splitter.counter() > 0 {
                info!("input changed, resetting splitter");
                splitter.reset();
            }
            self.last_input = current_input;
        }

        splitter.assign(&mut record, DEFAULT_SPLIT_KEY);
        Ok(vec![record])
    }
}
