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

use crate::args::LdxArgParser;
use crate::errors::{LdxError, Result};
use crate::plugin::{ensure_accepted, LdxDomain, LdxFilter, LdxPlugin};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch, PretrainData};
use crate::session::LdxSessionRef;

const PAIR_FIELDS: [&str; 3] = ["instruction", "input", "output"];

/// Converts prompt/response pairs into pretrain records.
///
/// The configured pair fields are concatenated, in the given order and
/// separated by a single space, into the pretrain content.
#[derive(Default)]
pub struct PairsToPretrainFilter {
    fields: Vec<String>,
}

impl LdxPlugin for PairsToPretrainFilter {
    fn name(&self) -> &'static str {
        "pairs-to-pretrain"
    }

    fn description(&self) -> &'static str {
        "Converts pair records to pretrain ones by concatenating the selected fields."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Pairs, LdxDomain::Pretrain]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.fields = parser.values("-f", "--fields")?;
        for field in &self.fields {
            if !PAIR_FIELDS.contains(&field.as_str()) {
                return Err(LdxError::config(format!(
                    "pairs-to-pretrain: unknown pair field '{field}' (supported: {})",
                    PAIR_FIELDS.join(" ")
                )));
            }
        }
        parser.finish()
    }

    fn initialize(&mut self, _session: &LdxSessionRef) -> Result<()> {
        if self.fields.is_empty() {
            return Err(LdxError::config("pairs-to-pretrain: no fields provided"));
        }
        Ok(())
    }
}

impl LdxFilter for PairsToPretrainFilter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        vec![LdxDataKind::Pair]
    }

    fn generates(&self) -> Vec<LdxDataKind> {
        vec![LdxDataKind::Pretrain]
    }

    fn process_record(&mut self, record: LdxRecord) -> Result<LdxRecordBatch> {
        ensure_accepted(self.name(), &record, &self.accepts())?;
        let (pair, meta) = match record {
            LdxRecord::Pair(pair) => {
                let meta = pair.meta.clone();
                (pair, meta)
            }
            _ => unreachable!(),
        };
        let mut content = Vec::new();
        for field in &self.fields {
            let value = match field.as_str() {
                "instruction" => &pair.instruction,
                "input" => &pair.input,
                _ => &pair.output,
            };
            if let Some(value) = value {
                content.push(value.as_str());
            }
        }
        let mut pretrain = PretrainData::new(Some(content.join(" ")));
        pretrain.meta = meta;
        Ok(vec![LdxRecord::from(pretrain)])
    }
}
