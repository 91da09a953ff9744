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
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::args::LdxArgParser;
use crate::errors::Result;
use crate::plugin::{LdxDomain, LdxFilter, LdxPlugin};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch};
use crate::session::LdxSessionRef;

/// Shuffles each batch of records, optionally with a fixed seed.
///
/// Needs the whole collection at once, so it reports `requires_batch()`;
/// the execution engine drains the reader before applying it.
#[derive(Default)]
pub struct RandomizeRecordsFilter {
    seed: Option<u64>,
}

impl LdxPlugin for RandomizeRecordsFilter {
    fn name(&self) -> &'static str {
        "randomize-records"
    }

    fn description(&self) -> &'static str {
        "Randomizes the order of the records, optionally using a fixed seed."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Any]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.seed = parser.parsed_value("-s", "--seed")?;
        parser.finish()
    }

    fn initialize(&mut self, _session: &LdxSessionRef) -> Result<()> {
        Ok(())
    }
}

impl LdxFilter for RandomizeRecordsFilter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn generates(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn process_record(&mut self, record: LdxRecord) -> Result<LdxRecordBatch> {
        Ok(vec![record])
    }

    fn requires_batch(&self) -> bool {
        true
    }

    fn process_batch(&mut self, mut batch: LdxRecordBatch) -> Result<LdxRecordBatch> {
        debug!("shuffling {} record(s), seed={:?}", batch.len(), self.seed);
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        batch.shuffle(&mut rng);
        Ok(batch)
    }
}
