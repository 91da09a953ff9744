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

use crate::args::LdxArgParser;
use crate::errors::{LdxError, Result};
use crate::plugin::{LdxDomain, LdxFilter, LdxPlugin};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch};
use crate::session::LdxSessionRef;

/// Drops every record once the configured count has passed through.
pub struct MaxRecordsFilter {
    max: usize,
    seen: usize,
}

impl Default for MaxRecordsFilter {
    fn default() -> Self {
        MaxRecordsFilter { max: 0, seen: 0 }
    }
}

impl LdxPlugin for MaxRecordsFilter {
    fn name(&self) -> &'static str {
        "max-records"
    }

    fn description(&self) -> &'static str {
        "Suppresses all records after the maximum number of records has been reached."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Any]
    }

    fn parse_args(&mut self, args: &[String]) -> Result<()> {
        let mut parser = LdxArgParser::new(self.name(), args);
        self.max = parser
            .parsed_value("-m", "--max")?
            .ok_or_else(|| LdxError::config("max-records: no maximum provided"))?;
        if self.max == 0 {
            return Err(LdxError::config("max-records: maximum must be positive"));
        }
        parser.finish()
    }

    fn initialize(&mut self, _session: &LdxSessionRef) -> Result<()> {
        self.seen = 0;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        info!("max-records: let {} record(s) through", self.seen.min(self.max));
        Ok(())
    }
}

impl LdxFilter for MaxRecordsFilter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn generates(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn process_record(&mut self, record: LdxRecord) -> Result<LdxRecordBatch> {
        self.seen += 1;
        if self.seen <= self.max {
            Ok(vec![record])
        } else {
            Ok(Vec::new())
        }
    }
}
