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

use crate::errors::Result;
use crate::plugin::{LdxDomain, LdxFilter, LdxPlugin};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch};
use crate::session::LdxSessionRef;

fn is_blank(text: &Option<String>) -> bool {
    match text {
        Some(s) => s.trim().is_empty(),
        None => true,
    }
}

/// Drops records whose textual payload is empty or whitespace-only.
#[derive(Default)]
pub struct RemoveEmptyFilter {
    removed: usize,
}

impl RemoveEmptyFilter {
    fn is_empty_record(record: &LdxRecord) -> bool {
        match record {
            LdxRecord::Pair(d) => {
                is_blank(&d.instruction) && is_blank(&d.input) && is_blank(&d.output)
            }
            LdxRecord::Pretrain(d) => is_blank(&d.content),
            LdxRecord::Classification(d) => is_blank(&d.text),
            LdxRecord::Translation(d) => {
                d.translations.values().all(|text| text.trim().is_empty())
            }
        }
    }
}

impl LdxPlugin for RemoveEmptyFilter {
    fn name(&self) -> &'static str {
        "remove-empty"
    }

    fn description(&self) -> &'static str {
        "Removes records with empty or whitespace-only text content."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Any]
    }

    fn initialize(&mut self, _session: &LdxSessionRef) -> Result<()> {
        self.removed = 0;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        info!("remove-empty: removed {} record(s)", self.removed);
        Ok(())
    }
}

impl LdxFilter for RemoveEmptyFilter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn generates(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn process_record(&mut self, record: LdxRecord) -> Result<LdxRecordBatch> {
        if Self::is_empty_record(&record) {
            self.removed += 1;
            Ok(Vec::new())
        } else {
            Ok(vec![record])
        }
    }
}
