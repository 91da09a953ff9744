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

use crate::errors::Result;
use crate::plugin::{LdxDomain, LdxFilter, LdxPlugin};
use crate::record::{LdxDataKind, LdxRecord, LdxRecordBatch};
use crate::session::LdxSessionRef;

/// Combines several filters into one chain.
///
/// A batch flows through the members in order; when a member drops every
/// record the remaining members are skipped. The chain accepts what its
/// first member accepts and generates what its last member generates.
#[derive(Default)]
pub struct LdxMultiFilter {
    filters: Vec<Box<dyn LdxFilter>>,
}

impl LdxMultiFilter {
    pub fn new(filters: Vec<Box<dyn LdxFilter>>) -> Self {
        LdxMultiFilter { filters }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }
}

impl LdxPlugin for LdxMultiFilter {
    fn name(&self) -> &'static str {
        "multi-filter"
    }

    fn description(&self) -> &'static str {
        "Chains multiple filters, feeding the output of one into the next."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        let mut domains = Vec::new();
        for filter in &self.filters {
            for domain in filter.domains() {
                if !domains.contains(&domain) {
                    domains.push(domain);
                }
            }
        }
        if domains.is_empty() {
            domains.push(LdxDomain::Any);
        }
        domains
    }

    fn initialize(&mut self, session: &LdxSessionRef) -> Result<()> {
        for filter in &mut self.filters {
            filter.initialize(session)?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let mut result = Ok(());
        for filter in &mut self.filters {
            if let Err(err) = filter.finalize() {
                result = Err(err);
            }
        }
        result
    }
}

impl LdxFilter for LdxMultiFilter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        match self.filters.first() {
            Some(first) => first.accepts(),
            None => LdxDataKind::ALL.to_vec(),
        }
    }

    fn generates(&self) -> Vec<LdxDataKind> {
        match self.filters.last() {
            Some(last) => last.generates(),
            None => LdxDataKind::ALL.to_vec(),
        }
    }

    fn process_record(&mut self, record: LdxRecord) -> Result<LdxRecordBatch> {
        self.process_batch(vec![record])
    }

    fn requires_batch(&self) -> bool {
        self.filters.iter().any(|f| f.requires_batch())
    }

    fn process_batch(&mut self, batch: LdxRecordBatch) -> Result<LdxRecordBatch> {
        let mut current = batch;
        for filter in &mut self.filters {
            if current.is_empty() {
                break;
            }
            current = filter.process_batch(current)?;
        }
        Ok(current)
    }
}
