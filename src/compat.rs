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

//! # Ldx Compatibility Module
//!
//! Pre-flight checks that adjacent pipeline stages can exchange records.
//! Two neighbors are compatible when their domain lists intersect (the
//! `any` domain matches everything) and the upstream's generated record
//! kinds intersect the downstream's accepted kinds. Violations surface as
//! `LdxError::Compatibility` before the first record is read.

use crate::errors::{LdxError, Result};
use crate::plugin::{domains_to_str, LdxDomain, LdxFilter, LdxReader, LdxWriter};
use crate::record::LdxDataKind;

/// Declarative summary of one pipeline stage, used for compatibility checks.
#[derive(Clone, Debug)]
pub struct LdxStageInfo {
    pub name: String,
    pub domains: Vec<LdxDomain>,
    /// Record kinds produced; empty for writers.
    pub generates: Vec<LdxDataKind>,
    /// Record kinds consumed; empty for readers.
    pub accepts: Vec<LdxDataKind>,
}

impl LdxStageInfo {
    pub fn of_reader(reader: &dyn LdxReader) -> Self {
        LdxStageInfo {
            name: reader.name().to_string(),
            domains: reader.domains(),
            generates: reader.generates(),
            accepts: Vec::new(),
        }
    }

    pub fn of_filter(filter: &dyn LdxFilter) -> Self {
        LdxStageInfo {
            name: filter.name().to_string(),
            domains: filter.domains(),
            generates: filter.generates(),
            accepts: filter.accepts(),
        }
    }

    pub fn of_writer(writer: &dyn LdxWriter) -> Self {
        LdxStageInfo {
            name: writer.name().to_string(),
            domains: writer.domains(),
            generates: Vec::new(),
            accepts: writer.accepts(),
        }
    }
}

fn domains_overlap(upstream: &[LdxDomain], downstream: &[LdxDomain]) -> bool {
    if upstream.contains(&LdxDomain::Any) || downstream.contains(&LdxDomain::Any) {
        return true;
    }
    upstream.iter().any(|d| downstream.contains(d))
}

fn kinds_overlap(generates: &[LdxDataKind], accepts: &[LdxDataKind]) -> bool {
    generates.iter().any(|k| accepts.contains(k))
}

/// Checks a pipeline described as an ordered list of stage summaries.
///
/// Every stage must declare at least one domain, even in a single-stage
/// pipeline. Each adjacent pair must overlap in domain and in record kind.
pub fn check_compatibility(stages: &[LdxStageInfo]) -> Result<()> {
    for stage in stages {
        if stage.domains.is_empty() {
            return Err(LdxError::config(format!(
                "stage '{}' declares no domains",
                stage.name
            )));
        }
    }

    for pair in stages.windows(2) {
        let (upstream, downstream) = (&pair[0], &pair[1]);
        if !domains_overlap(&upstream.domains, &downstream.domains) {
            return Err(LdxError::compatibility(
                &upstream.name,
                &downstream.name,
                format!(
                    "domains do not overlap ({} vs {})",
                    domains_to_str(&upstream.domains),
                    domains_to_str(&downstream.domains)
                ),
            ));
        }
        if !kinds_overlap(&upstream.generates, &downstream.accepts) {
            return Err(LdxError::compatibility(
                &upstream.name,
                &downstream.name,
                "no common record kind between output and input",
            ));
        }
    }

    Ok(())
}
