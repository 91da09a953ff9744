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

//! # Ldx Filter Plugins
//!
//! The built-in filter stages. Each filter implements `LdxFilter` and is
//! registered in `registry::with_defaults`.

mod max_records;
mod metadata;
mod multi;
mod pairs_to_pretrain;
mod randomize;
mod remove_empty;
mod split;
mod sub_process;
mod tee;

pub use max_records::MaxRecordsFilter;
pub use metadata::{MetadataAction, MetadataFilter};
pub use multi::LdxMultiFilter;
pub use pairs_to_pretrain::PairsToPretrainFilter;
pub use randomize::RandomizeRecordsFilter;
pub use remove_empty::RemoveEmptyFilter;
pub use split::SplitFilter;
pub use sub_process::SubProcessFilter;
pub use tee::TeeFilter;

use log::info;

use crate::comparison::{compare_values, LdxComparison};
use crate::errors::{LdxError, Result};
use crate::record::LdxRecord;

/// Optional metadata predicate gating the sub-flow filters.
///
/// Without a configured field the gate is always open. With one, the gate
/// is open only when the record carries that metadata field and the
/// comparison against the literal holds; a record without the field keeps
/// the gate closed.
#[derive(Clone, Debug)]
pub(crate) struct MetadataGate {
    pub field: Option<String>,
    pub comparison: LdxComparison,
    pub value: Option<String>,
}

impl Default for MetadataGate {
    fn default() -> Self {
        MetadataGate {
            field: None,
            comparison: LdxComparison::Equal,
            value: None,
        }
    }
}

impl MetadataGate {
    /// Fails when a field is configured without a value to compare against.
    pub fn validate(&self, context: &str) -> Result<()> {
        if self.field.is_some() && self.value.is_none() {
            return Err(LdxError::config(format!(
                "{context}: no value provided to compare with"
            )));
        }
        Ok(())
    }

    pub fn is_open(&self, record: &LdxRecord) -> Result<bool> {
        let (field, value) = match (&self.field, &self.value) {
            (Some(field), Some(value)) => (field, value),
            _ => return Ok(true),
        };
        let actual = match record.metadata().and_then(|meta| meta.get(field)) {
            Some(actual) => actual,
            None => return Ok(false),
        };
        let open = compare_values(actual, self.comparison, value)?;
        info!(
            "field '{field}': {actual} {} {value} = {open}",
            self.comparison
        );
        Ok(open)
    }
}
