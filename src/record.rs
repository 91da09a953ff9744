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

//! # Ldx Record Module
//!
//! This module provides the core data structures for representing individual
//! data records in the Ldx framework. `LdxRecord` is the fundamental unit of
//! data that flows through Ldx pipelines.
//!
//! ## Design Principles
//!
//! - **Closed variant set**: records are one of four dataset shapes
//!   (prompt/response pairs, pretraining text, classification examples,
//!   translation tuples), modelled as a sum type so that filters
//!   pattern-match exhaustively instead of downcasting
//! - **Shared metadata**: every variant carries an optional key/value map
//!   for auxiliary attributes (split assignment, provenance, scores)
//! - **Value semantics**: records are `Clone`-able; ownership transfers to
//!   whichever stage currently processes them
//!
//! ## Usage Example
//!
//! ```rust
//! use ldx::record::{LdxRecord, PairData};
//! use serde_json::json;
//!
//! let mut record = LdxRecord::from(PairData::new(
//!     Some("Summarize.".into()),
//!     Some("A long text.".into()),
//!     Some("A text.".into()),
//! ));
//! record.metadata_mut().insert("split".into(), json!("train"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic metadata map that may accompany a record.
///
/// Keys are strings, values arbitrary JSON scalars or strings. Insertion
/// order is irrelevant; common uses are split assignments, provenance
/// information and quality scores.
pub type LdxMetadata = Map<String, Value>;

/// Tag identifying which record variant a stage consumes or produces.
///
/// Readers declare the kinds they generate, writers the kinds they accept,
/// filters both. The compatibility checker intersects these lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LdxDataKind {
    Pair,
    Pretrain,
    Classification,
    Translation,
}

impl LdxDataKind {
    /// All record kinds, in declaration order.
    pub const ALL: [LdxDataKind; 4] = [
        LdxDataKind::Pair,
        LdxDataKind::Pretrain,
        LdxDataKind::Classification,
        LdxDataKind::Translation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LdxDataKind::Pair => "pair",
            LdxDataKind::Pretrain => "pretrain",
            LdxDataKind::Classification => "classification",
            LdxDataKind::Translation => "translation",
        }
    }
}

impl fmt::Display for LdxDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification label, either a symbolic name or a numeric class index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LdxLabel {
    Index(i64),
    Text(String),
}

impl fmt::Display for LdxLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LdxLabel::Index(i) => write!(f, "{i}"),
            LdxLabel::Text(s) => f.write_str(s),
        }
    }
}

/// Container for instruction/input/output pair data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PairData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<LdxMetadata>,
}

impl PairData {
    pub fn new(
        instruction: Option<String>,
        input: Option<String>,
        output: Option<String>,
    ) -> Self {
        PairData {
            instruction,
            input,
            output,
            meta: None,
        }
    }
}

/// Container for pretrain text data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PretrainData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<LdxMetadata>,
}

impl PretrainData {
    pub fn new(content: Option<String>) -> Self {
        PretrainData {
            content,
            meta: None,
        }
    }
}

/// Container for classification data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LdxLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<LdxMetadata>,
}

impl ClassificationData {
    pub fn new(text: Option<String>, label: Option<LdxLabel>) -> Self {
        ClassificationData {
            text,
            label,
            meta: None,
        }
    }
}

/// Container for translation data: language code -> text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationData {
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<LdxMetadata>,
}

impl TranslationData {
    pub fn new(translations: BTreeMap<String, String>) -> Self {
        TranslationData {
            translations,
            meta: None,
        }
    }
}

/// Fundamental data unit processed by Ldx pipelines.
///
/// Each variant wraps one of the dataset-shape containers; all variants
/// share the optional metadata map accessed through the methods below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LdxRecord {
    Pair(PairData),
    Pretrain(PretrainData),
    Classification(ClassificationData),
    Translation(TranslationData),
}

impl LdxRecord {
    /// Returns the variant tag of this record.
    pub fn kind(&self) -> LdxDataKind {
        match self {
            LdxRecord::Pair(_) => LdxDataKind::Pair,
            LdxRecord::Pretrain(_) => LdxDataKind::Pretrain,
            LdxRecord::Classification(_) => LdxDataKind::Classification,
            LdxRecord::Translation(_) => LdxDataKind::Translation,
        }
    }

    /// Returns whether metadata is present.
    pub fn has_metadata(&self) -> bool {
        self.metadata().is_some()
    }

    /// Returns the metadata map, if any.
    pub fn metadata(&self) -> Option<&LdxMetadata> {
        match self {
            LdxRecord::Pair(d) => d.meta.as_ref(),
            LdxRecord::Pretrain(d) => d.meta.as_ref(),
            LdxRecord::Classification(d) => d.meta.as_ref(),
            LdxRecord::Translation(d) => d.meta.as_ref(),
        }
    }

    /// Replaces the metadata map.
    pub fn set_metadata(&mut self, metadata: Option<LdxMetadata>) {
        match self {
            LdxRecord::Pair(d) => d.meta = metadata,
            LdxRecord::Pretrain(d) => d.meta = metadata,
            LdxRecord::Classification(d) => d.meta = metadata,
            LdxRecord::Translation(d) => d.meta = metadata,
        }
    }

    /// Returns a mutable reference to the metadata map, creating it if necessary.
    pub fn metadata_mut(&mut self) -> &mut LdxMetadata {
        let meta = match self {
            LdxRecord::Pair(d) => &mut d.meta,
            LdxRecord::Pretrain(d) => &mut d.meta,
            LdxRecord::Classification(d) => &mut d.meta,
            LdxRecord::Translation(d) => &mut d.meta,
        };
        meta.get_or_insert_with(LdxMetadata::new)
    }

    /// Attaches metadata to the record, builder style.
    pub fn with_metadata(mut self, metadata: LdxMetadata) -> Self {
        self.set_metadata(Some(metadata));
        self
    }
}

impl From<PairData> for LdxRecord {
    fn from(data: PairData) -> Self {
        LdxRecord::Pair(data)
    }
}

impl From<PretrainData> for LdxRecord {
    fn from(data: PretrainData) -> Self {
        LdxRecord::Pretrain(data)
    }
}

impl From<ClassificationData> for LdxRecord {
    fn from(data: ClassificationData) -> Self {
        LdxRecord::Classification(data)
    }
}

impl From<TranslationData> for LdxRecord {
    fn from(data: TranslationData) -> Self {
        LdxRecord::Translation(data)
    }
}

/// Convenience alias for working on batches of records.
pub type LdxRecordBatch = Vec<LdxRecord>;
