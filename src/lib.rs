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

//! # Ldx Core Library
//!
//! Ldx converts LLM datasets between formats through single-pass pipelines
//! of plugins: one reader, any number of filters, an optional writer.
//!
//! ## Module Overview
//!
//! - **record**: the record sum type and dataset-shape containers
//! - **plugin**: the reader/filter/writer plugin contracts
//! - **session**: per-run state shared by every stage
//! - **registry**: plugin name resolution and pipeline assembly
//! - **compat**: pre-flight domain/record-kind compatibility checks
//! - **execution**: the streaming/batch pipeline driver
//! - **filter**: built-in filters, including `tee`/`sub-process` sub-flows
//! - **reader** / **writer**: built-in format adapters (JSON Lines, CSV, text)
//! - **splitter**: the deterministic ratio-based split scheduler
//! - **comparison**: the metadata comparison predicate
//! - **args**: command-line tokenization and per-plugin argument grouping
//! - **io**: compression-aware file helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ldx::execution::execute;
//! use ldx::registry::LdxRegistry;
//! use ldx::session::{LdxOptions, LdxSession};
//!
//! let registry = LdxRegistry::with_defaults();
//! let tokens: Vec<String> = [
//!     "from-jsonl-pr", "-i", "data.jsonl", "split", "-r", "80", "20",
//!     "-n", "train", "test", "to-jsonl-pr", "-o", "out/",
//! ]
//! .iter()
//! .map(|s| s.to_string())
//! .collect();
//!
//! let (_global, pipeline) = registry.assemble(&tokens).unwrap();
//! let session = LdxSession::new(LdxOptions::default()).into_shared();
//! execute(pipeline, &session).unwrap();
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, LdxError>`. Configuration and
//! compatibility errors surface before any record is read; record-level
//! errors abort the run but every stage is still finalized.

pub mod args;
pub mod comparison;
pub mod compat;
pub mod errors;
pub mod execution;
pub mod filter;
pub mod io;
pub mod plugin;
pub mod reader;
pub mod record;
pub mod registry;
pub mod session;
pub mod splitter;
pub mod writer;

pub use errors::{LdxError, Result};
pub use record::{
    ClassificationData, LdxDataKind, LdxLabel, LdxMetadata, LdxRecord, LdxRecordBatch, PairData,
    PretrainData, TranslationData,
};
pub use plugin::{LdxDomain, LdxFilter, LdxPlugin, LdxReader, LdxWriter, LdxWriterMode};
pub use session::{LdxOptions, LdxSession, LdxSessionRef};

pub use comparison::{compare_values, LdxComparison};
pub use compat::{check_compatibility, LdxStageInfo};
pub use execution::{execute, LdxPipeline};
pub use filter::LdxMultiFilter;
pub use io::LdxCompression;
pub use registry::{LdxPluginKind, LdxRegistry, LdxSubFlow};
pub use splitter::LdxSplitter;
