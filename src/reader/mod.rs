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

//! # Ldx Reader Plugins
//!
//! The built-in format readers. Every reader consumes one or more input
//! files; each `read()` call opens the next file, publishes it as the
//! session's current input and returns that file's records.

mod csv_reader;
mod jsonl;
mod txt;

pub use csv_reader::CsvClassificationReader;
pub use jsonl::{JsonlPairReader, JsonlTranslationReader};
pub(crate) use jsonl::TranslationLine;
pub use txt::TxtPretrainReader;

use std::collections::VecDeque;
use std::path::PathBuf;

use crate::args::LdxArgParser;
use crate::errors::{LdxError, Result};
use crate::session::LdxSessionRef;

/// Queue of input files shared by all readers.
///
/// Created during `parse_args`, validated during `initialize`, drained one
/// file per `read()` call.
#[derive(Debug, Default)]
pub(crate) struct InputCursor {
    pending: VecDeque<PathBuf>,
}

impl InputCursor {
    /// Consumes the `-i/--input` option (one or more paths).
    pub fn parse(&mut self, context: &str, parser: &mut LdxArgParser) -> Result<()> {
        let inputs = parser.values("-i", "--input")?;
        if inputs.is_empty() {
            return Err(LdxError::config(format!("{context}: no input file provided")));
        }
        self.pending = inputs.into_iter().map(PathBuf::from).collect();
        Ok(())
    }

    /// Fails if any queued input does not exist.
    pub fn validate(&self, context: &str) -> Result<()> {
        if self.pending.is_empty() {
            return Err(LdxError::config(format!("{context}: no input file provided")));
        }
        for path in &self.pending {
            if !path.is_file() {
                return Err(LdxError::config(format!(
                    "{context}: input file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Pops the next input and publishes it as the session's current input.
    pub fn advance(&mut self, session: &LdxSessionRef) -> Option<PathBuf> {
        let path = self.pending.pop_front()?;
        session.borrow_mut().current_input = Some(path.clone());
        Some(path)
    }

    pub fn has_finished(&self) -> bool {
        self.pending.is_empty()
    }
}
