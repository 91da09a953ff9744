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

//! # Ldx Writer Plugins
//!
//! The built-in format writers. The output option accepts either a file,
//! used as-is, or a directory, in which case the file name is derived from
//! the session's current input. Stream writers rotate their output when the
//! current input changes, mirroring the reader's file boundaries.

mod csv_writer;
mod jsonl;
mod txt;

pub use csv_writer::CsvClassificationWriter;
pub use jsonl::{JsonlPairWriter, JsonlTranslationWriter};
pub use txt::TxtPretrainWriter;

use std::io::Write;
use std::path::PathBuf;

use log::debug;

use crate::args::LdxArgParser;
use crate::errors::{LdxError, Result};
use crate::io::{create_output, generate_output};
use crate::session::LdxSessionRef;

/// Output plumbing shared by the stream writers.
///
/// Resolves the target path against the session's current input before each
/// write and reopens the file whenever that path changes.
pub(crate) struct OutputSink {
    target: PathBuf,
    ext: &'static str,
    current_path: Option<PathBuf>,
    current: Option<Box<dyn Write>>,
}

impl OutputSink {
    pub fn new(ext: &'static str) -> Self {
        OutputSink {
            target: PathBuf::new(),
            ext,
            current_path: None,
            current: None,
        }
    }

    /// Consumes the `-o/--output` option.
    pub fn parse(&mut self, context: &str, parser: &mut LdxArgParser) -> Result<()> {
        self.target = parser
            .value("-o", "--output")?
            .map(PathBuf::from)
            .ok_or_else(|| LdxError::config(format!("{context}: no output provided")))?;
        Ok(())
    }

    /// Returns the open output stream, rotating it if the resolved path changed.
    pub fn stream(&mut self, session: &LdxSessionRef) -> Result<&mut Box<dyn Write>> {
        let (input, compression) = {
            let session = session.borrow();
            (
                session
                    .current_input
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("output")),
                session.options.compression,
            )
        };
        let path = generate_output(&input, &self.target, self.ext, compression);
        if self.current_path.as_deref() != Some(path.as_path()) {
            debug!("writing to {}", path.display());
            self.current = Some(create_output(&path, compression)?);
            self.current_path = Some(path);
        }
        self.current
            .as_mut()
            .ok_or_else(|| LdxError::internal("output stream not open"))
    }

    /// Resolves the batch output path without keeping a stream open.
    pub fn resolve(&self, session: &LdxSessionRef) -> PathBuf {
        let session = session.borrow();
        let input = session
            .current_input
            .clone()
            .unwrap_or_else(|| PathBuf::from("output"));
        generate_output(&input, &self.target, self.ext, session.options.compression)
    }

    /// Flushes and closes the current stream.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.current.take() {
            stream.flush()?;
        }
        self.current_path = None;
        Ok(())
    }
}
