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

//! # Ldx IO Module
//!
//! File helpers shared by the format adapters: compression-aware open/create
//! and output-path generation. Inputs ending in `.gz` are decompressed
//! transparently; outputs are compressed when the session requests it.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression as GzLevel;

use crate::errors::{LdxError, Result};

/// Output compression supported by the writers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LdxCompression {
    Gzip,
}

impl LdxCompression {
    /// File suffix, without the leading dot.
    pub fn suffix(&self) -> &'static str {
        match self {
            LdxCompression::Gzip => "gz",
        }
    }
}

impl fmt::Display for LdxCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for LdxCompression {
    type Err = LdxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gz" | "gzip" => Ok(LdxCompression::Gzip),
            other => Err(LdxError::config(format!(
                "unhandled compression: {other} (supported: gz)"
            ))),
        }
    }
}

/// Returns whether the file name carries a compression suffix we handle.
pub fn is_compressed(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("gz")
    )
}

/// Removes the compression suffix from the file, if present.
pub fn remove_compression_suffix(path: &Path) -> PathBuf {
    if is_compressed(path) {
        path.with_extension("")
    } else {
        path.to_path_buf()
    }
}

/// Opens the file for reading, decompressing `.gz` transparently.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .map_err(|err| LdxError::Io(format!("failed to open {}: {err}", path.display())))?;
    if is_compressed(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Creates the file for writing, compressing according to `compression`.
pub fn create_output(path: &Path, compression: Option<LdxCompression>) -> Result<Box<dyn Write>> {
    let file = File::create(path)
        .map_err(|err| LdxError::Io(format!("failed to create {}: {err}", path.display())))?;
    match compression {
        Some(LdxCompression::Gzip) => Ok(Box::new(BufWriter::new(GzEncoder::new(
            file,
            GzLevel::default(),
        )))),
        None => Ok(Box::new(BufWriter::new(file))),
    }
}

/// Generates an output filename from the current input and the output target.
///
/// If the target is not a directory, it is returned as-is. If it is a
/// directory, the filename is derived from the input's base name with the
/// new extension and optional compression suffix appended.
pub fn generate_output(
    input: &Path,
    target: &Path,
    ext: &str,
    compression: Option<LdxCompression>,
) -> PathBuf {
    if !target.is_dir() {
        return target.to_path_buf();
    }
    let stripped = remove_compression_suffix(input);
    let stem = stripped
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let mut name = format!("{stem}{ext}");
    if let Some(compression) = compression {
        name.push('.');
        name.push_str(compression.suffix());
    }
    target.join(name)
}
