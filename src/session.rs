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

//! # Ldx Session Module
//!
//! Shared per-run state threaded through every reader, filter and writer.
//! A session is created once per pipeline run, injected into every stage
//! before `initialize()` and never replaced mid-run.
//!
//! Execution is single-threaded and fully synchronous; the session is shared
//! via `Rc<RefCell<_>>`, with exactly one writer per mutable field (the
//! execution engine advances `count`, the active reader updates
//! `current_input`).

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::io::LdxCompression;

/// Default number of records between progress log messages.
pub const DEFAULT_UPDATE_INTERVAL: usize = 1000;

/// Global pipeline options supplied on the command line.
#[derive(Clone, Debug)]
pub struct LdxOptions {
    /// Output compression applied by writers, None for plain files.
    pub compression: Option<LdxCompression>,
    /// Drain the reader fully before filtering and writing.
    pub force_batch: bool,
    /// Number of records between progress log messages.
    pub update_interval: usize,
}

impl Default for LdxOptions {
    fn default() -> Self {
        LdxOptions {
            compression: None,
            force_batch: false,
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }
}

/// Session object shared among reader, filter(s) and writer.
#[derive(Debug, Default)]
pub struct LdxSession {
    /// Path of the file currently being read, set by the active reader.
    pub current_input: Option<PathBuf>,
    /// Global options for this run.
    pub options: LdxOptions,
    /// Monotonically increasing count of records pulled from the reader.
    pub count: usize,
}

impl LdxSession {
    pub fn new(options: LdxOptions) -> Self {
        LdxSession {
            current_input: None,
            options,
            count: 0,
        }
    }

    /// Wraps the session for sharing across pipeline stages.
    pub fn into_shared(self) -> LdxSessionRef {
        Rc::new(RefCell::new(self))
    }
}

/// Shared handle to the per-run session.
pub type LdxSessionRef = Rc<RefCell<LdxSession>>;
