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

//! # Ldx Registry Module
//!
//! Maps plugin names to factory functions and assembles pipelines from
//! token streams. Assembly enforces the pipeline shape (one reader, any
//! number of filters, at most one writer, nothing after the writer) and
//! runs the compatibility check before anything is initialized.

use std::collections::BTreeMap;

use crate::args::{split_args, split_cmdline};
use crate::compat::{check_compatibility, LdxStageInfo};
use crate::errors::{LdxError, Result};
use crate::execution::LdxPipeline;
use crate::filter::{
    LdxMultiFilter, MaxRecordsFilter, MetadataFilter, PairsToPretrainFilter,
    RandomizeRecordsFilter, RemoveEmptyFilter, SplitFilter, SubProcessFilter, TeeFilter,
};
use crate::plugin::{LdxFilter, LdxReader, LdxWriter};
use crate::reader::{
    CsvClassificationReader, JsonlPairReader, JsonlTranslationReader, TxtPretrainReader,
};
use crate::writer::{
    CsvClassificationWriter, JsonlPairWriter, JsonlTranslationWriter, TxtPretrainWriter,
};

type ReaderFactory = fn() -> Box<dyn LdxReader>;
type FilterFactory = fn() -> Box<dyn LdxFilter>;
type WriterFactory = fn() -> Box<dyn LdxWriter>;

/// Role a plugin name resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LdxPluginKind {
    Reader,
    Filter,
    Writer,
}

/// Filters and optional trailing writer parsed from a sub-flow command line.
pub struct LdxSubFlow {
    pub filters: Vec<Box<dyn LdxFilter>>,
    pub writer: Option<Box<dyn LdxWriter>>,
}

/// Name-to-factory maps for all known plugins.
#[derive(Default)]
pub struct LdxRegistry {
    readers: BTreeMap<&'static str, ReaderFactory>,
    filters: BTreeMap<&'static str, FilterFactory>,
    writers: BTreeMap<&'static str, WriterFactory>,
}

impl LdxRegistry {
    pub fn new() -> Self {
        LdxRegistry::default()
    }

    /// Registry with every built-in plugin.
    pub fn with_defaults() -> Self {
        let mut registry = LdxRegistry::new();

        registry.register_reader("from-jsonl-pr", || Box::<JsonlPairReader>::default());
        registry.register_reader("from-jsonl-t9n", || Box::<JsonlTranslationReader>::default());
        registry.register_reader("from-txt-pt", || Box::<TxtPretrainReader>::default());
        registry.register_reader("from-csv-cl", || Box::<CsvClassificationReader>::default());

        registry.register_filter("max-records", || Box::<MaxRecordsFilter>::default());
        registry.register_filter("metadata", || Box::<MetadataFilter>::default());
        registry.register_filter("pairs-to-pretrain", || Box::<PairsToPretrainFilter>::default());
        registry.register_filter("randomize-records", || Box::<RandomizeRecordsFilter>::default());
        registry.register_filter("remove-empty", || Box::<RemoveEmptyFilter>::default());
        registry.register_filter("split", || Box::<SplitFilter>::default());
        registry.register_filter("sub-process", || Box::<SubProcessFilter>::default());
        registry.register_filter("tee", || Box::<TeeFilter>::default());

        registry.register_writer("to-jsonl-pr", || Box::<JsonlPairWriter>::default());
        registry.register_writer("to-jsonl-t9n", || Box::<JsonlTranslationWriter>::default());
        registry.register_writer("to-txt-pt", || Box::<TxtPretrainWriter>::default());
        registry.register_writer("to-csv-cl", || Box::<CsvClassificationWriter>::default());

        registry
    }

    pub fn register_reader(&mut self, name: &'static str, factory: ReaderFactory) {
        self.readers.insert(name, factory);
    }

    pub fn register_filter(&mut self, name: &'static str, factory: FilterFactory) {
        self.filters.insert(name, factory);
    }

    pub fn register_writer(&mut self, name: &'static str, factory: WriterFactory) {
        self.writers.insert(name, factory);
    }

    pub fn kind_of(&self, name: &str) -> Option<LdxPluginKind> {
        if self.readers.contains_key(name) {
            Some(LdxPluginKind::Reader)
        } else if self.filters.contains_key(name) {
            Some(LdxPluginKind::Filter)
        } else if self.writers.contains_key(name) {
            Some(LdxPluginKind::Writer)
        } else {
            None
        }
    }

    /// All registered plugin names, readers then filters then writers.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        names.extend(self.readers.keys());
        names.extend(self.filters.keys());
        names.extend(self.writers.keys());
        names
    }

    /// Name/description pairs for help output, grouped by role.
    pub fn describe(&self) -> Vec<(LdxPluginKind, &'static str, &'static str)> {
        let mut entries = Vec::new();
        for (name, factory) in &self.readers {
            entries.push((LdxPluginKind::Reader, *name, factory().description()));
        }
        for (name, factory) in &self.filters {
            entries.push((LdxPluginKind::Filter, *name, factory().description()));
        }
        for (name, factory) in &self.writers {
            entries.push((LdxPluginKind::Writer, *name, factory().description()));
        }
        entries
    }

    /// Assembles a pipeline from the token stream, returning the tokens that
    /// preceded the first plugin name (the global options) and the pipeline.
    ///
    /// Each plugin's trailing tokens are handed to its `parse_args`; the
    /// compatibility of the resulting chain is verified before returning.
    pub fn assemble(&self, tokens: &[String]) -> Result<(Vec<String>, LdxPipeline)> {
        let names = self.names().into_iter().collect();
        let groups = split_args(tokens, &names);

        let mut global = Vec::new();
        let mut reader: Option<Box<dyn LdxReader>> = None;
        let mut filters: Vec<Box<dyn LdxFilter>> = Vec::new();
        let mut writer: Option<Box<dyn LdxWriter>> = None;

        for (name, args) in groups {
            if name.is_empty() {
                global = args;
                continue;
            }
            if writer.is_some() {
                return Err(LdxError::config(format!(
                    "no plugin allowed after the writer, found '{name}'"
                )));
            }
            match self.kind_of(&name) {
                Some(LdxPluginKind::Reader) => {
                    if reader.is_some() {
                        return Err(LdxError::config(format!(
                            "only one reader allowed, found second '{name}'"
                        )));
                    }
                    let mut plugin = self.readers[name.as_str()]();
                    plugin.parse_args(&args)?;
                    reader = Some(plugin);
                }
                Some(LdxPluginKind::Filter) => {
                    if reader.is_none() {
                        return Err(LdxError::config(format!(
                            "filter '{name}' found before the reader"
                        )));
                    }
                    let mut plugin = self.filters[name.as_str()]();
                    plugin.parse_args(&args)?;
                    filters.push(plugin);
                }
                Some(LdxPluginKind::Writer) => {
                    if reader.is_none() {
                        return Err(LdxError::config(format!(
                            "writer '{name}' found before the reader"
                        )));
                    }
                    let mut plugin = self.writers[name.as_str()]();
                    plugin.parse_args(&args)?;
                    writer = Some(plugin);
                }
                None => {
                    return Err(LdxError::config(format!("unknown plugin: {name}")));
                }
            }
        }

        let reader =
            reader.ok_or_else(|| LdxError::config("no reader defined on the command-line"))?;

        let mut stages = vec![LdxStageInfo::of_reader(reader.as_ref())];
        for filter in &filters {
            stages.push(LdxStageInfo::of_filter(filter.as_ref()));
        }
        if let Some(writer) = &writer {
            stages.push(LdxStageInfo::of_writer(writer.as_ref()));
        }
        check_compatibility(&stages)?;

        Ok((
            global,
            LdxPipeline {
                reader,
                filter: LdxMultiFilter::new(filters),
                writer,
            },
        ))
    }
}

/// Parses a sub-flow command line into filters and an optional writer.
///
/// The tokens are resolved against the default registry; global options are
/// not allowed, and with `allow_writer` set the writer must come last.
pub fn resolve_subflow(cmdline: &str, allow_writer: bool) -> Result<LdxSubFlow> {
    let registry = LdxRegistry::with_defaults();
    let tokens = split_cmdline(cmdline)?;
    let names = registry.names().into_iter().collect();
    let groups = split_args(&tokens, &names);

    let mut filters: Vec<Box<dyn LdxFilter>> = Vec::new();
    let mut writer: Option<Box<dyn LdxWriter>> = None;

    for (name, args) in groups {
        if name.is_empty() {
            return Err(LdxError::config(format!(
                "sub-flow has tokens before the first plugin: {}",
                args.join(" ")
            )));
        }
        if writer.is_some() {
            return Err(LdxError::config(format!(
                "sub-flow: no plugin allowed after the writer, found '{name}'"
            )));
        }
        match registry.kind_of(&name) {
            Some(LdxPluginKind::Filter) => {
                let mut plugin = registry.filters[name.as_str()]();
                plugin.parse_args(&args)?;
                filters.push(plugin);
            }
            Some(LdxPluginKind::Writer) if allow_writer => {
                let mut plugin = registry.writers[name.as_str()]();
                plugin.parse_args(&args)?;
                writer = Some(plugin);
            }
            Some(LdxPluginKind::Writer) => {
                return Err(LdxError::config(format!(
                    "sub-flow: writer '{name}' not allowed here"
                )));
            }
            Some(LdxPluginKind::Reader) => {
                return Err(LdxError::config(format!(
                    "sub-flow: reader '{name}' not allowed here"
                )));
            }
            None => {
                return Err(LdxError::config(format!("sub-flow: unknown plugin: {name}")));
            }
        }
    }

    Ok(LdxSubFlow { filters, writer })
}
