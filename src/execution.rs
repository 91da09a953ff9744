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

//! # Ldx Execution Module
//!
//! The single-pass driver that pulls records from the reader, pushes them
//! through the filter chain and hands survivors to the writer.
//!
//! ## Streaming vs batch
//!
//! With the session's `force_batch` option set the reader is drained
//! completely across all its inputs, the filter chain runs once over the
//! full collection, and the writer receives it in a single call. Without
//! it the engine still runs a segment (one reader `read()` call) in batch
//! mode when the writer's contract is `Batch` or a filter in the chain
//! reports `requires_batch()`; otherwise records stream through one at a
//! time. Either way every stage is finalized after the loop, also when a
//! record-level error aborted it.

use log::{error, info};

use crate::errors::Result;
use crate::filter::LdxMultiFilter;
use crate::plugin::{LdxFilter, LdxPlugin, LdxReader, LdxWriter, LdxWriterMode};
use crate::record::LdxRecord;
use crate::session::LdxSessionRef;

/// A fully assembled pipeline: reader, filter chain, optional writer.
pub struct LdxPipeline {
    pub reader: Box<dyn LdxReader>,
    pub filter: LdxMultiFilter,
    pub writer: Option<Box<dyn LdxWriter>>,
}

fn tick(session: &LdxSessionRef) {
    let (count, interval) = {
        let mut session = session.borrow_mut();
        session.count += 1;
        (session.count, session.options.update_interval)
    };
    if interval > 0 && count % interval == 0 {
        info!("{count} records processed...");
    }
}

fn write_out(pipeline: &mut LdxPipeline, processed: &[LdxRecord]) -> Result<()> {
    match pipeline.writer.as_mut() {
        Some(writer) if writer.mode() == LdxWriterMode::Batch => writer.write_batch(processed),
        Some(writer) => {
            for record in processed {
                writer.write_stream(record)?;
            }
            Ok(())
        }
        None => Ok(()),
    }
}

fn run(pipeline: &mut LdxPipeline, session: &LdxSessionRef) -> Result<()> {
    let force_batch = session.borrow().options.force_batch;

    if force_batch {
        // drain every input first, then filter and write the whole set once
        let mut collected = Vec::new();
        while !pipeline.reader.has_finished() {
            let segment = pipeline.reader.read()?;
            for _ in &segment {
                tick(session);
            }
            collected.extend(segment);
        }
        let processed = pipeline.filter.process_batch(collected)?;
        return write_out(pipeline, &processed);
    }

    let batch_mode = pipeline.filter.requires_batch()
        || matches!(
            pipeline.writer.as_ref().map(|w| w.mode()),
            Some(LdxWriterMode::Batch)
        );

    while !pipeline.reader.has_finished() {
        let segment = pipeline.reader.read()?;

        if batch_mode {
            for _ in &segment {
                tick(session);
            }
            let processed = pipeline.filter.process_batch(segment)?;
            write_out(pipeline, &processed)?;
        } else {
            for record in segment {
                tick(session);
                let processed = pipeline.filter.process_record(record)?;
                if let Some(writer) = pipeline.writer.as_mut() {
                    for record in &processed {
                        writer.write_stream(record)?;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Drives the pipeline to completion.
///
/// Initialization failures abort before any record is read. Failures during
/// the record loop are returned, but only after the reader, every filter and
/// the writer have been finalized.
pub fn execute(mut pipeline: LdxPipeline, session: &LdxSessionRef) -> Result<()> {
    pipeline.reader.initialize(session)?;
    pipeline.filter.initialize(session)?;
    if let Some(writer) = pipeline.writer.as_mut() {
        writer.initialize(session)?;
    }

    let outcome = run(&mut pipeline, session);
    if let Err(err) = &outcome {
        error!("pipeline aborted: {err}");
    }

    let mut finalize_outcome = Ok(());
    if let Err(err) = pipeline.reader.finalize() {
        error!("finalizing reader failed: {err}");
        finalize_outcome = Err(err);
    }
    if let Err(err) = pipeline.filter.finalize() {
        error!("finalizing filter(s) failed: {err}");
        finalize_outcome = Err(err);
    }
    if let Some(writer) = pipeline.writer.as_mut() {
        if let Err(err) = writer.finalize() {
            error!("finalizing writer failed: {err}");
            finalize_outcome = Err(err);
        }
    }

    info!("{} records processed in total.", session.borrow().count);
    outcome.and(finalize_outcome)
}
