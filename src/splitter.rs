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

//! # Ldx Splitter Module
//!
//! Deterministic, ratio-preserving round-robin assignment of records to
//! named partitions. Ratios are integers summing to 100; the schedule is
//! reduced by their GCD so that every window of `cycle_length` consecutive
//! calls reproduces the ratios exactly.
//!
//! One implementation, two call sites: the `split` filter (which resets the
//! scheduler whenever the input source changes) and standalone use with a
//! caller-chosen metadata key (which never resets).

use std::collections::HashMap;

use serde_json::Value;

use crate::errors::{LdxError, Result};
use crate::record::LdxRecord;

/// Default metadata key for storing the assigned split name.
pub const DEFAULT_SPLIT_KEY: &str = "split";

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Ratio-preserving split scheduler.
#[derive(Clone, Debug)]
pub struct LdxSplitter {
    ratios: Vec<u32>,
    names: Vec<String>,
    /// Cumulative breakpoints, reduced by the ratios' GCD;
    /// `schedule[i] <= counter < schedule[i + 1]` selects `names[i]`.
    schedule: Vec<u32>,
    cycle_length: u32,
    counter: u32,
    stats: HashMap<String, usize>,
}

impl LdxSplitter {
    /// Builds a scheduler, validating ratios and names.
    pub fn new(ratios: Vec<u32>, names: Vec<String>) -> Result<Self> {
        if ratios.is_empty() {
            return Err(LdxError::config("no split ratios provided"));
        }
        if ratios.len() != names.len() {
            return Err(LdxError::config(format!(
                "split ratios and names differ in length: {} != {}",
                ratios.len(),
                names.len()
            )));
        }
        if ratios.iter().any(|r| *r == 0) {
            return Err(LdxError::config("split ratios must be positive"));
        }
        let sum: u32 = ratios.iter().sum();
        if sum != 100 {
            return Err(LdxError::config(format!(
                "split ratios must sum to 100, got {sum}"
            )));
        }

        let divisor = ratios.iter().copied().fold(0, gcd);
        let cycle_length = 100 / divisor;
        let mut schedule = Vec::with_capacity(ratios.len() + 1);
        schedule.push(0);
        let mut total = 0;
        for ratio in &ratios {
            total += ratio / divisor;
            schedule.push(total);
        }

        Ok(LdxSplitter {
            ratios,
            names,
            schedule,
            cycle_length,
            counter: 0,
            stats: HashMap::new(),
        })
    }

    /// Returns the next split name according to the schedule.
    ///
    /// Names are scanned in declaration order; duplicate names merge their
    /// statistics.
    pub fn next(&mut self) -> String {
        let mut name = self.names[self.names.len() - 1].clone();
        for i in 0..self.names.len() {
            if self.schedule[i] <= self.counter && self.counter < self.schedule[i + 1] {
                name = self.names[i].clone();
                break;
            }
        }
        *self.stats.entry(name.clone()).or_insert(0) += 1;
        self.counter = (self.counter + 1) % self.cycle_length;
        name
    }

    /// Assigns the next split name to the record under the given metadata key.
    pub fn assign(&mut self, record: &mut LdxRecord, key: &str) {
        let name = self.next();
        record
            .metadata_mut()
            .insert(key.to_string(), Value::String(name));
    }

    /// Resets the cyclic counter and the per-name statistics.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.stats.clear();
    }

    /// Current position in the cycle, in `[0, cycle_length)`.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Length of one full schedule cycle.
    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }

    /// Per-name assignment counts since the last reset.
    pub fn stats(&self) -> &HashMap<String, usize> {
        &self.stats
    }

    pub fn ratios(&self) -> &[u32] {
        &self.ratios
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
