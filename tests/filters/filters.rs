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

use ldx::errors::Result;
use ldx::filter::{
    LdxMultiFilter, MaxRecordsFilter, MetadataFilter, RandomizeRecordsFilter, SplitFilter,
};
use ldx::plugin::{LdxDomain, LdxFilter, LdxPlugin};
use ldx::record::{LdxDataKind, LdxRecord, LdxRecordBatch, PretrainData};
use ldx::session::{LdxOptions, LdxSession, LdxSessionRef};
use serde_json::{json, Value};

fn tokens(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn session() -> LdxSessionRef {
    LdxSession::new(LdxOptions::default()).into_shared()
}

fn pretrain(text: &str) -> LdxRecord {
    LdxRecord::from(PretrainData::new(Some(text.to_string())))
}

/// Test-only filter that duplicates every record.
struct DuplicateFilter;

impl LdxPlugin for DuplicateFilter {
    fn name(&self) -> &'static str {
        "duplicate"
    }

    fn description(&self) -> &'static str {
        "Duplicates every record."
    }

    fn domains(&self) -> Vec<LdxDomain> {
        vec![LdxDomain::Any]
    }

    fn initialize(&mut self, _session: &LdxSessionRef) -> Result<()> {
        Ok(())
    }
}

impl LdxFilter for DuplicateFilter {
    fn accepts(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn generates(&self) -> Vec<LdxDataKind> {
        LdxDataKind::ALL.to_vec()
    }

    fn process_record(&mut self, record: LdxRecord) -> Result<LdxRecordBatch> {
        Ok(vec![record.clone(), record])
    }
}

#[test]
fn filter_chain_expands_records() {
    let mut chain = LdxMultiFilter::new(vec![
        Box::new(DuplicateFilter),
        Box::new(DuplicateFilter),
    ]);
    chain.initialize(&session()).unwrap();
    let out = chain.process_record(pretrain("x")).unwrap();
    assert_eq!(out.len(), 4);
}

#[test]
fn filter_chain_short_circuits_after_total_drop() {
    let mut limiter = MaxRecordsFilter::default();
    limiter.parse_args(&tokens(&["-m", "1"])).unwrap();
    let mut chain = LdxMultiFilter::new(vec![Box::new(limiter), Box::new(DuplicateFilter)]);
    chain.initialize(&session()).unwrap();

    assert_eq!(chain.process_record(pretrain("a")).unwrap().len(), 2);
    // the limiter dropped the record, so the duplicator never saw it
    assert!(chain.process_record(pretrain("b")).unwrap().is_empty());
}

#[test]
fn metadata_filter_keeps_matching_records() {
    let mut filter = MetadataFilter::default();
    filter
        .parse_args(&tokens(&["-f", "lang", "-a", "keep", "-c", "eq", "-v", "en"]))
        .unwrap();
    filter.initialize(&session()).unwrap();

    let mut matching = pretrain("hello");
    matching.metadata_mut().insert("lang".into(), json!("en"));
    assert_eq!(filter.process_record(matching).unwrap().len(), 1);

    let mut other = pretrain("bonjour");
    other.metadata_mut().insert("lang".into(), json!("fr"));
    assert!(filter.process_record(other).unwrap().is_empty());
}

#[test]
fn metadata_filter_discard_inverts_the_predicate() {
    let mut filter = MetadataFilter::default();
    filter
        .parse_args(&tokens(&["-f", "score", "-a", "discard", "-c", "lt", "-v", "0.5"]))
        .unwrap();
    filter.initialize(&session()).unwrap();

    let mut low = pretrain("low");
    low.metadata_mut().insert("score".into(), json!(0.2));
    assert!(filter.process_record(low).unwrap().is_empty());

    let mut high = pretrain("high");
    high.metadata_mut().insert("score".into(), json!(0.9));
    assert_eq!(filter.process_record(high).unwrap().len(), 1);
}

#[test]
fn randomize_requires_batch_and_keeps_count() {
    let mut filter = RandomizeRecordsFilter::default();
    filter.parse_args(&tokens(&["-s", "13"])).unwrap();
    filter.initialize(&session()).unwrap();
    assert!(filter.requires_batch());

    let batch: LdxRecordBatch = (0..30).map(|i| pretrain(&format!("r{i}"))).collect();
    let shuffled = filter.process_batch(batch.clone()).unwrap();
    assert_eq!(shuffled.len(), batch.len());
    assert_ne!(shuffled, batch);
}

#[test]
fn chain_with_randomizer_reports_batch_requirement() {
    let chain = LdxMultiFilter::new(vec![
        Box::new(DuplicateFilter),
        Box::new(RandomizeRecordsFilter::default()),
    ]);
    assert!(chain.requires_batch());
}

#[test]
fn split_filter_assigns_proportionally() {
    let session = session();
    let mut filter = SplitFilter::default();
    filter
        .parse_args(&tokens(&["-r", "80", "10", "10", "-n", "train", "val", "test"]))
        .unwrap();
    filter.initialize(&session).unwrap();
    session.borrow_mut().current_input = Some("data.jsonl".into());

    let mut counts = std::collections::HashMap::new();
    for i in 0..1000 {
        let out = filter.process_record(pretrain(&format!("r{i}"))).unwrap();
        let name = match out[0].metadata().unwrap().get("split") {
            Some(Value::String(name)) => name.clone(),
            other => panic!("unexpected split value: {other:?}"),
        };
        *counts.entry(name).or_insert(0usize) += 1;
    }
    assert_eq!(counts.get("train"), Some(&800));
    assert_eq!(counts.get("val"), Some(&100));
    assert_eq!(counts.get("test"), Some(&100));
}

#[test]
fn split_filter_requires_valid_ratios() {
    let mut filter = SplitFilter::default();
    filter
        .parse_args(&tokens(&["-r", "60", "20", "-n", "a", "b"]))
        .unwrap();
    assert!(filter.initialize(&session()).is_err());
}
