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

use std::fs;

use ldx::filter::{SubProcessFilter, TeeFilter};
use ldx::plugin::{LdxFilter, LdxPlugin};
use ldx::record::{LdxRecord, PairData, PretrainData};
use ldx::registry::resolve_subflow;
use ldx::session::{LdxOptions, LdxSession, LdxSessionRef};
use serde_json::json;

fn tokens(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn session() -> LdxSessionRef {
    LdxSession::new(LdxOptions::default()).into_shared()
}

fn pair(output: &str) -> LdxRecord {
    LdxRecord::from(PairData::new(None, None, Some(output.to_string())))
}

#[test]
fn subflow_accepts_filters_and_trailing_writer() {
    let subflow = resolve_subflow("max-records -m 5 to-jsonl-pr -o out.jsonl", true).unwrap();
    assert_eq!(subflow.filters.len(), 1);
    assert!(subflow.writer.is_some());
}

#[test]
fn subflow_rejects_writer_when_not_allowed() {
    let err = resolve_subflow("to-jsonl-pr -o out.jsonl", false).err().unwrap();
    assert!(err.to_string().contains("not allowed"));
}

#[test]
fn subflow_rejects_readers() {
    let err = resolve_subflow("from-jsonl-pr -i in.jsonl", true).err().unwrap();
    assert!(err.to_string().contains("not allowed"));
}

#[test]
fn subflow_rejects_leading_tokens() {
    let err = resolve_subflow("-v max-records -m 5", true).err().unwrap();
    assert!(err.to_string().contains("before the first plugin"));
}

#[test]
fn subflow_rejects_unknown_plugins() {
    let err = resolve_subflow("no-such-filter -x 1", true).err().unwrap();
    assert!(err.to_string().contains("unknown plugin"));
}

#[test]
fn subflow_tokens_do_not_leak_into_outer_parsing() {
    // the quoted sub-flow stays one token for the outer tee options
    let mut tee = TeeFilter::default();
    tee.parse_args(&tokens(&["-f", "max-records -m 1"])).unwrap();
}

#[test]
fn tee_writes_copies_without_affecting_downstream() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("teed.jsonl");

    let mut tee = TeeFilter::default();
    tee.parse_args(&tokens(&[
        "-f",
        &format!("max-records -m 1 to-jsonl-pr -o {}", out.display()),
    ]))
    .unwrap();
    tee.initialize(&session()).unwrap();

    // downstream always sees the original record, also when the sub-flow drops it
    for i in 0..3 {
        let record = pair(&format!("answer {i}"));
        let passed = tee.process_record(record.clone()).unwrap();
        assert_eq!(passed, vec![record]);
    }
    tee.finalize().unwrap();

    let written = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines, vec![r#"{"output":"answer 0"}"#]);
}

#[test]
fn tee_gate_skips_records_without_the_field() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("teed.jsonl");

    let mut tee = TeeFilter::default();
    tee.parse_args(&tokens(&[
        "-f",
        &format!("to-jsonl-pr -o {}", out.display()),
        "--field",
        "lang",
        "--value",
        "en",
    ]))
    .unwrap();
    tee.initialize(&session()).unwrap();

    let mut gated_in = pair("english");
    gated_in.metadata_mut().insert("lang".into(), json!("en"));
    let mut gated_out = pair("french");
    gated_out.metadata_mut().insert("lang".into(), json!("fr"));
    let no_field = pair("unknown");

    for record in [gated_in, gated_out, no_field] {
        let passed = tee.process_record(record.clone()).unwrap();
        assert_eq!(passed, vec![record]);
    }
    tee.finalize().unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 1);
    assert!(written.contains("english"));
}

#[test]
fn tee_requires_a_value_with_the_field() {
    let mut tee = TeeFilter::default();
    tee.parse_args(&tokens(&["--field", "lang"])).unwrap();
    assert!(tee.initialize(&session()).is_err());
}

#[test]
fn sub_process_output_replaces_the_record() {
    let mut sub = SubProcessFilter::default();
    sub.parse_args(&tokens(&["-f", "pairs-to-pretrain -f output"]))
        .unwrap();
    sub.initialize(&session()).unwrap();

    let out = sub.process_record(pair("the content")).unwrap();
    assert_eq!(
        out,
        vec![LdxRecord::from(PretrainData::new(Some("the content".into())))]
    );
}

#[test]
fn sub_process_gate_bypasses_unmatched_records() {
    let mut sub = SubProcessFilter::default();
    sub.parse_args(&tokens(&[
        "-f",
        "metadata -f missing -v whatever",
        "--field",
        "keep",
        "--value",
        "no",
    ]))
    .unwrap();
    sub.initialize(&session()).unwrap();

    // closed gate: record bypasses the dropping sub-flow unchanged
    let record = pair("survives");
    let passed = sub.process_record(record.clone()).unwrap();
    assert_eq!(passed, vec![record]);
}
