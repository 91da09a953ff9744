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

use ldx::compat::{check_compatibility, LdxStageInfo};
use ldx::errors::LdxError;
use ldx::plugin::LdxDomain;
use ldx::record::LdxDataKind;
use ldx::registry::LdxRegistry;

fn tokens(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn assembled_pipeline_passes_preflight() {
    let registry = LdxRegistry::with_defaults();
    let result = registry.assemble(&tokens(&[
        "from-jsonl-pr",
        "-i",
        "in.jsonl",
        "split",
        "-r",
        "80",
        "20",
        "-n",
        "train",
        "test",
        "to-jsonl-pr",
        "-o",
        "out/",
    ]));
    assert!(result.is_ok());
}

#[test]
fn incompatible_writer_fails_before_execution() {
    let registry = LdxRegistry::with_defaults();
    let err = registry
        .assemble(&tokens(&[
            "from-jsonl-pr",
            "-i",
            "in.jsonl",
            "to-txt-pt",
            "-o",
            "out/",
        ]))
        .err()
        .unwrap();
    assert!(matches!(err, LdxError::Compatibility { .. }));
}

#[test]
fn conversion_filter_bridges_domains() {
    let registry = LdxRegistry::with_defaults();
    let result = registry.assemble(&tokens(&[
        "from-jsonl-pr",
        "-i",
        "in.jsonl",
        "pairs-to-pretrain",
        "-f",
        "instruction",
        "output",
        "to-txt-pt",
        "-o",
        "out/",
    ]));
    assert!(result.is_ok());
}

#[test]
fn second_reader_is_rejected() {
    let registry = LdxRegistry::with_defaults();
    let err = registry
        .assemble(&tokens(&[
            "from-jsonl-pr",
            "-i",
            "a.jsonl",
            "from-txt-pt",
            "-i",
            "b.txt",
        ]))
        .err()
        .unwrap();
    assert!(err.to_string().contains("only one reader"));
}

#[test]
fn plugin_after_writer_is_rejected() {
    let registry = LdxRegistry::with_defaults();
    let err = registry
        .assemble(&tokens(&[
            "from-jsonl-pr",
            "-i",
            "a.jsonl",
            "to-jsonl-pr",
            "-o",
            "out/",
            "max-records",
            "-m",
            "5",
        ]))
        .err()
        .unwrap();
    assert!(err.to_string().contains("after the writer"));
}

#[test]
fn missing_reader_is_rejected() {
    let registry = LdxRegistry::with_defaults();
    let err = registry
        .assemble(&tokens(&["to-jsonl-pr", "-o", "out/"]))
        .err()
        .unwrap();
    assert!(err.is_preflight());
}

#[test]
fn any_domain_bridges_neighbors() {
    let stages = vec![
        LdxStageInfo {
            name: "reader".into(),
            domains: vec![LdxDomain::Pairs],
            generates: vec![LdxDataKind::Pair],
            accepts: vec![],
        },
        LdxStageInfo {
            name: "passthrough".into(),
            domains: vec![LdxDomain::Any],
            generates: LdxDataKind::ALL.to_vec(),
            accepts: LdxDataKind::ALL.to_vec(),
        },
        LdxStageInfo {
            name: "writer".into(),
            domains: vec![LdxDomain::Pairs],
            generates: vec![],
            accepts: vec![LdxDataKind::Pair],
        },
    ];
    assert!(check_compatibility(&stages).is_ok());
}

#[test]
fn empty_domain_list_is_rejected() {
    let stages = vec![LdxStageInfo {
        name: "broken".into(),
        domains: vec![],
        generates: vec![LdxDataKind::Pair],
        accepts: vec![],
    }];
    assert!(check_compatibility(&stages).is_err());
}
