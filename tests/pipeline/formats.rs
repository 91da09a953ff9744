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
use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use ldx::io::LdxCompression;
use ldx::plugin::{LdxPlugin, LdxReader, LdxWriter};
use ldx::reader::{CsvClassificationReader, JsonlPairReader, JsonlTranslationReader, TxtPretrainReader};
use ldx::record::{LdxLabel, LdxRecord};
use ldx::session::{LdxOptions, LdxSession, LdxSessionRef};
use ldx::writer::JsonlTranslationWriter;

fn tokens(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn session() -> LdxSessionRef {
    LdxSession::new(LdxOptions::default()).into_shared()
}

#[test]
fn jsonl_reader_skips_malformed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.jsonl");
    fs::write(
        &input,
        "{\"output\":\"good one\"}\nnot json at all\n\n{\"output\":\"good two\"}\n",
    )
    .unwrap();

    let mut reader = JsonlPairReader::default();
    reader
        .parse_args(&tokens(&["-i", input.to_str().unwrap()]))
        .unwrap();
    let session = session();
    reader.initialize(&session).unwrap();

    let records = reader.read().unwrap();
    assert_eq!(records.len(), 2);
    assert!(reader.has_finished());
    assert_eq!(
        session.borrow().current_input.as_deref(),
        Some(input.as_path())
    );
}

#[test]
fn gzip_input_is_decompressed_transparently() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt.gz");
    let mut encoder = GzEncoder::new(fs::File::create(&input).unwrap(), Compression::default());
    encoder.write_all(b"compressed pretrain text").unwrap();
    encoder.finish().unwrap();

    let mut reader = TxtPretrainReader::default();
    reader
        .parse_args(&tokens(&["-i", input.to_str().unwrap()]))
        .unwrap();
    reader.initialize(&session()).unwrap();

    let records = reader.read().unwrap();
    assert_eq!(records.len(), 1);
    match &records[0] {
        LdxRecord::Pretrain(data) => {
            assert_eq!(data.content.as_deref(), Some("compressed pretrain text"));
        }
        other => panic!("unexpected record: {other:?}"),
    }
}

#[test]
fn txt_reader_yields_one_record_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.txt");
    let second = dir.path().join("b.txt");
    fs::write(&first, "alpha").unwrap();
    fs::write(&second, "beta").unwrap();

    let mut reader = TxtPretrainReader::default();
    reader
        .parse_args(&tokens(&[
            "-i",
            first.to_str().unwrap(),
            second.to_str().unwrap(),
        ]))
        .unwrap();
    let session = session();
    reader.initialize(&session).unwrap();

    assert_eq!(reader.read().unwrap().len(), 1);
    assert!(!reader.has_finished());
    assert_eq!(reader.read().unwrap().len(), 1);
    assert!(reader.has_finished());
}

#[test]
fn csv_reader_parses_labels_by_type() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    fs::write(&input, "text,label\nfirst sample,3\nsecond sample,positive\n").unwrap();

    let mut reader = CsvClassificationReader::default();
    reader
        .parse_args(&tokens(&["-i", input.to_str().unwrap()]))
        .unwrap();
    reader.initialize(&session()).unwrap();

    let records = reader.read().unwrap();
    assert_eq!(records.len(), 2);
    match (&records[0], &records[1]) {
        (LdxRecord::Classification(a), LdxRecord::Classification(b)) => {
            assert_eq!(a.label, Some(LdxLabel::Index(3)));
            assert_eq!(b.label, Some(LdxLabel::Text("positive".into())));
        }
        other => panic!("unexpected records: {other:?}"),
    }
}

#[test]
fn csv_reader_honors_custom_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.csv");
    fs::write(&input, "sentence,category\nhello there,greeting\n").unwrap();

    let mut reader = CsvClassificationReader::default();
    reader
        .parse_args(&tokens(&[
            "-i",
            input.to_str().unwrap(),
            "-t",
            "sentence",
            "-l",
            "category",
        ]))
        .unwrap();
    reader.initialize(&session()).unwrap();

    let records = reader.read().unwrap();
    match &records[0] {
        LdxRecord::Classification(data) => {
            assert_eq!(data.text.as_deref(), Some("hello there"));
            assert_eq!(data.label, Some(LdxLabel::Text("greeting".into())));
        }
        other => panic!("unexpected record: {other:?}"),
    }
}

#[test]
fn translation_records_round_trip_through_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.jsonl");
    let output = dir.path().join("out.jsonl");
    fs::write(
        &input,
        "{\"translation\":{\"en\":\"Hello\",\"ro\":\"Salut\"}}\n",
    )
    .unwrap();

    let session = session();
    let mut reader = JsonlTranslationReader::default();
    reader
        .parse_args(&tokens(&["-i", input.to_str().unwrap()]))
        .unwrap();
    reader.initialize(&session).unwrap();
    let records = reader.read().unwrap();
    assert_eq!(records.len(), 1);

    let mut writer = JsonlTranslationWriter::default();
    writer
        .parse_args(&tokens(&["-o", output.to_str().unwrap()]))
        .unwrap();
    writer.initialize(&session).unwrap();
    for record in &records {
        writer.write_stream(record).unwrap();
    }
    writer.finalize().unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap().trim(),
        "{\"translation\":{\"en\":\"Hello\",\"ro\":\"Salut\"}}"
    );
}

#[test]
fn compressed_output_is_gzip_encoded() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.jsonl");
    let outdir = dir.path().join("out");
    fs::create_dir(&outdir).unwrap();
    fs::write(&input, "{\"output\":\"packed\"}\n").unwrap();

    let session = LdxSession::new(LdxOptions {
        compression: Some(LdxCompression::Gzip),
        ..LdxOptions::default()
    })
    .into_shared();

    let registry = ldx::registry::LdxRegistry::with_defaults();
    let (_global, pipeline) = registry
        .assemble(&tokens(&[
            "from-jsonl-pr",
            "-i",
            input.to_str().unwrap(),
            "to-jsonl-pr",
            "-o",
            outdir.to_str().unwrap(),
        ]))
        .unwrap();
    ldx::execution::execute(pipeline, &session).unwrap();

    let packed = outdir.join("in.jsonl.gz");
    assert!(packed.exists());
    let mut decoded = String::new();
    GzDecoder::new(fs::File::open(&packed).unwrap())
        .read_to_string(&mut decoded)
        .unwrap();
    assert_eq!(decoded.trim(), "{\"output\":\"packed\"}");
}
