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

use ldx::record::{
    ClassificationData, LdxDataKind, LdxLabel, LdxRecord, PairData, PretrainData, TranslationData,
};
use serde_json::json;
use std::collections::BTreeMap;

#[test]
fn record_kind_matches_variant() {
    assert_eq!(
        LdxRecord::from(PairData::default()).kind(),
        LdxDataKind::Pair
    );
    assert_eq!(
        LdxRecord::from(PretrainData::default()).kind(),
        LdxDataKind::Pretrain
    );
    assert_eq!(
        LdxRecord::from(ClassificationData::default()).kind(),
        LdxDataKind::Classification
    );
    assert_eq!(
        LdxRecord::from(TranslationData::default()).kind(),
        LdxDataKind::Translation
    );
}

#[test]
fn metadata_mut_creates_map_on_demand() {
    let mut record = LdxRecord::from(PretrainData::new(Some("text".into())));
    assert!(!record.has_metadata());
    record.metadata_mut().insert("split".into(), json!("train"));
    assert_eq!(record.metadata().unwrap().get("split"), Some(&json!("train")));
}

#[test]
fn pair_serialization_skips_absent_fields() {
    let record = PairData::new(Some("Summarize.".into()), None, Some("Done.".into()));
    let text = serde_json::to_string(&record).unwrap();
    assert_eq!(text, r#"{"instruction":"Summarize.","output":"Done."}"#);
}

#[test]
fn pair_deserialization_tolerates_missing_fields() {
    let pair: PairData = serde_json::from_str(r#"{"output":"Done."}"#).unwrap();
    assert_eq!(pair.output.as_deref(), Some("Done."));
    assert!(pair.instruction.is_none());
    assert!(pair.input.is_none());
}

#[test]
fn classification_label_is_untagged() {
    let numeric: ClassificationData =
        serde_json::from_str(r#"{"text":"ok","label":3}"#).unwrap();
    assert_eq!(numeric.label, Some(LdxLabel::Index(3)));

    let symbolic: ClassificationData =
        serde_json::from_str(r#"{"text":"ok","label":"positive"}"#).unwrap();
    assert_eq!(symbolic.label, Some(LdxLabel::Text("positive".into())));
}

#[test]
fn translation_languages_round_trip() {
    let mut translations = BTreeMap::new();
    translations.insert("en".to_string(), "Hello".to_string());
    translations.insert("ro".to_string(), "Salut".to_string());
    let record = TranslationData::new(translations.clone());

    let text = serde_json::to_string(&record).unwrap();
    let parsed: TranslationData = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.translations, translations);
}

#[test]
fn with_metadata_replaces_existing_map() {
    let mut meta = ldx::record::LdxMetadata::new();
    meta.insert("lang".into(), json!("en"));
    let record = LdxRecord::from(PretrainData::new(Some("text".into()))).with_metadata(meta);
    assert!(record.has_metadata());
    assert_eq!(record.metadata().unwrap().get("lang"), Some(&json!("en")));
}
