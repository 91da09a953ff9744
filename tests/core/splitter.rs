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

use ldx::splitter::LdxSplitter;
use proptest::prelude::*;

fn splitter(ratios: &[u32], names: &[&str]) -> LdxSplitter {
    LdxSplitter::new(
        ratios.to_vec(),
        names.iter().map(|n| n.to_string()).collect(),
    )
    .unwrap()
}

#[test]
fn ratios_must_sum_to_one_hundred() {
    let result = LdxSplitter::new(vec![50, 40], vec!["a".into(), "b".into()]);
    assert!(result.is_err());
}

#[test]
fn ratios_and_names_must_align() {
    let result = LdxSplitter::new(vec![50, 50], vec!["only".into()]);
    assert!(result.is_err());
}

#[test]
fn zero_ratio_is_rejected() {
    let result = LdxSplitter::new(vec![100, 0], vec!["a".into(), "b".into()]);
    assert!(result.is_err());
}

#[test]
fn gcd_reduces_the_cycle() {
    let s = splitter(&[80, 10, 10], &["train", "val", "test"]);
    assert_eq!(s.cycle_length(), 10);
    let s = splitter(&[50, 50], &["a", "b"]);
    assert_eq!(s.cycle_length(), 2);
    let s = splitter(&[99, 1], &["a", "b"]);
    assert_eq!(s.cycle_length(), 100);
}

#[test]
fn one_cycle_reproduces_the_ratios() {
    let mut s = splitter(&[80, 10, 10], &["train", "val", "test"]);
    let window: Vec<String> = (0..10).map(|_| s.next()).collect();
    assert_eq!(
        window,
        vec![
            "train", "train", "train", "train", "train", "train", "train", "train", "val", "test"
        ]
    );
}

#[test]
fn thousand_records_split_exactly() {
    let mut s = splitter(&[80, 10, 10], &["train", "val", "test"]);
    for _ in 0..1000 {
        s.next();
    }
    assert_eq!(s.stats().get("train"), Some(&800));
    assert_eq!(s.stats().get("val"), Some(&100));
    assert_eq!(s.stats().get("test"), Some(&100));
}

#[test]
fn reset_restarts_the_schedule() {
    let mut s = splitter(&[50, 50], &["a", "b"]);
    assert_eq!(s.next(), "a");
    s.reset();
    assert_eq!(s.counter(), 0);
    assert!(s.stats().is_empty());
    assert_eq!(s.next(), "a");
}

#[test]
fn duplicate_names_merge_statistics() {
    let mut s = splitter(&[50, 50], &["same", "same"]);
    for _ in 0..10 {
        s.next();
    }
    assert_eq!(s.stats().get("same"), Some(&10));
}

proptest! {
    #[test]
    fn any_valid_ratios_are_exact_over_cycles(a in 1u32..99, b in 1u32..99) {
        prop_assume!(a + b < 100);
        let c = 100 - a - b;
        let mut s = splitter(&[a, b, c], &["x", "y", "z"]);
        let cycles = 3usize;
        let total = s.cycle_length() as usize * cycles;
        for _ in 0..total {
            s.next();
        }
        let scale = 100 / s.cycle_length();
        prop_assert_eq!(*s.stats().get("x").unwrap(), (a / scale) as usize * cycles);
        prop_assert_eq!(*s.stats().get("y").unwrap(), (b / scale) as usize * cycles);
        prop_assert_eq!(*s.stats().get("z").unwrap(), (c / scale) as usize * cycles);
    }
}
