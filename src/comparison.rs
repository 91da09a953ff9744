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

//! # Ldx Comparison Module
//!
//! The metadata-comparison predicate shared by the `metadata` filter and the
//! gating of the `tee`/`sub-process` sub-flows.
//!
//! For `contains`/`matches` the metadata value is coerced to a string
//! (substring test / regex search). For the ordering and equality operators
//! the right-hand literal is coerced to the metadata value's runtime type:
//! float, integer, or boolean (case-insensitive `"true"`); any other value
//! falls back to plain string comparison.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde_json::Value;

use crate::errors::{LdxError, Result};

/// Comparison operators for metadata predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LdxComparison {
    LessThan,
    LessOrEqual,
    Equal,
    NotEqual,
    GreaterOrEqual,
    GreaterThan,
    Contains,
    Matches,
}

impl LdxComparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            LdxComparison::LessThan => "lt",
            LdxComparison::LessOrEqual => "le",
            LdxComparison::Equal => "eq",
            LdxComparison::NotEqual => "ne",
            LdxComparison::GreaterOrEqual => "ge",
            LdxComparison::GreaterThan => "gt",
            LdxComparison::Contains => "contains",
            LdxComparison::Matches => "matches",
        }
    }

    fn from_ordering(&self, ordering: Ordering) -> bool {
        match self {
            LdxComparison::LessThan => ordering == Ordering::Less,
            LdxComparison::LessOrEqual => ordering != Ordering::Greater,
            LdxComparison::Equal => ordering == Ordering::Equal,
            LdxComparison::NotEqual => ordering != Ordering::Equal,
            LdxComparison::GreaterOrEqual => ordering != Ordering::Less,
            LdxComparison::GreaterThan => ordering == Ordering::Greater,
            LdxComparison::Contains | LdxComparison::Matches => false,
        }
    }
}

impl fmt::Display for LdxComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LdxComparison {
    type Err = LdxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lt" => Ok(LdxComparison::LessThan),
            "le" => Ok(LdxComparison::LessOrEqual),
            "eq" => Ok(LdxComparison::Equal),
            "ne" => Ok(LdxComparison::NotEqual),
            "ge" => Ok(LdxComparison::GreaterOrEqual),
            "gt" => Ok(LdxComparison::GreaterThan),
            "contains" => Ok(LdxComparison::Contains),
            "matches" => Ok(LdxComparison::Matches),
            other => Err(LdxError::config(format!(
                "unhandled comparison: {other} (supported: lt le eq ne ge gt contains matches)"
            ))),
        }
    }
}

/// Renders a metadata value as plain text, without JSON string quoting.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Compares a metadata value against a literal using the given operator.
pub fn compare_values(actual: &Value, comparison: LdxComparison, literal: &str) -> Result<bool> {
    match comparison {
        LdxComparison::Contains => Ok(value_to_string(actual).contains(literal)),
        LdxComparison::Matches => {
            let pattern = Regex::new(literal)?;
            Ok(pattern.is_match(&value_to_string(actual)))
        }
        _ => {
            let ordering = match actual {
                Value::Number(n) => {
                    if let Some(left) = n.as_i64() {
                        let right: i64 = literal.parse().map_err(|_| {
                            LdxError::config(format!(
                                "cannot coerce '{literal}' to an integer for {comparison}"
                            ))
                        })?;
                        left.cmp(&right)
                    } else {
                        let left = n.as_f64().unwrap_or(f64::NAN);
                        let right: f64 = literal.parse().map_err(|_| {
                            LdxError::config(format!(
                                "cannot coerce '{literal}' to a float for {comparison}"
                            ))
                        })?;
                        match left.partial_cmp(&right) {
                            Some(ordering) => ordering,
                            None => return Ok(comparison == LdxComparison::NotEqual),
                        }
                    }
                }
                Value::Bool(left) => {
                    let right = literal.eq_ignore_ascii_case("true");
                    left.cmp(&right)
                }
                other => value_to_string(other).cmp(&literal.to_string()),
            };
            Ok(comparison.from_ordering(ordering))
        }
    }
}
