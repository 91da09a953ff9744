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

//! # Ldx Argument Module
//!
//! Command-line plumbing shared by top-level pipeline assembly and the
//! embedded sub-flows of `tee`/`sub-process`:
//!
//! - `split_cmdline` tokenizes a command-line string with shell-style
//!   quoting rules
//! - `split_args` groups a token stream into per-plugin argument lists
//! - `LdxArgParser` is the flat option parser every plugin uses in its
//!   `parse_args` implementation

use std::collections::HashSet;

use crate::errors::{LdxError, Result};

/// Tokenizes a command-line string using shell-style quoting rules.
///
/// Single quotes preserve everything verbatim; double quotes allow `\"`
/// and `\\` escapes; outside quotes a backslash escapes the next character.
pub fn split_cmdline(cmdline: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = cmdline.chars();

    while let Some(ch) = chars.next() {
        match quote {
            Some('\'') => {
                if ch == '\'' {
                    quote = None;
                } else {
                    current.push(ch);
                }
            }
            Some('"') => match ch {
                '"' => quote = None,
                '\\' => match chars.next() {
                    Some(escaped @ ('"' | '\\')) => current.push(escaped),
                    Some(other) => {
                        current.push('\\');
                        current.push(other);
                    }
                    None => {
                        return Err(LdxError::config("trailing backslash in command-line"));
                    }
                },
                _ => current.push(ch),
            },
            _ => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    in_token = true;
                }
                '\\' => match chars.next() {
                    Some(escaped) => {
                        current.push(escaped);
                        in_token = true;
                    }
                    None => {
                        return Err(LdxError::config("trailing backslash in command-line"));
                    }
                },
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                _ => {
                    current.push(ch);
                    in_token = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err(LdxError::config(format!(
            "unterminated quote in command-line: {cmdline}"
        )));
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Splits a token stream into plugin-name groups.
///
/// Every token matching one of `names` starts a new group; tokens before
/// the first plugin name form the global group with the empty name. Plugin
/// names may repeat; each occurrence yields its own group, in order.
pub fn split_args(tokens: &[String], names: &HashSet<&str>) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    let mut current_name = String::new();
    let mut current_args: Vec<String> = Vec::new();
    let mut seen_any = false;

    for token in tokens {
        if names.contains(token.as_str()) {
            if seen_any || !current_args.is_empty() {
                groups.push((current_name, current_args));
            }
            current_name = token.clone();
            current_args = Vec::new();
            seen_any = true;
        } else {
            current_args.push(token.clone());
        }
    }

    if seen_any || !current_args.is_empty() {
        groups.push((current_name, current_args));
    }

    groups
}

/// Flat option parser for plugin argument lists.
///
/// Plugins consume their recognized options and then call `finish()`,
/// which rejects anything left over.
pub struct LdxArgParser {
    context: String,
    tokens: Vec<Option<String>>,
}

impl LdxArgParser {
    pub fn new(context: impl Into<String>, args: &[String]) -> Self {
        LdxArgParser {
            context: context.into(),
            tokens: args.iter().cloned().map(Some).collect(),
        }
    }

    fn position(&self, short: &str, long: &str) -> Option<usize> {
        self.tokens
            .iter()
            .position(|t| matches!(t.as_deref(), Some(tok) if tok == short || tok == long))
    }

    /// Consumes a boolean flag, returning whether it was present.
    pub fn flag(&mut self, short: &str, long: &str) -> bool {
        match self.position(short, long) {
            Some(idx) => {
                self.tokens[idx] = None;
                true
            }
            None => false,
        }
    }

    /// Consumes an option with a single value.
    pub fn value(&mut self, short: &str, long: &str) -> Result<Option<String>> {
        let idx = match self.position(short, long) {
            Some(idx) => idx,
            None => return Ok(None),
        };
        self.tokens[idx] = None;
        match self.tokens.get_mut(idx + 1).and_then(Option::take) {
            Some(value) => Ok(Some(value)),
            None => Err(LdxError::config(format!(
                "{}: option {long} requires a value",
                self.context
            ))),
        }
    }

    /// Consumes an option with one or more values (until the next option token).
    pub fn values(&mut self, short: &str, long: &str) -> Result<Vec<String>> {
        let idx = match self.position(short, long) {
            Some(idx) => idx,
            None => return Ok(Vec::new()),
        };
        self.tokens[idx] = None;
        let mut values = Vec::new();
        let mut next = idx + 1;
        while next < self.tokens.len() {
            let is_value = matches!(self.tokens[next].as_deref(), Some(tok) if !tok.starts_with('-'));
            if !is_value {
                break;
            }
            if let Some(tok) = self.tokens[next].take() {
                values.push(tok);
            }
            next += 1;
        }
        if values.is_empty() {
            return Err(LdxError::config(format!(
                "{}: option {long} requires at least one value",
                self.context
            )));
        }
        Ok(values)
    }

    /// Like `value`, but parses the result.
    pub fn parsed_value<T>(&mut self, short: &str, long: &str) -> Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.value(short, long)? {
            Some(raw) => raw.parse::<T>().map(Some).map_err(|err| {
                LdxError::config(format!(
                    "{}: invalid value '{raw}' for {long}: {err}",
                    self.context
                ))
            }),
            None => Ok(None),
        }
    }

    /// Rejects unrecognized leftover tokens.
    pub fn finish(self) -> Result<()> {
        let leftover: Vec<&str> = self
            .tokens
            .iter()
            .filter_map(|t| t.as_deref())
            .collect();
        if leftover.is_empty() {
            Ok(())
        } else {
            Err(LdxError::config(format!(
                "{}: unrecognized option(s): {}",
                self.context,
                leftover.join(" ")
            )))
        }
    }
}
