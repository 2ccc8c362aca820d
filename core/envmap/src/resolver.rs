/*
 * Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

//! Environment variable resolution with file indirection.

use crate::error::EnvMapError;
use crate::value::{Value, ValueKind};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::{env, io};
use tracing::{debug, warn};

/// Default suffix for file-indirected variables: `MY_SECRET_FILE` names a
/// file whose first line supplies the value of `MY_SECRET`.
pub const DEFAULT_FILE_SUFFIX: &str = "_FILE";

/// Policy for variables that resolve to no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// An absent variable is a no-op; the destination keeps its value.
    #[default]
    UseDefault,
    /// An absent variable is a [`EnvMapError::VariableNotFound`] error.
    Require,
}

/// Resolves environment variables, falling back to file indirection.
///
/// Immutable after construction and safe to share across calls.
///
/// # Example
/// ```no_run
/// use envmap::{EnvResolver, MissingPolicy};
///
/// let resolver = EnvResolver::new();
/// // Reads MY_SECRET, then the first line of the file named by MY_SECRET_FILE.
/// let secret = resolver.resolve("MY_SECRET", MissingPolicy::Require)?;
/// # Ok::<(), envmap::EnvMapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EnvResolver {
    file_suffix: String,
}

impl Default for EnvResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvResolver {
    /// Create a resolver with the default `_FILE` suffix.
    pub fn new() -> Self {
        Self::with_file_suffix(DEFAULT_FILE_SUFFIX)
    }

    /// Create a resolver with a custom file-indirection suffix.
    pub fn with_file_suffix(file_suffix: impl Into<String>) -> Self {
        Self {
            file_suffix: file_suffix.into(),
        }
    }

    pub fn file_suffix(&self) -> &str {
        &self.file_suffix
    }

    /// Resolve a variable to its effective string value.
    ///
    /// Ordered, first match wins:
    /// 1. the variable itself, if set, valid UTF-8 and non-empty (no
    ///    trimming; a non-unicode value is treated as unset);
    /// 2. the first line of the file named by `<variable><suffix>`, trimmed,
    ///    if non-empty;
    /// 3. otherwise `Ok(None)`, or [`EnvMapError::VariableNotFound`] when the
    ///    policy requires a value.
    ///
    /// An unreadable indirection file is a distinct
    /// [`EnvMapError::FileIndirection`] error; a readable file whose first
    /// line trims to empty falls through to step 3.
    pub fn resolve(
        &self,
        variable: &str,
        policy: MissingPolicy,
    ) -> Result<Option<String>, EnvMapError> {
        if let Ok(value) = env::var(variable) {
            if !value.is_empty() {
                return Ok(Some(value));
            }
        }

        let file_variable = format!("{variable}{}", self.file_suffix);
        if let Ok(path) = env::var(&file_variable) {
            if !path.is_empty() {
                debug!("Resolving '{variable}' through file '{path}' named by '{file_variable}'");
                if let Some(value) = self.read_first_line(variable, &path)? {
                    return Ok(Some(value));
                }
            }
        }

        match policy {
            MissingPolicy::Require => Err(EnvMapError::VariableNotFound {
                variable: variable.to_owned(),
            }),
            MissingPolicy::UseDefault => Ok(None),
        }
    }

    /// Resolve a variable and coerce it to the requested kind.
    ///
    /// Fails with [`EnvMapError::VariableConversion`] when the resolved
    /// string cannot be coerced.
    pub fn resolve_typed(
        &self,
        variable: &str,
        kind: ValueKind,
        policy: MissingPolicy,
    ) -> Result<Option<Value>, EnvMapError> {
        let Some(raw) = self.resolve(variable, policy)? else {
            return Ok(None);
        };
        let value =
            Value::parse(kind, &raw).map_err(|source| EnvMapError::VariableConversion {
                variable: variable.to_owned(),
                raw,
                target: kind,
                source,
            })?;
        Ok(Some(value))
    }

    /// First line of the file, trimmed. `Ok(None)` when it trims to empty.
    fn read_first_line(
        &self,
        variable: &str,
        path: &str,
    ) -> Result<Option<String>, EnvMapError> {
        let indirection = |source: io::Error| EnvMapError::FileIndirection {
            variable: variable.to_owned(),
            path: path.to_owned(),
            source,
        };

        let file = File::open(path).map_err(indirection)?;
        let mut line = String::new();
        BufReader::new(file).read_line(&mut line).map_err(indirection)?;

        let line = line.trim();
        if line.is_empty() {
            warn!("File '{path}' for variable '{variable}' has an empty first line");
            Ok(None)
        } else {
            Ok(Some(line.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn secret_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        write!(file, "{content}").expect("write temp file");
        file
    }

    #[test]
    #[serial]
    fn direct_value_wins_over_file_indirection() {
        let file = secret_file("from file\n");
        unsafe {
            env::set_var("RESOLVER_DIRECT", "from env");
            env::set_var("RESOLVER_DIRECT_FILE", file.path());
        }

        let value = EnvResolver::new()
            .resolve("RESOLVER_DIRECT", MissingPolicy::Require)
            .unwrap();

        unsafe {
            env::remove_var("RESOLVER_DIRECT");
            env::remove_var("RESOLVER_DIRECT_FILE");
        }

        assert_eq!(value.as_deref(), Some("from env"));
    }

    #[test]
    #[serial]
    fn file_indirection_returns_trimmed_first_line() {
        let file = secret_file("  this is a secret  \nsecond line\n");
        unsafe {
            env::set_var("RESOLVER_INDIRECT_FILE", file.path());
        }

        let value = EnvResolver::new()
            .resolve("RESOLVER_INDIRECT", MissingPolicy::Require)
            .unwrap();

        unsafe {
            env::remove_var("RESOLVER_INDIRECT_FILE");
        }

        assert_eq!(value.as_deref(), Some("this is a secret"));
    }

    #[test]
    #[serial]
    fn empty_direct_value_falls_through_to_file() {
        let file = secret_file("fallback\n");
        unsafe {
            env::set_var("RESOLVER_EMPTY", "");
            env::set_var("RESOLVER_EMPTY_FILE", file.path());
        }

        let value = EnvResolver::new()
            .resolve("RESOLVER_EMPTY", MissingPolicy::Require)
            .unwrap();

        unsafe {
            env::remove_var("RESOLVER_EMPTY");
            env::remove_var("RESOLVER_EMPTY_FILE");
        }

        assert_eq!(value.as_deref(), Some("fallback"));
    }

    #[test]
    #[serial]
    fn missing_variable_is_absent_under_default_policy() {
        let value = EnvResolver::new()
            .resolve("RESOLVER_UNSET", MissingPolicy::UseDefault)
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    #[serial]
    fn missing_variable_is_an_error_when_required() {
        let result = EnvResolver::new().resolve("RESOLVER_UNSET", MissingPolicy::Require);
        match result {
            Err(EnvMapError::VariableNotFound { variable }) => {
                assert_eq!(variable, "RESOLVER_UNSET");
            }
            other => panic!("expected VariableNotFound, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn whitespace_only_first_line_counts_as_absent() {
        let file = secret_file("   \nsecond line\n");
        unsafe {
            env::set_var("RESOLVER_BLANK_FILE", file.path());
        }

        let value = EnvResolver::new()
            .resolve("RESOLVER_BLANK", MissingPolicy::UseDefault)
            .unwrap();

        unsafe {
            env::remove_var("RESOLVER_BLANK_FILE");
        }

        assert_eq!(value, None);
    }

    #[test]
    #[serial]
    fn unreadable_file_is_a_distinct_error() {
        unsafe {
            env::set_var("RESOLVER_NOFILE_FILE", "/nonexistent/secret.txt");
        }

        let result = EnvResolver::new().resolve("RESOLVER_NOFILE", MissingPolicy::UseDefault);

        unsafe {
            env::remove_var("RESOLVER_NOFILE_FILE");
        }

        match result {
            Err(EnvMapError::FileIndirection { variable, path, .. }) => {
                assert_eq!(variable, "RESOLVER_NOFILE");
                assert_eq!(path, "/nonexistent/secret.txt");
            }
            other => panic!("expected FileIndirection, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn custom_suffix_is_honored() {
        let file = secret_file("custom\n");
        unsafe {
            env::set_var("RESOLVER_CUSTOM_FROM", file.path());
        }

        let resolver = EnvResolver::with_file_suffix("_FROM");
        let value = resolver
            .resolve("RESOLVER_CUSTOM", MissingPolicy::Require)
            .unwrap();

        unsafe {
            env::remove_var("RESOLVER_CUSTOM_FROM");
        }

        assert_eq!(resolver.file_suffix(), "_FROM");
        assert_eq!(value.as_deref(), Some("custom"));
    }

    #[test]
    #[serial]
    fn resolve_typed_coerces_the_resolved_string() {
        unsafe {
            env::set_var("RESOLVER_TYPED_PORT", "7431");
        }

        let value = EnvResolver::new()
            .resolve_typed("RESOLVER_TYPED_PORT", ValueKind::Int, MissingPolicy::Require)
            .unwrap();

        unsafe {
            env::remove_var("RESOLVER_TYPED_PORT");
        }

        assert_eq!(value, Some(Value::Int(7431)));
    }

    #[test]
    #[serial]
    fn resolve_typed_reports_conversion_failures() {
        unsafe {
            env::set_var("RESOLVER_TYPED_BAD", "tests_db");
        }

        let result = EnvResolver::new().resolve_typed(
            "RESOLVER_TYPED_BAD",
            ValueKind::Bool,
            MissingPolicy::Require,
        );

        unsafe {
            env::remove_var("RESOLVER_TYPED_BAD");
        }

        match result {
            Err(EnvMapError::VariableConversion {
                variable,
                raw,
                target,
                ..
            }) => {
                assert_eq!(variable, "RESOLVER_TYPED_BAD");
                assert_eq!(raw, "tests_db");
                assert_eq!(target, ValueKind::Bool);
            }
            other => panic!("expected VariableConversion, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn resolve_typed_is_absent_when_unset() {
        let value = EnvResolver::new()
            .resolve_typed("RESOLVER_TYPED_UNSET", ValueKind::Int, MissingPolicy::UseDefault)
            .unwrap();
        assert_eq!(value, None);
    }
}
