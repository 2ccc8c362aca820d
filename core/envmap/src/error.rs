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

//! Resolution and mapping error types.

use crate::value::ValueKind;
use thiserror::Error;

/// Errors surfaced by variable resolution and schema mapping.
///
/// All variants are terminal for the call in progress: the first error
/// aborts the remaining mapping, and fields written before it stay written.
#[derive(Debug, Error)]
pub enum EnvMapError {
    /// Neither the variable nor its file-indirected counterpart produced a
    /// value, and the missing policy required one.
    #[error("could not get variable '{variable}' from environment")]
    VariableNotFound { variable: String },
    /// The resolved string could not be coerced to the declared kind.
    #[error("could not convert value '{raw}' of variable '{variable}' to {target}")]
    VariableConversion {
        variable: String,
        raw: String,
        target: ValueKind,
        #[source]
        source: ParseError,
    },
    /// A field declares an explicit source variable override that is empty.
    #[error("no variable name defined for field {type_name}.{field}")]
    MissingVariableName {
        type_name: &'static str,
        field: &'static str,
    },
    /// A `<NAME><suffix>` variable names a file that could not be read.
    #[error("could not read file '{path}' referenced by variable '{variable}'")]
    FileIndirection {
        variable: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Underlying parse failure carried by [`EnvMapError::VariableConversion`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Int(#[from] std::num::ParseIntError),
    #[error(transparent)]
    Float(#[from] std::num::ParseFloatError),
    #[error(transparent)]
    DateTime(#[from] chrono::ParseError),
    #[error("expected 'true' or 'false'")]
    Bool,
}
