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

//! Field descriptor and schema types.

use crate::error::EnvMapError;
use crate::value::{Value, ValueKind};
use std::fmt;

/// Describes one mappable field of a destination type.
///
/// Descriptors are static data: the `#[derive(EnvSchema)]` macro generates a
/// table of them per struct, and hand-written registration tables work the
/// same way.
pub struct FieldDescriptor<T> {
    /// The destination field name (e.g. "db_port").
    pub field_name: &'static str,
    /// Explicit source variable override. `None` defaults to the upper-cased
    /// field name; an empty override is a configuration error, not a
    /// fallback.
    pub variable: Option<&'static str>,
    /// The kind the resolved string is coerced to before writing.
    pub kind: ValueKind,
    /// Whether the value is masked in logs.
    pub is_secret: bool,
    /// Writes a coerced value into the destination. Must accept the variant
    /// matching `kind`.
    pub write: fn(&mut T, Value),
}

impl<T> FieldDescriptor<T> {
    /// The effective environment variable name for this field.
    ///
    /// Returns [`EnvMapError::MissingVariableName`] when an explicit override
    /// was declared empty.
    pub fn variable_name(&self, type_name: &'static str) -> Result<String, EnvMapError> {
        match self.variable {
            Some("") => Err(EnvMapError::MissingVariableName {
                type_name,
                field: self.field_name,
            }),
            Some(variable) => Ok(variable.to_owned()),
            None => Ok(self.field_name.to_uppercase()),
        }
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldDescriptor<T> {}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("field_name", &self.field_name)
            .field("variable", &self.variable)
            .field("kind", &self.kind)
            .field("is_secret", &self.is_secret)
            .finish_non_exhaustive()
    }
}

/// Types whose fields can be populated from environment variables.
/// Implemented automatically by the `#[derive(EnvSchema)]` macro.
pub trait EnvSchema: Sized + 'static {
    /// The destination type name, used in error payloads.
    const TYPE_NAME: &'static str;

    /// The ordered field descriptors for this type.
    fn field_descriptors() -> &'static [FieldDescriptor<Self>];

    /// Finds a descriptor by destination field name.
    fn find_field(field_name: &str) -> Option<&'static FieldDescriptor<Self>> {
        Self::field_descriptors()
            .iter()
            .find(|d| d.field_name == field_name)
    }

    /// Returns the effective environment variable names, in field order.
    fn variable_names() -> Vec<String> {
        Self::field_descriptors()
            .iter()
            .filter_map(|d| d.variable_name(Self::TYPE_NAME).ok())
            .collect()
    }

    /// Returns the field names marked as secrets.
    fn secret_fields() -> Vec<&'static str> {
        Self::field_descriptors()
            .iter()
            .filter(|d| d.is_secret)
            .map(|d| d.field_name)
            .collect()
    }
}
