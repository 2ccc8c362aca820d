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

//! Schema-driven mapping of environment variables into destination structs.

use crate::error::EnvMapError;
use crate::resolver::{EnvResolver, MissingPolicy};
use crate::schema::EnvSchema;
use crate::value::Value;
use tracing::debug;

const SECRET_MASK: &str = "******";

/// Populates [`EnvSchema`] destinations from the environment.
///
/// # Example
/// ```no_run
/// use envmap::{EnvMapper, EnvSchema, MissingPolicy};
///
/// #[derive(Debug, Default, EnvSchema)]
/// struct DbConfig {
///     #[env_map(name = "DB_PORT")]
///     db_port: i32,
///     #[env_map(name = "DB_SECRET", secret)]
///     db_secret: String,
/// }
///
/// let config: DbConfig = EnvMapper::new().map(MissingPolicy::UseDefault)?;
/// # Ok::<(), envmap::EnvMapError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvMapper {
    resolver: EnvResolver,
}

impl EnvMapper {
    /// Create a mapper backed by a default [`EnvResolver`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper backed by a custom resolver.
    pub fn with_resolver(resolver: EnvResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &EnvResolver {
        &self.resolver
    }

    /// Populate `destination` from the environment, field by field in
    /// declaration order.
    ///
    /// Absent variables leave the corresponding field untouched, so the
    /// destination's pre-call values act as defaults. The first error aborts
    /// the remaining mapping; fields already written stay written.
    pub fn map_into<T: EnvSchema>(
        &self,
        destination: &mut T,
        policy: MissingPolicy,
    ) -> Result<(), EnvMapError> {
        for descriptor in T::field_descriptors() {
            let variable = descriptor.variable_name(T::TYPE_NAME)?;

            let Some(raw) = self.resolver.resolve(&variable, policy)? else {
                continue;
            };

            let value = Value::parse(descriptor.kind, &raw).map_err(|source| {
                EnvMapError::VariableConversion {
                    variable: variable.clone(),
                    raw: raw.clone(),
                    target: descriptor.kind,
                    source,
                }
            })?;

            let display_value = if descriptor.is_secret {
                SECRET_MASK
            } else {
                raw.as_str()
            };
            debug!(
                "{}.{} set to '{}' from environment variable {}",
                T::TYPE_NAME,
                descriptor.field_name,
                display_value,
                variable
            );

            (descriptor.write)(destination, value);
        }

        Ok(())
    }

    /// Construct a default instance of `T` and populate it.
    pub fn map<T: EnvSchema + Default>(&self, policy: MissingPolicy) -> Result<T, EnvMapError> {
        let mut destination = T::default();
        self.map_into(&mut destination, policy)?;
        Ok(destination)
    }
}
