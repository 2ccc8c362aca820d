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

//! Proc macro generating static environment variable schemas for envmap.
//!
//! `#[derive(EnvSchema)]` turns a named struct into a destination the
//! `envmap` mapper can populate, by generating a compile-time table of
//! field descriptors. No runtime reflection is involved: unsupported field
//! types are rejected when the schema is declared.

mod env_schema;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro generating the `envmap::EnvSchema` implementation.
///
/// Each named field becomes one descriptor. The source variable defaults to
/// the upper-cased field name (`db_port` reads `DB_PORT`).
///
/// # Field Attributes
/// - `#[env_map(name = "CUSTOM")]` - Override the source variable name
/// - `#[env_map(skip)]` - Exclude this field from the schema
/// - `#[env_map(secret)]` - Mask the value in logs
///
/// # Supported field types
/// `String`, `i32`, `i64`, `f32`, `f64`, `bool` and `chrono::NaiveDateTime`.
/// Any other field type is a compile-time error (use `skip` for fields that
/// are not environment-mapped).
///
/// # Example
/// ```ignore
/// #[derive(Default, EnvSchema)]
/// struct DbConfig {
///     #[env_map(name = "DB_PORT")]
///     db_port: i32,
///     #[env_map(name = "DB_SECRET", secret)]
///     db_secret: String,
///     #[env_map(skip)]
///     pool: ConnectionPool,
/// }
/// ```
#[proc_macro_derive(EnvSchema, attributes(env_map))]
pub fn derive_env_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    env_schema::generate_impl(&input).into()
}
