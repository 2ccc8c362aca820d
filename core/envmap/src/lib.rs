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

//! Populates configuration structs from environment variables.
//!
//! This crate provides a small resolution-and-mapping engine:
//! - Reading environment variables, with `<NAME>_FILE` indirection: a
//!   variable may point at a file whose first line supplies the actual value
//!   (the usual convention for container secrets)
//! - Coercing resolved strings to a closed set of kinds (string, int, long,
//!   float, double, bool, datetime) with culture-invariant parsing
//! - Mapping whole structs through a statically-declared schema, either via
//!   `#[derive(EnvSchema)]` or a hand-written descriptor table
//! - A direct lookup-and-convert API for ad-hoc reads

// Generated code refers to this crate as `envmap`; alias it for our own
// tests and examples.
extern crate self as envmap;

mod error;
mod mapper;
mod resolver;
mod schema;
mod value;

pub use envmap_derive::EnvSchema;
pub use error::{EnvMapError, ParseError};
pub use mapper::EnvMapper;
pub use resolver::{DEFAULT_FILE_SUFFIX, EnvResolver, MissingPolicy};
pub use schema::{EnvSchema, FieldDescriptor};
pub use value::{Value, ValueKind};
