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

use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{DeriveInput, Ident, Type};

/// Container-level input for `#[derive(EnvSchema)]`
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(env_map), supports(struct_named))]
pub struct EnvSchemaOpts {
    ident: Ident,
    data: darling::ast::Data<darling::util::Ignored, FieldOpts>,
}

/// Field-level attributes for `#[env_map(...)]`
#[derive(Debug, FromField)]
#[darling(attributes(env_map))]
struct FieldOpts {
    ident: Option<Ident>,
    ty: Type,

    /// Explicit source variable name (overrides the upper-cased field name).
    /// Passed through verbatim so an empty override surfaces as a runtime
    /// configuration error, never as a silent fallback.
    #[darling(default)]
    name: Option<String>,

    /// Skip this field entirely
    #[darling(default)]
    skip: bool,

    /// Mask this field's value in logs
    #[darling(default)]
    secret: bool,
}

pub fn generate_impl(input: &DeriveInput) -> TokenStream2 {
    match EnvSchemaOpts::from_derive_input(input) {
        Ok(opts) => generate_from_opts(opts),
        Err(e) => e.write_errors(),
    }
}

fn generate_from_opts(opts: EnvSchemaOpts) -> TokenStream2 {
    let struct_name = &opts.ident;
    let type_name = struct_name.to_string();

    let fields = match opts.data {
        darling::ast::Data::Struct(fields) => fields.fields,
        // `supports(struct_named)` already rejects enums and tuple structs.
        darling::ast::Data::Enum(_) => unreachable!(),
    };

    let mut descriptors = Vec::new();
    for field in &fields {
        if field.skip {
            continue;
        }
        let Some(field_ident) = &field.ident else {
            continue;
        };

        let Some(kind) = value_kind_for(&field.ty) else {
            return darling::Error::custom(format!(
                "field `{field_ident}` has a type envmap cannot coerce to; expected \
                 String, i32, i64, f32, f64, bool or NaiveDateTime (or add #[env_map(skip)])"
            ))
            .with_span(&field.ty)
            .write_errors();
        };
        let kind_ident = format_ident!("{kind}");

        let field_name = field_ident.to_string();
        let variable = match &field.name {
            Some(name) => quote! { Some(#name) },
            None => quote! { None },
        };
        let is_secret = field.secret;

        descriptors.push(quote! {
            envmap::FieldDescriptor {
                field_name: #field_name,
                variable: #variable,
                kind: envmap::ValueKind::#kind_ident,
                is_secret: #is_secret,
                write: |destination, value| {
                    if let envmap::Value::#kind_ident(value) = value {
                        destination.#field_ident = value;
                    }
                },
            }
        });
    }

    quote! {
        impl envmap::EnvSchema for #struct_name {
            const TYPE_NAME: &'static str = #type_name;

            fn field_descriptors() -> &'static [envmap::FieldDescriptor<Self>] {
                static FIELDS: &[envmap::FieldDescriptor<#struct_name>] = &[
                    #(#descriptors),*
                ];
                FIELDS
            }
        }
    }
}

/// Map a field type to its `ValueKind` variant name. Closed dispatch: only
/// the enumerated kinds are coercible.
fn value_kind_for(ty: &Type) -> Option<&'static str> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if !segment.arguments.is_none() {
        return None;
    }

    match segment.ident.to_string().as_str() {
        "String" => Some("String"),
        "i32" => Some("Int"),
        "i64" => Some("Long"),
        "f32" => Some("Float"),
        "f64" => Some("Double"),
        "bool" => Some("Bool"),
        "NaiveDateTime" => Some("DateTime"),
        _ => None,
    }
}
