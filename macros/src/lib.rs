// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Derive macros for the Lithic client.
//!
//! Use these through the re-exports in the `lithic` crate; the generated code refers to items by
//! their `::lithic::query` paths.

mod attrs;
mod derive;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `lithic::query::QueryValue`, generating a fixed, ordered field table.
///
/// # Structs
///
/// Each named field becomes a member of the encoded struct, in declaration order, keyed by the
/// field name unless renamed.
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `rename = "..."` | Query key for this field. An empty key drops the field. |
/// | `format = "..."` | Scalar format hint: `date`, `date-time` or `binary` (alias `byte`) |
/// | `omit_default` | Leave the field out when it holds its type's zero value |
/// | `path_param` | Never encode; the value is interpolated into the URL path instead |
/// | `skip` | Never encode |
///
/// # Enums
///
/// Enums with unit variants encode as the variant name. Use `#[query(rename_all = "...")]` on the
/// enum (`SCREAMING_SNAKE_CASE`, `snake_case`, `lowercase`, `UPPERCASE`) or
/// `#[query(rename = "...")]` on a variant.
///
/// # Custom encodings
///
/// `#[query(url_query)]` on the type delegates to its `UrlQuery` implementation. The produced
/// pairs are spliced into the enclosing output with their keys nested under the field's key.
///
/// # Example
///
/// ```ignore
/// use lithic::{fields::Field, QueryValue};
///
/// #[derive(QueryValue)]
/// struct CardListParams {
///     account_token: Field<String>,
///     #[query(format = "date-time")]
///     begin: Field<DateTime<Utc>>,
///     page: Field<i64>,
/// }
/// ```
#[proc_macro_derive(QueryValue, attributes(query))]
pub fn query_value_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::query_value_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
