// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Encoding of typed values as flat query-string parameters.
//!
//! A value is first classified into a [Value] tree through the [QueryValue] trait, whose
//! implementations act as a fixed type-dispatch table: scalars format themselves, optional
//! wrappers collapse to [Value::Absent] when unset, and request structs get an ordered field table
//! from `#[derive(QueryValue)]`. The tree is then flattened into [QueryPairs] according to
//! [QuerySettings].
//!
//! ```ignore
//! #[derive(QueryValue)]
//! struct ListParams {
//!     account_token: Field<String>,
//!     page: Field<i64>,
//! }
//!
//! let pairs = query::marshal(&ListParams {
//!     account_token: Field::new("abc".into()),
//!     page: Field::Absent,
//! });
//! assert_eq!(pairs.encode(), "account_token=abc");
//! ```
//!
//! Encoding never fails. Absent values, values without a usable key and leaves that cannot be
//! classified are omitted from the output.

mod encoder;
mod impls;
mod pairs;

pub use pairs::QueryPairs;

use encoder::Encoder;

/// How nested keys are joined to their parent's key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NestedFormat {
    /// `parent[child]`
    #[default]
    Brackets,
    /// `parent.child`
    Dots,
}

/// How sequences are represented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArrayFormat {
    /// A single pair whose value is the comma-joined elements: `n=1,2,3`.
    #[default]
    Comma,
    /// One pair per element under the same key: `n=1&n=2&n=3`.
    Repeat,
    /// Indexed keys: `n[0]=1&n[1]=2` (or `n.0=1` with [NestedFormat::Dots]).
    Indices,
    /// Empty brackets shared by every element: `n[]=1&n[]=2`.
    Brackets,
}

/// Formatting rules for [marshal_with_settings].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct QuerySettings {
    pub nested_format: NestedFormat,
    pub array_format: ArrayFormat,
}

impl QuerySettings {
    pub fn new(nested_format: NestedFormat, array_format: ArrayFormat) -> Self {
        Self {
            nested_format,
            array_format,
        }
    }
}

/// Per-field formatting hint. Only affects how scalars are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    #[default]
    Default,
    /// Timestamps render as `YYYY-MM-DD`.
    Date,
    /// Timestamps render as RFC 3339 in UTC.
    DateTime,
    /// Byte sequences render as standard base64.
    Binary,
}

/// A value classified for query encoding.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Nothing to encode. Never produces output.
    Absent,
    /// An already formatted scalar.
    Scalar(String),
    /// Members of a struct in declaration order.
    Struct(Vec<NamedField>),
    Sequence(Vec<Value>),
    /// Entries of a mapping in iteration order.
    Mapping(Vec<(String, Value)>),
    /// Pairs produced by a [UrlQuery] implementation. Spliced in as-is, with keys nested under
    /// the current prefix.
    Encoded(QueryPairs),
}

impl Value {
    pub fn scalar(value: impl ToString) -> Self {
        Value::Scalar(value.to_string())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

/// A struct member as described by its field table.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedField {
    pub key: String,
    pub value: Value,
    /// False for members excluded from the query string, such as path parameters.
    pub emit: bool,
}

impl NamedField {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
            emit: true,
        }
    }

    /// A member that is part of the struct's shape but never appears in the query string.
    pub fn excluded(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Value::Absent,
            emit: false,
        }
    }

    pub(crate) fn is_emitted(&self) -> bool {
        self.emit && !self.key.is_empty() && !self.value.is_absent()
    }
}

/// Types which can be classified for query encoding.
///
/// Implementations exist for primitives, strings, timestamps, optional wrappers, sequences and
/// ordered maps. Structs and unit enums normally derive this trait; types that want to control
/// their own encoding implement [UrlQuery] and return [Value::Encoded].
pub trait QueryValue {
    fn query_value(&self, format: Format) -> Value;

    /// Whether this is the zero value of its type, for fields marked `omit_default`.
    fn is_zero(&self) -> bool {
        false
    }

    /// Byte view used to render `Vec<u8>` as base64 under [Format::Binary].
    #[doc(hidden)]
    fn as_query_byte(&self) -> Option<u8> {
        None
    }
}

/// Types which produce their own query parameters.
///
/// When a value with this capability is nested inside another, the encoder does not look inside
/// it; its pairs are spliced into the output with keys nested under the current prefix.
pub trait UrlQuery {
    fn url_query(&self) -> QueryPairs;
}

/// Encode `value` with the given settings.
///
/// The top-level key prefix is empty, so a top-level struct's members appear under their own keys.
pub fn marshal_with_settings<T: QueryValue + ?Sized>(
    value: &T,
    settings: QuerySettings,
) -> QueryPairs {
    Encoder::new(settings).encode(value.query_value(Format::Default))
}

/// Encode `value` with [NestedFormat::Brackets] and [ArrayFormat::Comma].
pub fn marshal<T: QueryValue + ?Sized>(value: &T) -> QueryPairs {
    marshal_with_settings(value, QuerySettings::default())
}
