// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use super::{Format, QueryPairs, QueryValue, UrlQuery, Value};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::hash::BuildHasher;

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl QueryValue for $ty {
                fn query_value(&self, _format: Format) -> Value {
                    Value::Scalar(self.to_string())
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize);

impl QueryValue for u8 {
    fn query_value(&self, _format: Format) -> Value {
        Value::Scalar(self.to_string())
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn as_query_byte(&self) -> Option<u8> {
        Some(*self)
    }
}

macro_rules! impl_float {
    ($($ty:ty),*) => {
        $(
            impl QueryValue for $ty {
                fn query_value(&self, _format: Format) -> Value {
                    Value::Scalar(self.to_string())
                }

                fn is_zero(&self) -> bool {
                    *self == 0.0
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl QueryValue for bool {
    fn query_value(&self, _format: Format) -> Value {
        Value::Scalar(if *self { "true" } else { "false" }.to_string())
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl QueryValue for char {
    fn query_value(&self, _format: Format) -> Value {
        Value::Scalar(self.to_string())
    }
}

impl QueryValue for str {
    fn query_value(&self, _format: Format) -> Value {
        Value::Scalar(self.to_string())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl QueryValue for String {
    fn query_value(&self, format: Format) -> Value {
        self.as_str().query_value(format)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl QueryValue for DateTime<Utc> {
    fn query_value(&self, format: Format) -> Value {
        match format {
            Format::Date => Value::Scalar(self.format("%Y-%m-%d").to_string()),
            _ => Value::Scalar(self.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl QueryValue for DateTime<FixedOffset> {
    fn query_value(&self, format: Format) -> Value {
        self.with_timezone(&Utc).query_value(format)
    }
}

impl QueryValue for NaiveDate {
    fn query_value(&self, _format: Format) -> Value {
        Value::Scalar(self.format("%Y-%m-%d").to_string())
    }
}

impl<T: QueryValue> QueryValue for Option<T> {
    fn query_value(&self, format: Format) -> Value {
        match self {
            Some(value) => value.query_value(format),
            None => Value::Absent,
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<T: QueryValue> QueryValue for [T] {
    fn query_value(&self, format: Format) -> Value {
        if format == Format::Binary {
            if let Some(bytes) = self
                .iter()
                .map(QueryValue::as_query_byte)
                .collect::<Option<Vec<u8>>>()
            {
                return Value::Scalar(STANDARD.encode(bytes));
            }
        }
        Value::Sequence(self.iter().map(|item| item.query_value(format)).collect())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: QueryValue> QueryValue for Vec<T> {
    fn query_value(&self, format: Format) -> Value {
        self.as_slice().query_value(format)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: QueryValue, const N: usize> QueryValue for [T; N] {
    fn query_value(&self, format: Format) -> Value {
        self.as_slice().query_value(format)
    }

    fn is_zero(&self) -> bool {
        N == 0
    }
}

impl<K: ToString, V: QueryValue> QueryValue for BTreeMap<K, V> {
    fn query_value(&self, format: Format) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.query_value(format)))
                .collect(),
        )
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K: ToString, V: QueryValue, S: BuildHasher> QueryValue for IndexMap<K, V, S> {
    fn query_value(&self, format: Format) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.query_value(format)))
                .collect(),
        )
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl QueryValue for serde_json::Value {
    fn query_value(&self, format: Format) -> Value {
        use serde_json::Value as Json;
        match self {
            Json::Null => Value::Absent,
            Json::Bool(b) => b.query_value(format),
            Json::Number(n) => Value::Scalar(n.to_string()),
            Json::String(s) => s.query_value(format),
            Json::Array(items) => items.query_value(format),
            Json::Object(map) => Value::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.query_value(format)))
                    .collect(),
            ),
        }
    }

    fn is_zero(&self) -> bool {
        self.is_null()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn query_value(&self, format: Format) -> Value {
        (**self).query_value(format)
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn as_query_byte(&self) -> Option<u8> {
        (**self).as_query_byte()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for Box<T> {
    fn query_value(&self, format: Format) -> Value {
        (**self).query_value(format)
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn as_query_byte(&self) -> Option<u8> {
        (**self).as_query_byte()
    }
}

impl QueryValue for QueryPairs {
    fn query_value(&self, _format: Format) -> Value {
        Value::Encoded(self.clone())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl UrlQuery for QueryPairs {
    fn url_query(&self) -> QueryPairs {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn scalars_use_canonical_text() {
        assert_eq!(true.query_value(Format::Default), Value::scalar("true"));
        assert_eq!((-42i64).query_value(Format::Default), Value::scalar("-42"));
        assert_eq!(1.5f64.query_value(Format::Default), Value::scalar("1.5"));
        assert_eq!(
            "a b&c".query_value(Format::Default),
            Value::scalar("a b&c")
        );
    }

    #[test]
    fn timestamps_follow_format_hint() {
        let t = Utc.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap();
        assert_eq!(
            t.query_value(Format::DateTime),
            Value::scalar("2023-04-05T06:07:08Z")
        );
        assert_eq!(t.query_value(Format::Date), Value::scalar("2023-04-05"));

        let offset = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 4, 5, 8, 7, 8)
            .unwrap();
        assert_eq!(
            offset.query_value(Format::Default),
            Value::scalar("2023-04-05T06:07:08Z")
        );
    }

    #[test]
    fn bytes_with_binary_hint_are_base64() {
        let bytes = b"hello".to_vec();
        assert_eq!(bytes.query_value(Format::Binary), Value::scalar("aGVsbG8="));
        assert!(matches!(
            bytes.query_value(Format::Default),
            Value::Sequence(items) if items.len() == 5
        ));
    }

    #[test]
    fn optional_values_collapse_to_absent() {
        assert!(None::<bool>.query_value(Format::Default).is_absent());
        assert_eq!(
            Some(false).query_value(Format::Default),
            Value::scalar("false")
        );
    }

    #[test]
    fn zero_values() {
        assert!(0i32.is_zero());
        assert!(!1u8.is_zero());
        assert!(String::new().is_zero());
        assert!(Vec::<i32>::new().is_zero());
        assert!(!true.is_zero());
    }
}
