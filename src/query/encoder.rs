// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use super::{ArrayFormat, NestedFormat, QueryPairs, QuerySettings, Value};
use itertools::Itertools;

/// Flattens a classified [Value] tree into key/value pairs.
pub(super) struct Encoder {
    settings: QuerySettings,
}

impl Encoder {
    pub fn new(settings: QuerySettings) -> Self {
        Self { settings }
    }

    pub fn encode(&self, value: Value) -> QueryPairs {
        let mut out = QueryPairs::new();
        self.encode_value("", value, &mut out);
        out
    }

    fn encode_value(&self, key: &str, value: Value, out: &mut QueryPairs) {
        match value {
            Value::Absent => {}
            Value::Scalar(s) => {
                // A scalar needs a key; a bare top-level scalar has none.
                if !key.is_empty() {
                    out.add(key, s);
                }
            }
            Value::Struct(fields) => {
                for field in fields {
                    if field.is_emitted() {
                        let child = self.join(key, &field.key);
                        self.encode_value(&child, field.value, out);
                    }
                }
            }
            Value::Mapping(entries) => {
                for (entry_key, entry) in entries {
                    if entry_key.is_empty() || entry.is_absent() {
                        continue;
                    }
                    let child = self.join(key, &entry_key);
                    self.encode_value(&child, entry, out);
                }
            }
            Value::Sequence(items) => self.encode_sequence(key, items, out),
            Value::Encoded(pairs) => {
                for (k, v) in pairs {
                    if k.is_empty() {
                        continue;
                    }
                    out.add(self.splice(key, &k), v);
                }
            }
        }
    }

    fn encode_sequence(&self, key: &str, items: Vec<Value>, out: &mut QueryPairs) {
        // Like scalars, a sequence needs a key to hang its elements off.
        if key.is_empty() {
            return;
        }
        match self.settings.array_format {
            ArrayFormat::Comma => {
                let mut values = Vec::new();
                for item in items {
                    flatten_values(item, &mut values);
                }
                if !values.is_empty() {
                    out.add(key, values.iter().join(","));
                }
            }
            ArrayFormat::Repeat => {
                for item in items {
                    self.encode_value(key, item, out);
                }
            }
            ArrayFormat::Indices => {
                for (i, item) in items.into_iter().enumerate() {
                    let child = self.join(key, &i.to_string());
                    self.encode_value(&child, item, out);
                }
            }
            ArrayFormat::Brackets => {
                let child = format!("{}[]", key);
                for item in items {
                    self.encode_value(&child, item, out);
                }
            }
        }
    }

    /// Key of a member named `key` nested under `prefix`.
    fn join(&self, prefix: &str, key: &str) -> String {
        if prefix.is_empty() {
            return key.to_string();
        }
        match self.settings.nested_format {
            NestedFormat::Brackets => format!("{}[{}]", prefix, key),
            NestedFormat::Dots => format!("{}.{}", prefix, key),
        }
    }

    /// Rewrite a key produced by a custom encoding so it nests under `prefix`.
    ///
    /// With brackets only the leading segment is wrapped, so `a[b]` under `x` becomes `x[a][b]`.
    fn splice(&self, prefix: &str, key: &str) -> String {
        if prefix.is_empty() {
            return key.to_string();
        }
        match self.settings.nested_format {
            NestedFormat::Brackets => match key.find('[') {
                Some(0) => format!("{}{}", prefix, key),
                Some(i) => format!("{}[{}]{}", prefix, &key[..i], &key[i..]),
                None => format!("{}[{}]", prefix, key),
            },
            NestedFormat::Dots => format!("{}.{}", prefix, key),
        }
    }
}

/// Collect every leaf string under `value`, in order, ignoring keys.
///
/// Used by the comma format, which can only carry scalars: nested structures are flattened to
/// their leaf values.
fn flatten_values(value: Value, values: &mut Vec<String>) {
    match value {
        Value::Absent => {}
        Value::Scalar(s) => values.push(s),
        Value::Struct(fields) => {
            for field in fields {
                if field.is_emitted() {
                    flatten_values(field.value, values);
                }
            }
        }
        Value::Mapping(entries) => {
            for (_, entry) in entries {
                flatten_values(entry, values);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                flatten_values(item, values);
            }
        }
        Value::Encoded(pairs) => values.extend(pairs.into_iter().map(|(_, v)| v)),
    }
}
