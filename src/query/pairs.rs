// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use url::form_urlencoded;

/// An ordered list of query parameters in which keys may repeat.
///
/// This is the output of the query encoder. Order is significant: the repeat and brackets array
/// formats rely on it, and the encoder emits fields in declaration order. Percent-encoding only
/// happens in [QueryPairs::encode] (or when the pairs are applied to a URL by the client), never
/// while pairs are being collected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, keeping any existing pairs with the same key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Replace every pair under `key` with a single pair.
    ///
    /// The new pair takes the position of the first pair it replaces, or goes at the end if the
    /// key was not present.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.0[first].1 = value;
                let mut index = 0;
                self.0.retain(|(k, _)| {
                    let keep = index <= first || *k != key;
                    index += 1;
                    keep
                });
            }
            None => self.0.push((key, value)),
        }
    }

    /// The first value under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value under `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) {
        self.0.retain(|(k, _)| k != key);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }

    /// Group values by key, keeping keys in order of first appearance.
    pub fn to_multimap(&self) -> IndexMap<String, Vec<String>> {
        let mut map: IndexMap<String, Vec<String>> = IndexMap::new();
        for (k, v) in &self.0 {
            map.entry(k.clone()).or_default().push(v.clone());
        }
        map
    }

    /// Serialize as an `application/x-www-form-urlencoded` query string.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl Display for QueryPairs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryPairs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryPairs {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for QueryPairs {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryPairs {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<(String, String)>> for QueryPairs {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_all_values_in_place() {
        let mut pairs: QueryPairs = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        pairs.set("a", "9");
        assert_eq!(
            pairs.as_slice(),
            &[
                ("a".to_string(), "9".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
        pairs.set("c", "4");
        assert_eq!(pairs.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn repeated_keys_are_kept_in_order() {
        let mut pairs = QueryPairs::new();
        pairs.add("n", "1");
        pairs.add("m", "x");
        pairs.add("n", "2");
        assert_eq!(pairs.get("n"), Some("1"));
        assert_eq!(pairs.get_all("n").collect::<Vec<_>>(), vec!["1", "2"]);
        let map = pairs.to_multimap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["n", "m"]);
        assert_eq!(map["n"], vec!["1", "2"]);
    }

    #[test]
    fn encode_percent_escapes_keys_and_values() {
        let pairs: QueryPairs = [("a[b]", "x y"), ("c", "1,2")].into_iter().collect();
        assert_eq!(pairs.encode(), "a%5Bb%5D=x+y&c=1%2C2");
    }

    #[test]
    fn remove_drops_every_value() {
        let mut pairs: QueryPairs = [("a", "1"), ("a", "2"), ("b", "3")].into_iter().collect();
        pairs.remove("a");
        assert!(!pairs.contains_key("a"));
        assert_eq!(pairs.len(), 1);
    }
}
