//! The query component as an ordered mapping.

use crate::encoding;

/// A query parameter value: a scalar or an ordered sequence.
///
/// Sequences arise from form-style keys such as `tag[]=a&tag[]=b`,
/// which accumulate under the key `tag`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// A single scalar value.
    Single(String),
    /// An ordered sequence of values under one key.
    List(Vec<String>),
}

impl QueryValue {
    /// Returns the scalar value, or `None` for a sequence.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::Single(value) => Some(value),
            QueryValue::List(_) => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::List(values)
    }
}

/// An ordered mapping of decoded query keys to values.
///
/// Keys keep their first-insertion order; assigning to an existing key
/// replaces its value in place. The serialized form is obtained through
/// the `Display` impl, which percent-encodes per RFC 3986.
///
/// # Examples
///
/// ```
/// use uri_value::{Query, QueryValue};
///
/// let query = Query::parse("name=ferret&tag[]=a&tag[]=b");
/// assert_eq!(query.get("name"), Some(&QueryValue::Single("ferret".into())));
/// assert_eq!(
///     query.get("tag"),
///     Some(&QueryValue::List(vec!["a".into(), "b".into()]))
/// );
/// assert_eq!(query.to_string(), "name=ferret&tag%5B%5D=a&tag%5B%5D=b");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, QueryValue)>,
}

impl Query {
    /// Creates an empty query mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string into a mapping, with form-decoding semantics.
    ///
    /// Keys and values are percent-decoded and `+` decodes to a space.
    /// A duplicate plain key overwrites the previous value in place;
    /// a bracketed key (`tag[]`, `tag[0]`, ...) appends to the sequence
    /// under the base key. A pair without `=` yields an empty value.
    /// Empty pairs are skipped. This function is total.
    pub fn parse(s: &str) -> Query {
        let mut query = Query::new();
        for part in s.split('&') {
            if part.is_empty() {
                continue;
            }
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            let key = decode_component(key);
            let value = decode_component(value);
            match array_key(&key) {
                Some(base) => query.push_item(base.to_owned(), value),
                None => query.insert(key, QueryValue::Single(value)),
            }
        }
        query
    }

    /// Returns the number of keys in the mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Checks whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the value under the given key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Inserts a value under the given key.
    ///
    /// An existing key keeps its position; its value is replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.pairs.push((name, value)),
        }
    }

    /// Removes the given key, if present.
    pub fn remove(&mut self, name: &str) {
        self.pairs.retain(|(key, _)| key != name);
    }

    /// Adds the entries of `other` whose keys are absent from `self`.
    ///
    /// Existing entries win on conflict and keep their positions;
    /// added entries go to the end in their order in `other`.
    pub fn merge_missing(&mut self, other: Query) {
        for (key, value) in other.pairs {
            if self.get(&key).is_none() {
                self.pairs.push((key, value));
            }
        }
    }

    /// Iterates over the key/value pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value))
    }

    // Appends to the sequence under `name`, displacing any scalar there.
    fn push_item(&mut self, name: String, value: String) {
        match self.pairs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, QueryValue::List(items))) => items.push(value),
            Some((_, slot)) => *slot = QueryValue::List(vec![value]),
            None => self.pairs.push((name, QueryValue::List(vec![value]))),
        }
    }

    // Order-independent, value-exact comparison.
    pub(crate) fn eq_unordered(&self, other: &Query) -> bool {
        if self.pairs.len() != other.pairs.len() {
            return false;
        }
        let mut lhs: Vec<_> = self.pairs.iter().collect();
        let mut rhs: Vec<_> = other.pairs.iter().collect();
        lhs.sort_by(|a, b| a.0.cmp(&b.0));
        rhs.sort_by(|a, b| a.0.cmp(&b.0));
        lhs == rhs
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Query::parse(s)
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Query::parse(&s)
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

fn decode_component(s: &str) -> String {
    encoding::decode(&s.replace('+', " "))
}

// Form-style array syntax: a trailing bracket group appends under the base key.
fn array_key(key: &str) -> Option<&str> {
    let open = key.find('[')?;
    key.ends_with(']').then(|| &key[..open])
}
