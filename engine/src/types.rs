use crate::field::FieldPath;
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};

/// A dynamic value held by a record field.
///
/// Records coming out of upstream listings are loosely typed, so values are
/// modeled as a tagged union rather than a fixed schema. Deserialization is
/// untagged: any JSON/YAML scalar or container maps onto the matching
/// variant.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Retrieves a child value by path segment.
    ///
    /// Records are indexed by key; arrays by a segment that parses as a
    /// zero-based index. Scalars have no children.
    pub fn get(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Record(record) => record.get(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        }
    }

    /// True for the values the `:empty` operator treats as empty.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Record(record) => record.is_empty(),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => false,
        }
    }

    /// Numeric coercion for the ordering operators.
    ///
    /// Numbers coerce directly; strings only when they parse fully as a
    /// number. Everything else is non-numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The stable textual form used by the string and pattern operators.
    ///
    /// Containers stringify as canonical JSON, which is deterministic
    /// because records preserve insertion order.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Int(n) => Cow::Owned(n.to_string()),
            Value::Float(n) => Cow::Owned(n.to_string()),
            Value::String(s) => Cow::Borrowed(s),
            Value::Array(_) | Value::Record(_) => {
                Cow::Owned(serde_json::to_string(self).unwrap_or_default())
            }
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(inner) => Debug::fmt(inner, f),
            Value::Int(inner) => Debug::fmt(inner, f),
            Value::Float(inner) => Debug::fmt(inner, f),
            Value::String(inner) => Debug::fmt(inner, f),
            Value::Array(inner) => Debug::fmt(inner, f),
            Value::Record(inner) => Debug::fmt(inner, f),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

/// One filterable unit of data: an insertion-ordered mapping from field
/// name to [`Value`].
///
/// Records in one collection are not required to share a field set; absent
/// fields resolve to nothing and count as empty for filtering purposes.
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value, FnvBuildHasher>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Removes a field, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Resolves a dotted path against this record.
    ///
    /// Returns `None` when any intermediate segment is missing or not a
    /// container; an explicit `Value::Null` leaf still resolves, so callers
    /// can tell "absent" apart from "present but null".
    pub fn get_path(&self, path: &FieldPath) -> Option<&Value> {
        let mut segments = path.segments().iter();
        let mut value = self.get(segments.next()?)?;
        for segment in segments {
            value = value.get(segment)?;
        }
        Some(value)
    }

    /// Returns the nested record under `key` for path-based insertion,
    /// replacing any non-record value already in the slot.
    pub(crate) fn nested_record_mut(&mut self, key: &str) -> &mut Record {
        let slot = self
            .fields
            .entry(key.to_owned())
            .or_insert_with(|| Value::Record(Record::new()));
        if !matches!(slot, Value::Record(_)) {
            *slot = Value::Record(Record::new());
        }
        match slot {
            Value::Record(nested) => nested,
            _ => unreachable!(),
        }
    }
}

impl Debug for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            fields: IndexMap::from_iter(iter),
        }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Builds a [`Record`] from `key => value` pairs, preserving order.
#[macro_export]
macro_rules! record {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut record = $crate::Record::new();
        $(record.insert($key, $value);)*
        record
    }};
}
