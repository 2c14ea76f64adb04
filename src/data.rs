//! Loosely-typed API records.
//!
//! The Open States API shape is authoritative and changes over time, so
//! results are kept as an open tree of [`Data`] nodes instead of fixed
//! structs. The only transformation applied is timestamp normalization.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// Keys whose string values are parsed into [`Timestamp`]s.
pub const TIMESTAMP_FIELDS: [&str; 4] = [
    "created_at",
    "updated_at",
    "latest_people_update",
    "latest_bill_update",
];

const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub type Record = BTreeMap<String, Data>;

/// A parsed date/time. The API mixes offset-qualified and local values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timestamp {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl Timestamp {
    /// Parses the date/time spellings the API is known to emit.
    ///
    /// Returns `None` for anything else; callers keep the original string.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Timestamp::Zoned(dt));
        }
        for fmt in ZONED_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return Some(Timestamp::Zoned(dt));
            }
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Timestamp::Naive(dt));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Timestamp::Naive)
    }

    /// The wall-clock part, ignoring any offset.
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Timestamp::Zoned(dt) => dt.naive_local(),
            Timestamp::Naive(dt) => *dt,
        }
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Timestamp::Zoned(dt) => Some(*dt.offset()),
            Timestamp::Naive(_) => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Zoned(dt) => f.write_str(&dt.to_rfc3339()),
            Timestamp::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

/// A JSON value whose known timestamp fields may have been parsed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Data {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Timestamp(Timestamp),
    Array(Vec<Data>),
    Object(Record),
}

static NULL: Data = Data::Null;

impl Data {
    pub fn get(&self, key: &str) -> Option<&Data> {
        match self {
            Data::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Removes `key` from an object, returning its value.
    pub fn take(&mut self, key: &str) -> Option<Data> {
        match self {
            Data::Object(map) => map.remove(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Data::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Data::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Data::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Data::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Data::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Data::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Data>> {
        match self {
            Data::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Record> {
        match self {
            Data::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<Vec<Data>> {
        match self {
            Data::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<Record> {
        match self {
            Data::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Data::Null)
    }
}

impl Index<&str> for Data {
    type Output = Data;

    fn index(&self, key: &str) -> &Data {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for Data {
    type Output = Data;

    fn index(&self, idx: usize) -> &Data {
        self.as_array().and_then(|a| a.get(idx)).unwrap_or(&NULL)
    }
}

impl From<serde_json::Value> for Data {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Data::Null,
            Value::Bool(b) => Data::Bool(b),
            Value::Number(n) => Data::Number(n),
            Value::String(s) => Data::String(s),
            Value::Array(items) => Data::Array(items.into_iter().map(Data::from).collect()),
            Value::Object(map) => {
                Data::Object(map.into_iter().map(|(k, v)| (k, Data::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Data {
    fn from(s: &str) -> Self {
        Data::String(s.to_string())
    }
}

impl From<Timestamp> for Data {
    fn from(t: Timestamp) -> Self {
        Data::Timestamp(t)
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Data::Null => serializer.serialize_unit(),
            Data::Bool(b) => serializer.serialize_bool(*b),
            Data::Number(n) => n.serialize(serializer),
            Data::String(s) => serializer.serialize_str(s),
            Data::Timestamp(t) => serializer.collect_str(t),
            Data::Array(items) => items.serialize(serializer),
            Data::Object(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Data {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Data::from)
    }
}

fn is_timestamp_field(key: &str) -> bool {
    TIMESTAMP_FIELDS.contains(&key)
}

/// Parses string values stored under [`TIMESTAMP_FIELDS`], at any depth.
///
/// Unparseable values and already-converted timestamps are left alone, so
/// applying this twice is the same as applying it once.
pub fn convert_timestamps(data: Data) -> Data {
    match data {
        Data::Object(map) => Data::Object(
            map.into_iter()
                .map(|(key, value)| {
                    let value = if is_timestamp_field(&key) {
                        parse_field(value)
                    } else {
                        convert_timestamps(value)
                    };
                    (key, value)
                })
                .collect(),
        ),
        Data::Array(items) => Data::Array(items.into_iter().map(convert_timestamps).collect()),
        other => other,
    }
}

fn parse_field(value: Data) -> Data {
    match value {
        Data::String(s) => match Timestamp::parse(&s) {
            Some(t) => Data::Timestamp(t),
            None => Data::String(s),
        },
        other => other,
    }
}
