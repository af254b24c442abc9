//! Records of values obtained during environment interaction.
//!
//! A [`Record`] is a flexible container of key-value pairs. Environments and
//! filters return records of per-step diagnostics, which callers may inspect
//! or discard.
use crate::error::CoreError;
use std::collections::{
    hash_map::{IntoIter, Iter, Keys},
    HashMap,
};

/// Represents possible types of values in a [`Record`].
#[derive(Debug, Clone)]
pub enum RecordValue {
    /// A single floating-point value, typically used for metrics.
    Scalar(f32),

    /// A 1-dimensional array of floating-point values.
    Array1(Vec<f32>),

    /// A text value, useful for storing labels or descriptions.
    String(String),
}

/// A container for storing key-value pairs of various data types.
#[derive(Debug)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Returns an iterator that consumes the record.
    pub fn into_iter_in_record(self) -> IntoIter<String, RecordValue> {
        self.0.into_iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// If both records contain the same key, the value from the second record
    /// overwrites the value from the first record.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges another record into this one in place.
    pub fn merge_inplace(&mut self, record: Record) {
        for (k, v) in record.iter() {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Gets a scalar value from the record.
    ///
    /// Returns an error if the key does not exist or the value is not a scalar.
    pub fn get_scalar(&self, k: &str) -> Result<f32, CoreError> {
        if let Some(v) = self.0.get(k) {
            match v {
                RecordValue::Scalar(v) => Ok(*v as _),
                _ => Err(CoreError::RecordValueTypeError("Scalar".to_string())),
            }
        } else {
            Err(CoreError::RecordKeyError(k.to_string()))
        }
    }

    /// Gets a 1-dimensional array from the record.
    ///
    /// Returns an error if the key does not exist or the value is not an array.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, CoreError> {
        if let Some(v) = self.0.get(k) {
            match v {
                RecordValue::Array1(v) => Ok(v.clone()),
                _ => Err(CoreError::RecordValueTypeError("Array1".to_string())),
            }
        } else {
            Err(CoreError::RecordKeyError(k.to_string()))
        }
    }

    /// Gets a string value from the record.
    ///
    /// Returns an error if the key does not exist or the value is not a string.
    pub fn get_string(&self, k: &str) -> Result<String, CoreError> {
        if let Some(v) = self.0.get(k) {
            match v {
                RecordValue::String(s) => Ok(s.clone()),
                _ => Err(CoreError::RecordValueTypeError("String".to_string())),
            }
        } else {
            Err(CoreError::RecordKeyError(k.to_string()))
        }
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordValue};

    #[test]
    fn merge_overwrites_with_second() {
        let r1 = Record::from_slice(&[
            ("a", RecordValue::Scalar(1.0)),
            ("b", RecordValue::Scalar(2.0)),
        ]);
        let r2 = Record::from_scalar("b", 3.0);
        let merged = r1.merge(r2);
        assert_eq!(merged.get_scalar("a").unwrap(), 1.0);
        assert_eq!(merged.get_scalar("b").unwrap(), 3.0);
    }

    #[test]
    fn typed_getters_reject_wrong_types() {
        let r = Record::from_slice(&[("xs", RecordValue::Array1(vec![1.0, 2.0]))]);
        assert!(r.get_scalar("xs").is_err());
        assert!(r.get_scalar("missing").is_err());
        assert_eq!(r.get_array1("xs").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn merge_inplace_keeps_both_entries() {
        let mut r = Record::empty();
        assert!(r.is_empty());
        r.insert("tag", RecordValue::String("reset".to_string()));
        r.merge_inplace(Record::from_scalar("reward", 0.5));
        assert_eq!(r.get_string("tag").unwrap(), "reset");
        assert_eq!(r.get_scalar("reward").unwrap(), 0.5);
        assert_eq!(r.keys().count(), 2);
    }
}
