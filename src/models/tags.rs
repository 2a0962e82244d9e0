//! Ordered, duplicate-free tag lists (goals, conditions, allergies).
//!
//! Membership is case-sensitive. Values are trimmed before they are
//! compared or stored; blank values never enter the list.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagList {
    values: Vec<String>,
}

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from raw values, dropping blanks and repeats.
    /// Returns the list and how many raw values were dropped.
    pub fn sanitized<I, S>(raw: I) -> (Self, usize)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        let mut dropped = 0;
        for value in raw {
            if !list.add(value.as_ref()) {
                dropped += 1;
            }
        }
        (list, dropped)
    }

    /// Trimmed form of `value`, or `None` when it is blank.
    pub fn normalize(value: &str) -> Option<&str> {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Append `value`. No-op (returns `false`) for blank or present values.
    ///
    /// The stored value is trimmed: `add(" Fitness ")` stores `"Fitness"`.
    pub fn add(&mut self, value: &str) -> bool {
        match Self::normalize(value) {
            Some(v) if !self.contains(v) => {
                self.values.push(v.to_string());
                true
            }
            _ => false,
        }
    }

    /// Remove `value` if present. Idempotent.
    pub fn remove(&mut self, value: &str) -> bool {
        let Some(v) = Self::normalize(value) else {
            return false;
        };
        let before = self.values.len();
        self.values.retain(|existing| existing != v);
        self.values.len() != before
    }

    /// Remove `value` when present, add it otherwise.
    /// Returns whether the value is in the list afterwards.
    pub fn toggle(&mut self, value: &str) -> bool {
        match Self::normalize(value) {
            Some(v) if self.contains(v) => {
                self.remove(v);
                false
            }
            Some(v) => self.add(v),
            None => false,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|existing| existing == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<String>> for TagList {
    fn from(raw: Vec<String>) -> Self {
        Self::sanitized(raw).0
    }
}

impl From<TagList> for Vec<String> {
    fn from(list: TagList) -> Self {
        list.values
    }
}

impl<'a> FromIterator<&'a str> for TagList {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self::sanitized(iter).0
    }
}
