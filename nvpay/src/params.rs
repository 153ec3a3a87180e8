//! Ordered request parameter sets.
//!
//! A [`ParameterSet`] is an ordered multimap from field name to value. Keys
//! only repeat when the caller pushes them twice; indexed list fields such as
//! `L_PAYMENTREQUEST_0_NAME0` carry their position in the name instead.
//!
//! Sets are built once per call. Credentials are never added in place:
//! [`ParameterSet::with_credentials`] returns a new set, so the same request
//! can be submitted again without duplicating `USER`/`PWD`/`SIGNATURE`.

use std::fmt;

use url::form_urlencoded;

use crate::constants::field;
use crate::credentials::Credentials;

/// An ordered multimap of NVP request fields.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    fields: Vec<(String, String)>,
}

impl ParameterSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a field and returns the set.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends an indexed list field (`{prefix}{index}`) and returns the set.
    #[must_use]
    pub fn with_indexed(self, prefix: &str, index: usize, value: impl Into<String>) -> Self {
        self.with(format!("{prefix}{index}"), value)
    }

    /// Appends a field.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the `METHOD` field, if set.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.get(field::METHOD)
    }

    /// Number of fields, counting repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy of this set with the credential and version fields
    /// appended.
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn with_credentials(&self, credentials: &Credentials, version: &str) -> Self {
        self.clone()
            .with(field::USER, credentials.username())
            .with(field::PWD, credentials.password())
            .with(field::SIGNATURE, credentials.signature())
            .with(field::VERSION, version)
    }

    /// Encodes the set as an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl fmt::Debug for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.iter() {
            if key == field::PWD || key == field::SIGNATURE {
                map.entry(&key, &"<redacted>");
            } else {
                map.entry(&key, &value);
            }
        }
        map.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ParameterSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}
