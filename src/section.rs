use std::collections::BTreeMap;

use crate::parser;
use crate::value::{FromIni, Lookup, ToIni};

/// A named group of key/value pairs, or of raw lines for sections holding line-oriented data
/// such as patch codes.
///
/// Keys and section names compare case-insensitively. The spelling used when a key is first
/// set is the one written back out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    name: String,
    /// Folded keys in the order they were first set.
    keys_order: Vec<String>,
    entries: BTreeMap<String, Entry>,
    lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    value: String,
}

pub(crate) fn fold(name: &str) -> String {
    name.to_lowercase()
}

impl Section {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn is_named(&self, name: &str) -> bool {
        self.name == name || fold(&self.name) == fold(name)
    }

    /// Returns `true` if the section holds neither key/value pairs nor raw lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.lines.is_empty()
    }

    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(&fold(key))
    }

    /// Remove `key`, returning whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let folded = fold(key);

        if self.entries.remove(&folded).is_none() {
            return false;
        }

        self.keys_order.retain(|k| *k != folded);
        true
    }

    /// Insert or overwrite `key`.
    pub fn set<V: ToIni>(&mut self, key: &str, value: V) {
        let folded = fold(key);
        let value = value.to_ini();

        if let Some(entry) = self.entries.get_mut(&folded) {
            entry.value = value;
            return;
        }

        self.keys_order.push(folded.clone());
        self.entries.insert(
            folded,
            Entry {
                key: key.to_owned(),
                value,
            },
        );
    }

    /// Like [`Section::set`], but removes the key instead when `value` equals `default`,
    /// so default settings stay out of saved files.
    pub fn set_or_delete<V: ToIni + PartialEq>(&mut self, key: &str, value: V, default: V) {
        if value == default {
            self.delete(key);
        } else {
            self.set(key, value);
        }
    }

    /// The stored text for `key`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(&fold(key)).map(|entry| entry.value.as_str())
    }

    /// The value for `key` parsed as `T`; `None` if it is missing or does not parse.
    #[must_use]
    pub fn get<T: FromIni>(&self, key: &str) -> Option<T> {
        let text = self.get_str(key)?;

        match T::from_ini(text) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::trace!(section = %self.name, key, %error, "stored value did not parse");
                None
            }
        }
    }

    #[must_use]
    pub fn get_or<T: FromIni>(&self, key: &str, default: T) -> Lookup<T> {
        match self.get(key) {
            Some(value) => Lookup::Found(value),
            None => Lookup::Defaulted(default),
        }
    }

    /// Keys in the order they were first set.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    /// Key/value pairs in the order the keys were first set.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys_order
            .iter()
            .filter_map(|folded| self.entries.get(folded))
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
    }

    /// Replace the raw line payload. An empty payload switches the section back to key/value
    /// mode.
    pub fn set_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
    }

    pub(crate) fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// The raw lines, or `None` if the section is not in line mode.
    ///
    /// With `remove_comments`, lines starting with `#` or `;` are left out.
    #[must_use]
    pub fn get_lines(&self, remove_comments: bool) -> Option<Vec<&str>> {
        if self.lines.is_empty() {
            return None;
        }

        Some(
            self.lines
                .iter()
                .map(String::as_str)
                .filter(|line| !(remove_comments && parser::is_comment(line)))
                .collect(),
        )
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn has_lines(&self) -> bool {
        !self.lines.is_empty()
    }
}
