#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod error;
mod io;
mod parser;
mod section;
mod value;

use std::fmt;
use std::path::Path;

pub use error::{IniError, ValueError};
pub use io::{FsStorage, Storage};
pub use parser::{Line, classify, is_comment, parse_line};
pub use section::Section;
pub use value::{FromIni, Lookup, ToIni};

/// UTF-8 encoding of the Byte Order Mark some editors put at the start of a file.
const BOM: char = '\u{FEFF}';

/// An INI document: sections in the order they were first seen or created.
///
/// Section names are unique under case-insensitive comparison. Reads never create sections;
/// writes create them on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniFile {
    sections: Vec<Section>,
}

impl IniFile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` from the file system. See [`IniFile::load_with`].
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        keep_current_data: bool,
    ) -> Result<(), IniError> {
        self.load_with(&FsStorage, path, keep_current_data)
    }

    /// Read `path` through `storage` and parse it into this document.
    ///
    /// With `keep_current_data`, the file is layered over what is already loaded: keys it
    /// names overwrite existing ones and everything else is kept. Otherwise the document is
    /// replaced. On a read failure the document is left untouched.
    pub fn load_with<S>(
        &mut self,
        storage: &S,
        path: impl AsRef<Path>,
        keep_current_data: bool,
    ) -> Result<(), IniError>
    where
        S: Storage + ?Sized,
    {
        let path = path.as_ref();
        let text = storage.read_to_string(path).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "failed to read ini file");
            IniError::ReadFailure {
                path: path.to_owned(),
                source,
            }
        })?;

        self.load_str(&text, keep_current_data);
        tracing::debug!(
            path = %path.display(),
            sections = self.sections.len(),
            keep_current_data,
            "loaded ini file"
        );

        Ok(())
    }

    /// Parse `text` into this document, with the same layering rules as
    /// [`IniFile::load_with`].
    ///
    /// Lines before the first section header are ignored. A line without `=` that starts with
    /// `$`, `+` or `*` switches its section to line mode: it is kept as a raw line, along with
    /// any comments right above it and every later line of the section that has no `=`.
    /// Assignments are always stored as key/value pairs.
    pub fn load_str(&mut self, text: &str, keep_current_data: bool) {
        if !keep_current_data {
            self.sections.clear();
        }

        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut current = None::<usize>;
        let mut line_mode = false;
        // Comments and blanks seen before the section's first significant line.
        let mut pending = Vec::<&str>::new();

        for line in text.lines() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let kind = classify(line);

            if let Line::Header(name) = kind {
                current = Some(self.section_index_or_insert(name));
                line_mode = false;
                pending.clear();
                continue;
            }

            let Some(index) = current else {
                tracing::trace!(line, "ignoring line outside of any section");
                continue;
            };
            let section = &mut self.sections[index];
            let is_assignment = matches!(kind, Line::Assignment { .. }) && line.contains('=');

            if line_mode && !is_assignment {
                section.push_line(line);
                continue;
            }

            match kind {
                Line::Blank | Line::Comment => pending.push(line),
                Line::Assignment { .. } if parser::is_code_line(line) && !is_assignment => {
                    for comment in pending.drain(..) {
                        section.push_line(comment);
                    }
                    section.push_line(line);
                    line_mode = true;
                }
                Line::Assignment { key, value } => {
                    if key.starts_with('[') {
                        tracing::trace!(line, "unterminated section header read as a key");
                    }
                    pending.clear();
                    section.set(key, value);
                }
                Line::Header(..) => {}
            }
        }
    }

    /// Write the document to `path` on the file system. See [`IniFile::save_with`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), IniError> {
        self.save_with(&FsStorage, path)
    }

    /// Serialize the document and hand it to `storage` in a single write.
    pub fn save_with<S>(&self, storage: &S, path: impl AsRef<Path>) -> Result<(), IniError>
    where
        S: Storage + ?Sized,
    {
        let path = path.as_ref();
        let text = self.to_string();

        storage.write_string(path, &text).map_err(|source| {
            tracing::warn!(path = %path.display(), error = %source, "failed to write ini file");
            IniError::WriteFailure {
                path: path.to_owned(),
                source,
            }
        })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "saved ini file");
        Ok(())
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.is_named(name))
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|section| section.is_named(name))
    }

    /// The section called `name`, appended empty if there is none yet.
    pub fn get_or_create_section(&mut self, name: &str) -> &mut Section {
        let index = self.section_index_or_insert(name);
        &mut self.sections[index]
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        if let Some(index) = self.sections.iter().position(|s| s.is_named(name)) {
            index
        } else {
            self.sections.push(Section::new(name));
            self.sections.len() - 1
        }
    }

    #[must_use]
    pub fn exists(&self, section: &str, key: &str) -> bool {
        self.section(section).is_some_and(|s| s.exists(key))
    }

    pub fn set<V: ToIni>(&mut self, section: &str, key: &str, value: V) {
        self.get_or_create_section(section).set(key, value);
    }

    pub fn set_or_delete<V>(&mut self, section: &str, key: &str, value: V, default: V)
    where
        V: ToIni + PartialEq,
    {
        self.get_or_create_section(section).set_or_delete(key, value, default);
    }

    #[must_use]
    pub fn get_str(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get_str(key)
    }

    #[must_use]
    pub fn get<T: FromIni>(&self, section: &str, key: &str) -> Option<T> {
        self.section(section)?.get(key)
    }

    /// Typed read that falls back to `default` when the section or key is missing or the
    /// stored text does not parse.
    #[must_use]
    pub fn get_or<T: FromIni>(&self, section: &str, key: &str, default: T) -> Lookup<T> {
        match self.section(section) {
            Some(s) => s.get_or(key, default),
            None => Lookup::Defaulted(default),
        }
    }

    /// Keys of `section` in order, or `None` if there is no such section.
    #[must_use]
    pub fn get_keys(&self, section: &str) -> Option<Vec<&str>> {
        Some(self.section(section)?.keys().collect())
    }

    pub fn set_lines<I, S>(&mut self, section: &str, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.get_or_create_section(section).set_lines(lines);
    }

    #[must_use]
    pub fn get_lines(&self, section: &str, remove_comments: bool) -> Option<Vec<&str>> {
        self.section(section)?.get_lines(remove_comments)
    }

    pub fn delete_key(&mut self, section: &str, key: &str) -> bool {
        self.section_mut(section).is_some_and(|s| s.delete(key))
    }

    pub fn delete_section(&mut self, name: &str) -> bool {
        let Some(index) = self.sections.iter().position(|s| s.is_named(name)) else {
            return false;
        };

        self.sections.remove(index);
        true
    }

    /// Order sections by case-insensitive name.
    pub fn sort_sections(&mut self) {
        self.sections.sort_by_cached_key(|s| section::fold(s.name()));
    }
}

/// The saved form of the document. Empty sections are left out; a section holding both
/// key/value pairs and raw lines writes the pairs first.
impl fmt::Display for IniFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in self.sections.iter().filter(|s| !s.is_empty()) {
            writeln!(f, "[{}]", section.name())?;

            for (key, value) in section.iter() {
                if value.is_empty() {
                    writeln!(f, "{key} =")?;
                } else {
                    writeln!(f, "{key} = {}", parser::quote_if_needed(value))?;
                }
            }

            for line in section.lines() {
                writeln!(f, "{line}")?;
            }
        }

        Ok(())
    }
}
