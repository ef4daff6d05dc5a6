use std::path::Path;
use std::{fs, io};

/// Whole-file text storage used by [`IniFile`](crate::IniFile) to load and save documents.
pub trait Storage {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Writes `text` as the complete new content of `path` in a single call.
    fn write_string(&self, path: &Path, text: &str) -> io::Result<()>;
}

/// [`Storage`] backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let data = fs::read(path)?;
        // Saved files are UTF-8; anything else is read lossily rather than rejected.
        Ok(match String::from_utf8(data) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    fn write_string(&self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)
    }
}
