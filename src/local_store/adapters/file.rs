//! Directory-backed key-value store: one file per key.

use crate::local_store::ports::{KeyValueError, KeyValueResult, KeyValueStore};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;

/// Key-value store keeping each entry in its own file inside one directory.
///
/// Access is confined to the directory through a capability handle. Any
/// non-empty key is accepted: it is percent-encoded into a single file name,
/// with a leading `.` escaped, so no key can name a path outside the
/// directory or a hidden file.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: Dir,
}

impl FileKeyValueStore {
    /// Opens the store rooted at `path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError::Persistence`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path) -> KeyValueResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(KeyValueError::persistence)?;
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(KeyValueError::persistence)?;
        Ok(Self { dir })
    }
}

/// Maps `key` to the file name holding its value.
///
/// The encoding is injective: `%` itself is escaped, so the `%2E` standing
/// in for a leading dot never collides with another key.
fn file_name(key: &str) -> KeyValueResult<String> {
    if key.is_empty() {
        return Err(KeyValueError::InvalidKey(key.to_owned()));
    }
    let encoded: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
    Ok(match encoded.strip_prefix('.') {
        Some(rest) => format!("%2E{rest}"),
        None => encoded,
    })
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> KeyValueResult<Option<String>> {
        match self.dir.read_to_string(file_name(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueError::persistence(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> KeyValueResult<()> {
        self.dir
            .write(file_name(key)?, value)
            .map_err(KeyValueError::persistence)
    }

    fn remove(&self, key: &str) -> KeyValueResult<()> {
        match self.dir.remove_file(file_name(key)?) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(KeyValueError::persistence(err)),
            _ => Ok(()),
        }
    }
}
