//! Writing the finished index to disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{LookupError, Result};
use crate::index::InvertedIndex;

/// What was written by [`write_index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenIndex {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Serialize the index to JSON and write it to `path` in one shot.
///
/// The JSON is written to a temporary file next to `path` and then renamed
/// into place, so `path` never holds a partially written index.
pub fn write_index(index: &InvertedIndex, path: &Path, pretty: bool) -> Result<WrittenIndex> {
    let content = if pretty {
        serde_json::to_vec_pretty(index)?
    } else {
        serde_json::to_vec(index)?
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| LookupError::output(path, e))?;
    file.write_all(&content)
        .and_then(|_| file.flush())
        .map_err(|e| LookupError::output(path, e))?;
    file.persist(path)
        .map_err(|e| LookupError::output(path, e.error))?;

    debug!("wrote {} bytes to {}", content.len(), path.display());

    Ok(WrittenIndex {
        path: path.to_path_buf(),
        bytes: content.len() as u64,
    })
}
