//! Maps request URLs onto files under the document root.
//!
//! Paths are cleaned lexically before any file-system access, so a URL may
//! wander through `..` segments as long as it ends up inside the root.
//! Directories resolve to their `index.html`.

use std::io;
use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;
use thiserror::Error;
use tokio::fs;

/// File served when a URL names a directory.
pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{0} lies outside the document root")]
    OutsideRoot(PathBuf),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} is neither a regular file nor a directory")]
    NotAFile(PathBuf),
}

/// A file found under the document root.
#[derive(Debug)]
pub struct Resolved {
    /// Path of the file actually read (after any index fallback)
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Resolves `url` against `doc_root` and reads the file it names.
pub async fn resolve(doc_root: &Path, url: &str) -> Result<Resolved, ResolveError> {
    let mut path = candidate_path(doc_root, url)?;

    // Each pass appends `index.html`, so the path only ever gets deeper.
    loop {
        let meta = fs::symlink_metadata(&path)
            .await
            .map_err(|source| ResolveError::Io {
                path: path.clone(),
                source,
            })?;

        let file_type = meta.file_type();
        if file_type.is_file() {
            let contents = fs::read(&path).await.map_err(|source| ResolveError::Io {
                path: path.clone(),
                source,
            })?;
            return Ok(Resolved { path, contents });
        } else if file_type.is_dir() {
            path.push(INDEX_FILE);
        } else {
            return Err(ResolveError::NotAFile(path));
        }
    }
}

/// Joins the root and URL, cleans the result lexically, and rejects it if
/// it escapes the root.
///
/// `..` directly under the file-system root is dropped; leading `..` of a
/// relative path is kept and counts as escaping.
pub fn candidate_path(doc_root: &Path, url: &str) -> Result<PathBuf, ResolveError> {
    let root = doc_root.clean();
    let base = if root == Path::new(".") {
        PathBuf::new()
    } else {
        root
    };

    let candidate = base.join(url.trim_start_matches('/')).clean();

    let relative = candidate
        .strip_prefix(&base)
        .map_err(|_| ResolveError::OutsideRoot(candidate.clone()))?;
    if matches!(relative.components().next(), Some(Component::ParentDir)) {
        return Err(ResolveError::OutsideRoot(candidate));
    }

    Ok(candidate)
}
