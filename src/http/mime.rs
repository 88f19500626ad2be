//! File extension to content type lookup.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

/// Content type served for extensions missing from the table.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Extension → content-type table.
///
/// Built once at startup and only read afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct MimeRegistry {
    types: HashMap<String, String>,
}

impl MimeRegistry {
    /// Loads a table file of `<extension> <mimetype>` lines.
    ///
    /// A missing or unreadable file is an error: the server must not start
    /// without a registry.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read MIME table {}", path.display()))?;

        let registry = Self::parse(&contents);
        tracing::info!(
            path = %path.display(),
            entries = registry.len(),
            "Loaded MIME table"
        );
        Ok(registry)
    }

    /// Parses table text. Blank lines are skipped and only the first two
    /// whitespace separated tokens of a line are used.
    pub fn parse(contents: &str) -> Self {
        let mut types = HashMap::new();

        for (lineno, line) in contents.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            let Some(ext) = tokens.next() else {
                continue;
            };

            match tokens.next() {
                Some(mime) => {
                    types.insert(ext.to_string(), mime.to_string());
                }
                None => {
                    tracing::warn!(line = lineno + 1, ext, "MIME table entry has no type, skipping");
                }
            }
        }

        Self { types }
    }

    /// Returns the content type for `ext` (including the leading dot, e.g. `.html`).
    pub fn lookup(&self, ext: &str) -> &str {
        self.types
            .get(ext)
            .map(|v| v.as_str())
            .unwrap_or(DEFAULT_MIME_TYPE)
    }

    /// Content type for a path, keyed by everything from the last `.` of its
    /// file name. A dotfile such as `.bashrc` is its own extension.
    pub fn lookup_path(&self, path: &Path) -> &str {
        let ext = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.rfind('.').map(|i| &name[i..]));

        match ext {
            Some(ext) => self.lookup(ext),
            None => DEFAULT_MIME_TYPE,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
