use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Server startup configuration.
///
/// Loaded from a YAML file of the form:
///
/// ```yaml
/// listen_addr: "127.0.0.1:8080"
/// doc_root: "./www"
/// mime_types: "./mime.types"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    pub doc_root: PathBuf,
    pub mime_types: PathBuf,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

impl Config {
    /// Reads and parses the config file, then applies the `LISTEN` override.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let mut cfg = Self::from_yaml_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.listen_addr = listen_addr;
        }

        Ok(cfg)
    }

    pub fn from_yaml_str(s: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Checks that the document root and MIME table actually exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.trim().is_empty() {
            anyhow::bail!("listen_addr must not be empty");
        }

        let meta = std::fs::metadata(&self.doc_root)
            .with_context(|| format!("doc_root {} is not accessible", self.doc_root.display()))?;
        if !meta.is_dir() {
            anyhow::bail!("doc_root {} is not a directory", self.doc_root.display());
        }

        let meta = std::fs::metadata(&self.mime_types).with_context(|| {
            format!("mime_types {} is not accessible", self.mime_types.display())
        })?;
        if !meta.is_file() {
            anyhow::bail!("mime_types {} is not a regular file", self.mime_types.display());
        }

        Ok(())
    }
}
