use crate::index::Index;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// On-disk schema version; bump on any layout change.
pub const FORMAT_VERSION: u32 = 1;

/// Versioned container for the four index structures. They are written and
/// read as one unit; there is no partial load.
#[derive(Serialize, Deserialize)]
struct Container<T> {
    version: u32,
    index: T,
}

/// Human-readable sidecar written next to the index for inspection. Loading
/// never reads it.
#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: usize,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn index(&self) -> PathBuf {
        self.root.join("index.bin")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

pub fn save_index(paths: &IndexPaths, index: &Index) -> Result<()> {
    create_dir_all(&paths.root)?;
    let bytes = bincode::serialize(&Container { version: FORMAT_VERSION, index })?;
    let mut f = File::create(paths.index())?;
    f.write_all(&bytes)?;
    tracing::debug!(
        num_docs = index.num_docs(),
        num_terms = index.dictionary.len(),
        path = %paths.index().display(),
        "index saved"
    );
    Ok(())
}

/// Reconstruct the index from disk. Fails on a missing file, a decode
/// error, an unknown format version, or any structural invariant violation;
/// a query session has no fallback index.
pub fn load_index(paths: &IndexPaths) -> Result<Index> {
    let path = paths.index();
    let mut buf = Vec::new();
    File::open(&path)
        .with_context(|| format!("no index at {}", path.display()))?
        .read_to_end(&mut buf)?;
    let container: Container<Index> = bincode::deserialize(&buf)
        .with_context(|| format!("corrupt index at {}", path.display()))?;
    if container.version != FORMAT_VERSION {
        bail!(
            "unsupported index format version {} (expected {FORMAT_VERSION})",
            container.version
        );
    }
    let index = container.index;
    index
        .validate()
        .context("loaded index violates structural invariants")?;
    tracing::debug!(
        num_docs = index.num_docs(),
        num_terms = index.dictionary.len(),
        "index loaded"
    );
    Ok(index)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let json = serde_json::to_string_pretty(meta)?;
    let mut f = File::create(paths.meta())?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut buf = String::new();
    File::open(paths.meta())?.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rejects_unknown_format_versions() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        create_dir_all(&paths.root).unwrap();
        let bytes = bincode::serialize(&Container {
            version: FORMAT_VERSION + 1,
            index: Index::new(),
        })
        .unwrap();
        std::fs::write(paths.index(), bytes).unwrap();
        let err = load_index(&paths).unwrap_err();
        assert!(err.to_string().contains("version"));
    }
}
