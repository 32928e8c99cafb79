//! Corpus fingerprinting and label-group cache stores.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use numseq_core::{Corpus, ErrorInfo, GroupStore, LabelGroups, SeqError};
use sha2::{Digest, Sha256};

/// Computes the cache key identifying a corpus.
///
/// The fingerprint hashes the label vector (length-prefixed) with SHA-256.
/// Grouping depends only on the labels and their order, so two corpora with
/// identical label vectors share one cached grouping.
pub fn corpus_fingerprint(corpus: &Corpus) -> String {
    let mut hasher = Sha256::new();
    hasher.update((corpus.len() as u64).to_be_bytes());
    hasher.update(corpus.labels());
    hex::encode(hasher.finalize())
}

/// Directory-backed [`GroupStore`] keeping one JSON blob per fingerprint.
///
/// Entries are the plain nested-list serialization of [`LabelGroups`], so a
/// cached grouping can be inspected or produced by other tooling.
#[derive(Debug, Clone)]
pub struct JsonGroupStore {
    root: PathBuf,
}

impl JsonGroupStore {
    /// Creates a store rooted at `root`; the directory is created on first
    /// write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entry_path(&self, fingerprint: &str) -> PathBuf {
        self.root.join(format!("groups_{fingerprint}.json"))
    }

    fn store_error(path: &Path, code: &str, err: impl ToString) -> SeqError {
        SeqError::Store(
            ErrorInfo::new(code, "label-group cache store operation failed")
                .with_context("path", path.display().to_string())
                .with_context("source", err.to_string()),
        )
    }
}

impl GroupStore for JsonGroupStore {
    fn get(&self, fingerprint: &str) -> Result<Option<LabelGroups>, SeqError> {
        let path = self.entry_path(fingerprint);
        if !path.is_file() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .map_err(|err| Self::store_error(&path, "cache-read", err))?;
        let groups: LabelGroups = serde_json::from_str(&raw)
            .map_err(|err| Self::store_error(&path, "cache-decode", err))?;
        Ok(Some(groups))
    }

    fn put(&self, fingerprint: &str, groups: &LabelGroups) -> Result<(), SeqError> {
        let path = self.entry_path(fingerprint);
        fs::create_dir_all(&self.root)
            .map_err(|err| Self::store_error(&self.root, "cache-mkdir", err))?;
        let raw = serde_json::to_string(groups)
            .map_err(|err| Self::store_error(&path, "cache-encode", err))?;
        fs::write(&path, raw).map_err(|err| Self::store_error(&path, "cache-write", err))
    }
}

/// In-memory [`GroupStore`] used by tests and short-lived pipelines.
#[derive(Debug, Default)]
pub struct MemoryGroupStore {
    entries: RefCell<BTreeMap<String, LabelGroups>>,
}

impl MemoryGroupStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached groupings.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl GroupStore for MemoryGroupStore {
    fn get(&self, fingerprint: &str) -> Result<Option<LabelGroups>, SeqError> {
        Ok(self.entries.borrow().get(fingerprint).cloned())
    }

    fn put(&self, fingerprint: &str, groups: &LabelGroups) -> Result<(), SeqError> {
        self.entries
            .borrow_mut()
            .insert(fingerprint.to_string(), groups.clone());
        Ok(())
    }
}
