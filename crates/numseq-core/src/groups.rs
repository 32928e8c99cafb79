//! Label to corpus-index grouping and its cache contract.

use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, Digit, LABEL_CARDINALITY};
use crate::errors::{ErrorInfo, SeqError};

/// Mapping from each digit label to the corpus indices carrying that label.
///
/// The representation is a fixed array of index vectors rather than a map:
/// labels span the bounded domain 0-9, so lookups are a single slot access
/// with predictable cost. Built once per corpus and immutable afterwards.
///
/// The serialized form is the plain nested list `[[..], .., [..]]` (ten inner
/// lists, label order), so cache blobs stay language-neutral and inspectable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelGroups {
    groups: [Vec<usize>; LABEL_CARDINALITY],
}

impl LabelGroups {
    /// Builds the grouping with a single pass over the corpus.
    pub fn build(corpus: &Corpus) -> Self {
        let mut groups: [Vec<usize>; LABEL_CARDINALITY] = Default::default();
        for (index, &label) in corpus.labels().iter().enumerate() {
            groups[usize::from(label)].push(index);
        }
        Self { groups }
    }

    /// Returns the corpus indices for `digit`.
    ///
    /// Fails with [`SeqError::UnknownLabel`] when the corpus contains no
    /// example of the requested digit.
    pub fn lookup(&self, digit: Digit) -> Result<&[usize], SeqError> {
        let group = &self.groups[usize::from(digit.as_u8())];
        if group.is_empty() {
            return Err(SeqError::UnknownLabel(
                ErrorInfo::new("label-missing", "the corpus contains no example of this digit")
                    .with_context("digit", digit.to_string())
                    .with_hint("use a corpus that covers every requested digit"),
            ));
        }
        Ok(group)
    }

    /// Number of corpus indices recorded for `digit` (zero when absent).
    pub fn group_len(&self, digit: Digit) -> usize {
        self.groups[usize::from(digit.as_u8())].len()
    }

    /// Total number of indices across all groups.
    ///
    /// Equals the corpus length when the grouping was built from it.
    pub fn total_len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

/// Cache collaborator for built label groupings, keyed by corpus fingerprint.
///
/// Implementations persist the grouping in its plain nested-list form.
/// Concurrent writers, if any, must serialize access on their side; the
/// engine itself is single-threaded and never mutates a stored grouping.
pub trait GroupStore {
    /// Fetches the grouping cached under `fingerprint`, if present.
    fn get(&self, fingerprint: &str) -> Result<Option<LabelGroups>, SeqError>;
    /// Stores `groups` under `fingerprint`, replacing any previous entry.
    fn put(&self, fingerprint: &str, groups: &LabelGroups) -> Result<(), SeqError>;
}

/// Fetches the grouping from `store`, rebuilding and re-caching on a miss.
///
/// An entry the store cannot decode counts as a miss: the grouping is rebuilt
/// from the corpus and written back, overwriting the damaged blob.
pub fn load_or_build(
    store: &dyn GroupStore,
    fingerprint: &str,
    corpus: &Corpus,
) -> Result<LabelGroups, SeqError> {
    if let Ok(Some(groups)) = store.get(fingerprint) {
        return Ok(groups);
    }
    let groups = LabelGroups::build(corpus);
    store.put(fingerprint, &groups)?;
    Ok(groups)
}
