//! External collaborators for the numseq engine: IDX corpus loading,
//! corpus fingerprinting and the on-disk label-group cache.
//!
//! Nothing here is required by the assembly engine itself; the engine only
//! sees the [`numseq_core::Corpus`] and [`numseq_core::GroupStore`]
//! contracts. Network acquisition of corpus files is deliberately not
//! handled; the reader expects already-downloaded, already-decompressed
//! ubyte files.

pub mod idx;
pub mod store;

pub use idx::{load_corpus, read_images, read_labels};
pub use store::{corpus_fingerprint, JsonGroupStore, MemoryGroupStore};
