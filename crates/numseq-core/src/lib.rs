#![deny(missing_docs)]
#![doc = "Core types and contracts for the numseq digit-sequence synthesizer."]

pub mod corpus;
pub mod errors;
pub mod groups;
pub mod rng;

pub use corpus::{Corpus, Digit, LABEL_CARDINALITY};
pub use errors::{ErrorInfo, SeqError};
pub use groups::{load_or_build, GroupStore, LabelGroups};
pub use rng::{derive_substream_seed, RngHandle};
