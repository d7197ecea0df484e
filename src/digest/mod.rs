//! The commit-diff-to-narrative pipeline.

pub mod composer;
pub mod narrator;
pub mod pairs;
pub mod pipeline;
pub mod prompt;

pub use composer::compose;
pub use narrator::{DEFAULT_MAX_FILES_PER_DIFF, build_narration_input, narrate};
pub use pairs::{DEFAULT_MAX_COMMITS, DiffPair, extract_pairs};
pub use pipeline::{DigestPipeline, DigestRequest};
pub use prompt::DEFAULT_CHARACTER_BUDGET;
