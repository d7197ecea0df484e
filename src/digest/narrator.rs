//! Per-comparison narration.

use std::fmt::Write;

use tracing::debug;

use crate::error::ModelError;
use crate::github::FileChange;
use crate::llm::TextModel;

use super::prompt::NARRATION_INSTRUCTION;

/// Default number of files narrated per comparison.
pub const DEFAULT_MAX_FILES_PER_DIFF: usize = 10;

/// Build the model input for one comparison.
///
/// Only the first `max_files` entries are considered, in the order GitHub
/// returned them. Files without a patch are skipped but keep their index.
pub fn build_narration_input(files: &[FileChange], max_files: usize) -> String {
    let mut content = String::new();

    for (idx, file) in files.iter().take(max_files).enumerate() {
        if let Some(patch) = &file.patch {
            let _ = writeln!(
                content,
                "id: {idx},filename: {} & changed content: {patch}",
                file.filename
            );
        }
    }

    content
}

/// Ask the model for punchy per-change lines about one comparison.
///
/// Returns an empty fragment without calling the model when no considered
/// file carries a patch.
pub async fn narrate(
    model: &dyn TextModel,
    files: &[FileChange],
    max_files: usize,
) -> Result<String, ModelError> {
    let content = build_narration_input(files, max_files);

    if content.is_empty() {
        debug!(files = files.len(), "No textual patches to narrate");
        return Ok(String::new());
    }

    model.complete(NARRATION_INSTRUCTION, &content).await
}
