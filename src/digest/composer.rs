//! Final status update composition.

use tracing::debug;

use crate::error::DigestError;
use crate::llm::TextModel;

use super::prompt::composition_instruction;

/// Turn the concatenated narration fragments into one short post.
///
/// The budget is only an instruction to the model. Longer output is
/// returned unchanged.
pub async fn compose(
    model: &dyn TextModel,
    fragments: &str,
    character_budget: usize,
) -> Result<String, DigestError> {
    if fragments.trim().is_empty() {
        return Err(DigestError::NothingToDescribe);
    }

    let digest = model
        .complete(&composition_instruction(character_budget), fragments)
        .await?;

    let chars = digest.chars().count();
    if chars > character_budget {
        debug!(chars, character_budget, "Digest exceeds its character budget");
    }

    Ok(digest)
}
