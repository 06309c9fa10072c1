/*!
 * Deterministic reassembly of translated units.
 *
 * Reassembly is all-or-nothing: every unit index 0..N-1 must have a result
 * or the whole operation is rejected, so a partially translated document is
 * never emitted. Protected content is copied verbatim from the chunk plan.
 */

use std::collections::HashMap;

use crate::errors::PipelineError;
use crate::pipeline::chunker::{ChunkPlan, Slot};
use crate::translation::client::TranslationResult;

/// Recombines translated units into the output document.
pub struct Reassembler;

impl Reassembler {
    /// Produce the translated document text.
    ///
    /// Fails with `IncompleteTranslation { missing }` if any unit of the
    /// plan lacks a result.
    pub fn reassemble(
        plan: &ChunkPlan,
        results: &[TranslationResult],
    ) -> Result<String, PipelineError> {
        let by_index: HashMap<usize, &TranslationResult> =
            results.iter().map(|r| (r.index, r)).collect();

        let missing: Vec<usize> = (0..plan.units.len())
            .filter(|index| !by_index.contains_key(index))
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::IncompleteTranslation { missing });
        }

        let mut output = String::new();
        for slot in &plan.layout {
            match slot {
                Slot::Fixed(text) => output.push_str(text),
                Slot::Unit(index) => output.push_str(&by_index[index].translated_text),
            }
        }

        Ok(output)
    }
}
