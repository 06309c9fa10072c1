/*!
 * Chunking a document into translation units.
 *
 * Consecutive prose segments are packed into units of at most `chunk_size`
 * characters. Boundaries always fall on segment (paragraph) boundaries; a
 * single paragraph longer than `chunk_size` becomes one oversized unit
 * rather than being split mid-paragraph or truncated. The resulting plan
 * interleaves the units with the protected content so that reassembly is a
 * single ordered walk.
 */

use crate::document::{Document, SegmentKind};
use crate::errors::PipelineError;

/// One chunk of source text submitted to the translation API as a single
/// request. Immutable once created.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    /// Position of the unit in the document, 0-based and contiguous
    pub index: usize,
    /// Exact source text of the unit
    pub source_text: String,
    /// Language the unit is translated into
    pub target_language: String,
}

/// One position in the output document.
#[derive(Debug, Clone)]
pub enum Slot {
    /// Protected content emitted verbatim
    Fixed(String),
    /// The translation of the unit with this index goes here
    Unit(usize),
}

/// The chunking result: units to translate plus the layout that maps them
/// back to their positions between the protected content.
#[derive(Debug, Clone)]
pub struct ChunkPlan {
    /// Units in index order
    pub units: Vec<TranslationUnit>,
    /// Interleaved fixed content and unit positions, in document order
    pub layout: Vec<Slot>,
}

impl ChunkPlan {
    /// Reconstruct the source text from the plan (fixed slots plus unit
    /// source texts). Used to verify the exact-coverage invariant.
    pub fn reconstruct_source(&self) -> String {
        let mut out = String::new();
        for slot in &self.layout {
            match slot {
                Slot::Fixed(text) => out.push_str(text),
                Slot::Unit(index) => out.push_str(&self.units[*index].source_text),
            }
        }
        out
    }
}

/// Splits a parsed document into translation units.
pub struct Chunker {
    chunk_size: usize,
}

impl Chunker {
    /// Create a chunker with the given maximum unit size in characters.
    pub fn new(chunk_size: usize) -> Result<Self, PipelineError> {
        if chunk_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "chunk_size must be positive".to_string(),
            ));
        }
        Ok(Self { chunk_size })
    }

    /// Build the chunk plan for a document.
    ///
    /// Fails with `InvalidInput` if the document has no translatable
    /// content after normalization.
    pub fn chunk(
        &self,
        document: &Document,
        target_language: &str,
    ) -> Result<ChunkPlan, PipelineError> {
        if document.translatable_count() == 0 {
            return Err(PipelineError::InvalidInput(
                "document contains no translatable text".to_string(),
            ));
        }

        let mut units: Vec<TranslationUnit> = Vec::new();
        let mut layout: Vec<Slot> = Vec::new();
        let mut current = String::new();

        let flush = |current: &mut String, units: &mut Vec<TranslationUnit>, layout: &mut Vec<Slot>| {
            if current.is_empty() {
                return;
            }
            let index = units.len();
            units.push(TranslationUnit {
                index,
                source_text: std::mem::take(current),
                target_language: target_language.to_string(),
            });
            layout.push(Slot::Unit(index));
        };

        for segment in &document.segments {
            match segment.kind {
                SegmentKind::Protected => {
                    flush(&mut current, &mut units, &mut layout);
                    // Merge adjacent protected content into one slot
                    if let Some(Slot::Fixed(prev)) = layout.last_mut() {
                        prev.push_str(&segment.text);
                    } else {
                        layout.push(Slot::Fixed(segment.text.clone()));
                    }
                }
                SegmentKind::Prose => {
                    let len = segment.text.chars().count();
                    if len > self.chunk_size {
                        // Indivisible oversized paragraph: own unit, never truncated
                        flush(&mut current, &mut units, &mut layout);
                        current.push_str(&segment.text);
                        flush(&mut current, &mut units, &mut layout);
                        continue;
                    }
                    if !current.is_empty() && current.chars().count() + len > self.chunk_size {
                        flush(&mut current, &mut units, &mut layout);
                    }
                    current.push_str(&segment.text);
                }
            }
        }
        flush(&mut current, &mut units, &mut layout);

        Ok(ChunkPlan { units, layout })
    }
}
