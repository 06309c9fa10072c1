/*!
 * Tests for chunking documents into translation units
 */

use doctrans::document::Document;
use doctrans::errors::PipelineError;
use doctrans::pipeline::{Chunker, Slot};

use crate::common;

/// Test that the unit sources plus fixed slots reproduce the document
#[test]
fn test_chunk_withMixedDocument_shouldCoverSourceExactly() {
    let source = common::sample_document();
    let doc = Document::parse(source);
    let chunker = Chunker::new(50).unwrap();

    let plan = chunker.chunk(&doc, "fr").unwrap();

    assert_eq!(plan.reconstruct_source(), source);
}

/// Test that unit indices are contiguous and in document order
#[test]
fn test_chunk_withManyParagraphs_shouldNumberUnitsContiguously() {
    let source = "Alpha.\n\nBeta.\n\nGamma.\n\nDelta.\n";
    let doc = Document::parse(source);
    let chunker = Chunker::new(8).unwrap();

    let plan = chunker.chunk(&doc, "fr").unwrap();

    for (i, unit) in plan.units.iter().enumerate() {
        assert_eq!(unit.index, i);
        assert_eq!(unit.target_language, "fr");
    }
    // Small chunk size forces one paragraph per unit
    assert_eq!(plan.units.len(), 4);
}

/// Test that consecutive small paragraphs are packed into one unit
#[test]
fn test_chunk_withLargeChunkSize_shouldPackParagraphsTogether() {
    let source = "Alpha.\n\nBeta.\n\nGamma.\n";
    let doc = Document::parse(source);
    let chunker = Chunker::new(1000).unwrap();

    let plan = chunker.chunk(&doc, "fr").unwrap();

    assert_eq!(plan.units.len(), 1);
    assert_eq!(plan.units[0].source_text, source);
}

/// Test that a paragraph longer than chunk_size becomes one oversized unit
#[test]
fn test_chunk_withOversizedParagraph_shouldKeepItWhole() {
    let long_paragraph = "word ".repeat(100);
    let source = format!("Short one.\n\n{}\n\nShort two.\n", long_paragraph.trim_end());
    let doc = Document::parse(&source);
    let chunker = Chunker::new(30).unwrap();

    let plan = chunker.chunk(&doc, "de").unwrap();

    let oversized = plan
        .units
        .iter()
        .find(|u| u.source_text.contains("word word"))
        .expect("oversized paragraph should have its own unit");
    assert!(oversized.source_text.chars().count() > 30);
    assert_eq!(plan.reconstruct_source(), source);
}

/// Test that boundaries never fall inside a paragraph
#[test]
fn test_chunk_withAnyChunkSize_shouldEndUnitsOnParagraphBoundaries() {
    let source = "One sentence here.\n\nAnother sentence there.\n\nA third one.\n";
    let doc = Document::parse(source);

    for chunk_size in [1, 10, 25, 60, 1000] {
        let chunker = Chunker::new(chunk_size).unwrap();
        let plan = chunker.chunk(&doc, "fr").unwrap();
        for unit in &plan.units {
            assert!(
                source.contains(&unit.source_text),
                "unit text must be a contiguous slice of the source"
            );
        }
        assert_eq!(plan.reconstruct_source(), source);
    }
}

/// Test that protected content lands in fixed slots, untouched
#[test]
fn test_chunk_withCodeFence_shouldEmitFixedSlot() {
    let source = "Prose.\n\n```\ncode\n```\n";
    let doc = Document::parse(source);
    let chunker = Chunker::new(100).unwrap();

    let plan = chunker.chunk(&doc, "fr").unwrap();

    let fixed: String = plan
        .layout
        .iter()
        .filter_map(|slot| match slot {
            Slot::Fixed(text) => Some(text.as_str()),
            Slot::Unit(_) => None,
        })
        .collect();
    assert!(fixed.contains("```\ncode\n```"));
}

/// Test that a document with nothing translatable is rejected
#[test]
fn test_chunk_withNoTranslatableContent_shouldFailWithInvalidInput() {
    let doc = Document::parse("---\n\n123\n\n```\ncode only\n```\n");
    let chunker = Chunker::new(100).unwrap();

    let err = chunker.chunk(&doc, "fr").unwrap_err();
    assert!(matches!(err, PipelineError::InvalidInput(_)));
}

/// Test that a zero chunk size is rejected at construction
#[test]
fn test_new_withZeroChunkSize_shouldFailWithInvalidConfig() {
    assert!(matches!(
        Chunker::new(0),
        Err(PipelineError::InvalidConfig(_))
    ));
}
