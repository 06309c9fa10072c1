/*!
 * Tests for deterministic reassembly
 */

use doctrans::document::Document;
use doctrans::errors::PipelineError;
use doctrans::pipeline::{Chunker, Reassembler};
use doctrans::translation::TranslationResult;

fn results_for(count: usize) -> Vec<TranslationResult> {
    (0..count)
        .map(|index| TranslationResult {
            index,
            translated_text: format!("<t{}>", index),
            attempts: 1,
        })
        .collect()
}

/// Test that reassembly interleaves translations with protected content
#[test]
fn test_reassemble_withFullResults_shouldInterleaveFixedContent() {
    let source = "First.\n\n```\ncode\n```\n\nSecond.\n";
    let doc = Document::parse(source);
    let plan = Chunker::new(10).unwrap().chunk(&doc, "fr").unwrap();
    assert_eq!(plan.units.len(), 2);

    let output = Reassembler::reassemble(&plan, &results_for(2)).unwrap();

    assert_eq!(output, "<t0>```\ncode\n```\n\n<t1>");
}

/// Test that reassembly accepts results in arbitrary completion order
#[test]
fn test_reassemble_withShuffledResults_shouldOrderByIndex() {
    let source = "One.\n\nTwo.\n\nThree.\n";
    let doc = Document::parse(source);
    let plan = Chunker::new(5).unwrap().chunk(&doc, "fr").unwrap();
    assert_eq!(plan.units.len(), 3);

    let mut results = results_for(3);
    results.reverse();
    let output = Reassembler::reassemble(&plan, &results).unwrap();

    assert_eq!(output, "<t0><t1><t2>");
}

/// Test that a missing unit rejects the whole reassembly
#[test]
fn test_reassemble_withMissingUnit_shouldFailWithIndices() {
    let source = "One.\n\nTwo.\n\nThree.\n";
    let doc = Document::parse(source);
    let plan = Chunker::new(5).unwrap().chunk(&doc, "fr").unwrap();

    let mut results = results_for(3);
    results.remove(1);
    let err = Reassembler::reassemble(&plan, &results).unwrap_err();

    match err {
        PipelineError::IncompleteTranslation { missing } => assert_eq!(missing, vec![1]),
        other => panic!("expected IncompleteTranslation, got {:?}", other),
    }
}
