/*!
 * Tests for document parsing and segmentation
 */

use doctrans::document::{Document, SegmentKind};

use crate::common;

/// Test that parsing preserves the source byte for byte
#[test]
fn test_parse_withMixedContent_shouldReconstructExactly() {
    let source = common::sample_document();
    let doc = Document::parse(source);
    assert_eq!(doc.reconstruct(), source);
}

/// Test that code fences are protected including the fence markers
#[test]
fn test_parse_withCodeFence_shouldProtectFenceAndBody() {
    let source = "Before.\n\n```python\nprint(\"hi\")\n```\n\nAfter.\n";
    let doc = Document::parse(source);

    let protected: String = doc
        .segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Protected)
        .map(|s| s.text.as_str())
        .collect();
    assert!(protected.contains("```python"));
    assert!(protected.contains("print(\"hi\")"));
    assert_eq!(doc.translatable_count(), 2);
}

/// Test that display math blocks are protected
#[test]
fn test_parse_withMathBlock_shouldProtectBlock() {
    let source = "Some prose.\n\n$$\n\\int_0^1 x dx\n$$\n";
    let doc = Document::parse(source);

    let protected: String = doc
        .segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Protected)
        .map(|s| s.text.as_str())
        .collect();
    assert!(protected.contains("\\int_0^1 x dx"));
    assert_eq!(doc.translatable_count(), 1);
}

/// Test that an unclosed fence at end of input still reconstructs exactly
#[test]
fn test_parse_withUnclosedFenceAtEof_shouldStillReconstruct() {
    let source = "Prose.\n\n```\nnever closed\n";
    let doc = Document::parse(source);
    assert_eq!(doc.reconstruct(), source);
    assert_eq!(doc.translatable_count(), 1);
}

/// Test that symbol-only paragraphs are not sent for translation
#[test]
fn test_parse_withSymbolOnlyParagraphs_shouldProtectThem() {
    let source = "---\n\n## 2.1\n\nActual sentence to translate.\n\n- - -\n";
    let doc = Document::parse(source);
    assert_eq!(doc.reconstruct(), source);
    assert_eq!(doc.translatable_count(), 1);
}

/// Test that trailing blank lines attach to the preceding paragraph
#[test]
fn test_parse_withBlankLinesBetweenParagraphs_shouldAttachToPrevious() {
    let source = "First.\n\n\nSecond.\n";
    let doc = Document::parse(source);

    let prose: Vec<&str> = doc
        .segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Prose)
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(prose, vec!["First.\n\n\n", "Second.\n"]);
}

/// Test that leading blank lines become a protected segment
#[test]
fn test_parse_withLeadingBlankLines_shouldProtectThem() {
    let source = "\n\nParagraph.\n";
    let doc = Document::parse(source);
    assert_eq!(doc.segments[0].kind, SegmentKind::Protected);
    assert_eq!(doc.segments[0].text, "\n\n");
}

/// Test that an empty document yields no translatable content
#[test]
fn test_parse_withEmptySource_shouldHaveNothingTranslatable() {
    let doc = Document::parse("");
    assert_eq!(doc.translatable_count(), 0);
    assert_eq!(doc.reconstruct(), "");
}
