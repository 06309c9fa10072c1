/*!
 * Source document parsing and segmentation.
 *
 * A document is parsed line by line into an ordered sequence of segments.
 * Prose paragraphs are translatable; fenced code blocks, display math
 * blocks, blank regions and symbol-only paragraphs are protected and pass
 * through the pipeline untouched. Concatenating the segment texts in order
 * reproduces the source byte for byte.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches paragraphs that contain nothing worth translating: whitespace,
/// digits and Markdown/punctuation characters only.
static SKIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s\d#>*\-`~:;,.!\[\](){}+=_/\\|]*$").unwrap());

/// Kind of a document segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Translatable prose paragraph (trailing blank lines attached)
    Prose,
    /// Structural content emitted verbatim: code fences, display math,
    /// blank regions, symbol-only paragraphs
    Protected,
}

/// One contiguous piece of the source document.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Exact text of the segment, including line endings
    pub text: String,
    /// Whether the segment is sent to the translation API
    pub kind: SegmentKind,
}

/// An ordered sequence of segments covering the whole source.
#[derive(Debug, Clone)]
pub struct Document {
    /// Segments in source order
    pub segments: Vec<Segment>,
}

impl Document {
    /// Parse a source string into segments.
    ///
    /// Line state machine: a line whose trimmed form starts with ``` toggles
    /// code-block state, a line that is exactly `$$` toggles math-block
    /// state. Fence marker lines and everything inside a block are
    /// protected. Outside blocks, consecutive non-blank lines form a prose
    /// paragraph; blank lines after a paragraph attach to it, blank lines
    /// elsewhere are protected.
    pub fn parse(source: &str) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        let mut prose = String::new();
        let mut prose_closed = false;
        let mut protected = String::new();
        let mut in_code = false;
        let mut in_math = false;

        for line in source.split_inclusive('\n') {
            let stripped = line.trim();
            let code_fence = stripped.starts_with("```");
            let math_fence = stripped == "$$";

            if in_code || in_math || code_fence || math_fence {
                Self::flush_prose(&mut segments, &mut prose, &mut prose_closed);
                protected.push_str(line);
                if code_fence && !in_math {
                    in_code = !in_code;
                } else if math_fence && !in_code {
                    in_math = !in_math;
                }
                continue;
            }

            if stripped.is_empty() {
                if prose.is_empty() {
                    protected.push_str(line);
                } else {
                    prose.push_str(line);
                    prose_closed = true;
                }
                continue;
            }

            Self::flush_protected(&mut segments, &mut protected);
            if prose_closed {
                Self::flush_prose(&mut segments, &mut prose, &mut prose_closed);
            }
            prose.push_str(line);
        }

        Self::flush_protected(&mut segments, &mut protected);
        Self::flush_prose(&mut segments, &mut prose, &mut prose_closed);

        Self { segments }
    }

    /// Reconstruct the exact source text from the segments.
    pub fn reconstruct(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Number of translatable segments with non-whitespace content.
    pub fn translatable_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Prose && !s.text.trim().is_empty())
            .count()
    }

    fn flush_prose(segments: &mut Vec<Segment>, prose: &mut String, closed: &mut bool) {
        if prose.is_empty() {
            return;
        }
        let text = std::mem::take(prose);
        *closed = false;
        // Paragraphs with no translatable characters stay protected
        let kind = if SKIP_RE.is_match(&text) {
            SegmentKind::Protected
        } else {
            SegmentKind::Prose
        };
        segments.push(Segment { text, kind });
    }

    fn flush_protected(segments: &mut Vec<Segment>, protected: &mut String) {
        if protected.is_empty() {
            return;
        }
        segments.push(Segment {
            text: std::mem::take(protected),
            kind: SegmentKind::Protected,
        });
    }
}
