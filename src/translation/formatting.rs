/*!
 * Inline format preservation.
 *
 * Inline code spans and inline math must come back from the translation API
 * byte-for-byte. Before a unit is sent they are replaced with sentinel
 * placeholders built from Unicode private-use characters, which translation
 * APIs leave alone, and restored afterwards.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

/// Inline spans that must never be translated: `code` and $math$.
static PROTECTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(`[^`]*`|\$[^$]*\$)").unwrap());

/// Matches the sentinel placeholders in a translated text.
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new("\u{E000}(\\d+)\u{E001}").unwrap());

/// Masks and restores protected inline spans around an API call.
pub struct SpanMasker;

impl SpanMasker {
    /// Replace protected spans with placeholders.
    ///
    /// Returns the masked text and the original spans in placeholder order.
    pub fn mask(text: &str) -> (String, Vec<String>) {
        let mut spans = Vec::new();
        let masked = PROTECTED_RE
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let placeholder = format!("\u{E000}{}\u{E001}", spans.len());
                spans.push(caps[0].to_string());
                placeholder
            })
            .into_owned();
        (masked, spans)
    }

    /// Put the original spans back in place of the placeholders.
    ///
    /// A placeholder the API dropped or mangled cannot be restored; the
    /// remaining ones still are, and the loss is logged.
    pub fn restore(translated: &str, spans: &[String]) -> String {
        let mut seen = vec![false; spans.len()];
        let restored = PLACEHOLDER_RE
            .replace_all(translated, |caps: &regex::Captures<'_>| {
                match caps[1].parse::<usize>().ok().and_then(|i| {
                    seen.get_mut(i).map(|s| *s = true);
                    spans.get(i)
                }) {
                    Some(span) => span.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned();

        let lost = seen.iter().filter(|s| !**s).count();
        if lost > 0 {
            warn!("{} protected span(s) were dropped by the API response", lost);
        }

        restored
    }
}
