/*!
 * ISO 639 language code utilities.
 *
 * Language codes reach the pipeline from the CLI and config file and are
 * passed through to the translation API. Codes may carry a region subtag
 * ("zh-CN", "pt_BR"); only the primary subtag is validated.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Primary subtag of a language code ("zh-CN" -> "zh").
pub fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}

/// Look up a language by its primary subtag (ISO 639-1 or 639-3).
pub fn lookup(code: &str) -> Option<Language> {
    let primary = primary_subtag(code).to_lowercase();
    match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }
}

/// Validate that a code names a known language.
pub fn validate_language_code(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(anyhow!("language code is empty"));
    }
    lookup(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("unknown language code: {}", code))
}

/// English name of a language, falling back to the code itself.
pub fn get_language_name(code: &str) -> String {
    lookup(code)
        .map(|l| l.to_name().to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Whether two codes refer to the same language, ignoring region subtags.
pub fn language_codes_match(a: &str, b: &str) -> bool {
    match (lookup(a), lookup(b)) {
        (Some(la), Some(lb)) => la == lb,
        _ => primary_subtag(a).eq_ignore_ascii_case(primary_subtag(b)),
    }
}
