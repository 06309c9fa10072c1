/*!
 * Per-unit translation: client with retry state machine, caching and
 * inline format preservation.
 */

pub mod cache;
pub mod client;
pub mod formatting;

pub use cache::TranslationCache;
pub use client::{TranslationClient, TranslationResult};
pub use formatting::SpanMasker;
