/*!
 * # doctrans - chunked, parallel document translation
 *
 * A Rust library and CLI for translating long structured text documents
 * against a rate-limited external translation API.
 *
 * ## Features
 *
 * - Split documents into translation units along paragraph boundaries
 * - Translate units concurrently with a bounded worker pool
 * - Client-side request rate limiting (requests per second, FIFO)
 * - Per-unit retry with exponential backoff and jitter
 * - Protect code blocks, math and inline spans from translation
 * - Deterministic reassembly; output written atomically on full success only
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Source parsing into translatable/protected segments
 * - `pipeline`: The translation pipeline:
 *   - `pipeline::chunker`: Unit creation and layout mapping
 *   - `pipeline::rate_limiter`: Outbound request pacing
 *   - `pipeline::worker_pool`: Bounded concurrent execution
 *   - `pipeline::reassembler`: All-or-nothing recombination
 *   - `pipeline::orchestrator`: End-to-end run driver
 * - `translation`: Per-unit translation:
 *   - `translation::client`: Retry state machine
 *   - `translation::cache`: In-memory translation cache
 *   - `translation::formatting`: Inline span protection
 * - `providers`: Clients for translation APIs:
 *   - `providers::google`: Google Cloud Translation v2
 *   - `providers::libretranslate`: Self-hosted LibreTranslate
 *   - `providers::mock`: Deterministic provider for tests
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO 639 language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, PipelineConfig};
pub use app_controller::Controller;
pub use document::{Document, Segment, SegmentKind};
pub use errors::{PipelineError, ProviderError, UnitFailure};
pub use pipeline::{CancelFlag, ChunkPlan, Chunker, Orchestrator, RateLimiter, Reassembler, TranslationUnit, WorkerPool};
pub use translation::{TranslationCache, TranslationClient, TranslationResult};
