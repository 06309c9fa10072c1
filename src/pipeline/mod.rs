/*!
 * The translation pipeline: chunking, rate limiting, concurrent execution
 * and deterministic reassembly.
 */

pub mod chunker;
pub mod orchestrator;
pub mod rate_limiter;
pub mod reassembler;
pub mod worker_pool;

pub use chunker::{ChunkPlan, Chunker, Slot, TranslationUnit};
pub use orchestrator::Orchestrator;
pub use rate_limiter::RateLimiter;
pub use reassembler::Reassembler;
pub use worker_pool::{CancelFlag, PoolOutcome, WorkerPool};
