//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod anonymizer;
pub mod index_lookup;
pub mod index_verifier;
mod prompts;

pub use anonymizer::AnonymizerComponent;
pub use index_lookup::IndexLookup;
pub use index_verifier::IndexVerifier;
