//! 索引檢查與重建元件
//!
//! 用 salt 重新計算匿名名稱，比對既有索引，或在索引遺失時重建

mod main;
mod verifier;

pub use main::IndexVerifier;
pub use verifier::{Mismatch, VerifyReport, recover, verify};
