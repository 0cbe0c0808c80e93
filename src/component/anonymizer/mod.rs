//! 音訊檔名匿名化元件
//!
//! 以 SHA-256(salt || 相對路徑) 的前綴作為匿名名稱，複製檔案並輸出對照索引。
//! 只要保留 salt 與原始檔名，遺失索引後仍可重建同樣的對應。

mod anonymize;
mod confirm;
mod error;
mod main;
mod planner;
mod pseudonym;

pub use anonymize::{AnonymizeOptions, AnonymizeReport, Anonymizer};
pub use confirm::{ConfirmPrompt, ConfirmRequest, DialoguerPrompt};
pub use error::AnonymizeError;
pub use main::AnonymizerComponent;
pub use planner::{PlannedFile, plan};
pub use pseudonym::{
    MAX_CODE_LENGTH, PSEUDONYM_PREFIX, anonymized_file_name, normalize_relative, pseudonym,
};
