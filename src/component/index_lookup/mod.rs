//! 匿名名稱查詢元件
//!
//! 讀取匿名化索引，把匿名名稱查回原始相對路徑

mod main;
mod resolver;

pub use main::IndexLookup;
pub use resolver::resolve;
