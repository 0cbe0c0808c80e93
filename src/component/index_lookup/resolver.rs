use crate::tools::Index;
use std::path::Path;

/// 由使用者輸入查回原始路徑
///
/// 接受純匿名名稱（`s_1a2b`）或匿名檔名（`s_1a2b.wav`、含資料夾亦可）。
#[must_use]
pub fn resolve<'a>(index: &'a Index, query: &str) -> Option<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    if let Some(found) = index.lookup(query) {
        return Some(found);
    }

    let stem = Path::new(query).file_stem()?.to_str()?;
    index.lookup(stem)
}
