use super::error::AnonymizeError;
use super::pseudonym::{anonymized_file_name, normalize_relative, pseudonym};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 單一來源檔案的匿名化計畫
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// 實際讀取的來源檔案
    pub source: PathBuf,
    /// 以 `/` 分隔、相對於來源資料夾的路徑
    pub relative_path: String,
    pub pseudonym: String,
    /// 目的資料夾中的檔名（匿名名稱 + 原副檔名）
    pub file_name: String,
}

/// 依給定順序為每個來源檔案計算匿名名稱
///
/// 在任何檔案系統變更之前完成，碰撞會直接回傳錯誤。
pub fn plan<P: AsRef<Path>>(
    root: &Path,
    sources: &[P],
    salt: &str,
    code_length: usize,
) -> Result<Vec<PlannedFile>, AnonymizeError> {
    let mut used: HashMap<String, String> = HashMap::with_capacity(sources.len());
    let mut planned = Vec::with_capacity(sources.len());

    for source in sources {
        let (file_path, relative_path) = normalize_relative(root, source.as_ref())?;
        let pseudonym = pseudonym(salt, &relative_path, code_length)?;

        if let Some(first) = used.get(&pseudonym) {
            if *first == relative_path {
                return Err(AnonymizeError::DuplicateSource(relative_path));
            }
            return Err(AnonymizeError::Collision {
                pseudonym,
                first: first.clone(),
                second: relative_path,
            });
        }
        used.insert(pseudonym.clone(), relative_path.clone());

        debug!("{relative_path} -> {pseudonym}");
        planned.push(PlannedFile {
            source: file_path,
            file_name: anonymized_file_name(&pseudonym, &relative_path),
            relative_path,
            pseudonym,
        });
    }

    Ok(planned)
}
