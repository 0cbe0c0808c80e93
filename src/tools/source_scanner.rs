use super::path_validator::resolve_path;
use crate::config::AnonymizerSettings;
use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 掃描來源資料夾下所有符合副檔名設定的檔案
///
/// 回傳的順序以相對路徑排序，作為預設的問卷呈現順序。
/// `excluded` 通常是目的資料夾；位於來源資料夾內時整個子目錄都會被略過。
pub fn scan_source_files(
    directory: &Path,
    settings: &AnonymizerSettings,
    excluded: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let resolved_root = resolve_path(directory)?;
    let excluded = excluded.map(resolve_path).transpose()?;

    let mut files: Vec<PathBuf> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            let Some(excluded) = &excluded else {
                return true;
            };
            entry
                .path()
                .strip_prefix(directory)
                .map_or(true, |relative| resolved_root.join(relative) != *excluded)
        })
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| settings.accepts(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();

    files.sort();
    Ok(files)
}
