use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("檔案不存在: {}", path.display());
    }
    if !path.is_file() {
        bail!("路徑不是檔案: {}", path.display());
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("無法建立目錄: {}", path.display()))?;
    }
    Ok(())
}

/// 取得路徑的絕對形式，路徑本身不需要存在
///
/// 最近一個存在的上層目錄會被 canonicalize（解開 symlink），其餘部分直接接上。
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("無法取得絕對路徑: {}", path.display()))?;

    let mut existing = absolute.as_path();
    let mut rest = Vec::new();
    while !existing.exists() {
        let Some(parent) = existing.parent() else {
            break;
        };
        if let Some(last) = existing.components().next_back() {
            rest.push(last.as_os_str().to_owned());
        }
        existing = parent;
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("無法解析路徑: {}", existing.display()))?;
    resolved.extend(rest.iter().rev());
    Ok(resolved)
}
