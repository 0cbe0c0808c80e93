use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// 讀取 salt 檔案並去除前後空白
///
/// salt 必須是非空的 ASCII 字串，否則直接失敗，不做任何重試。
pub fn read_salt(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("無法讀取 salt 檔案: {}", path.display()))?;

    let salt = content.trim();
    if salt.is_empty() {
        bail!("salt 檔案是空的: {}", path.display());
    }
    if !salt.is_ascii() {
        bail!("salt 必須是 ASCII 字串: {}", path.display());
    }

    Ok(salt.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_salt_strips_whitespace() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("salt.txt");
        fs::write(&path, "  pepper\n\n").unwrap();

        assert_eq!(read_salt(&path).unwrap(), "pepper");
    }

    #[test]
    fn test_read_salt_rejects_empty_and_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("salt.txt");
        fs::write(&path, " \n\t").unwrap();

        assert!(read_salt(&path).is_err());
        assert!(read_salt(&temp_dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_read_salt_rejects_non_ascii() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("salt.txt");
        fs::write(&path, "鹽巴").unwrap();

        assert!(read_salt(&path).is_err());
    }
}
