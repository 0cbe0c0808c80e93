use super::error::AnonymizeError;
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};

/// 所有匿名名稱共用的前綴
pub const PSEUDONYM_PREFIX: &str = "s_";

/// SHA-256 十六進位摘要的長度
pub const MAX_CODE_LENGTH: usize = 64;

/// 計算匿名名稱：前綴 + SHA-256(salt || relative_path) 的前 `code_length` 個十六進位字元
pub fn pseudonym(salt: &str, relative_path: &str, code_length: usize) -> Result<String, AnonymizeError> {
    if code_length == 0 || code_length > MAX_CODE_LENGTH {
        return Err(AnonymizeError::InvalidCodeLength(code_length));
    }

    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(relative_path.as_bytes());
    let digest = hex::encode(hasher.finalize());

    Ok(format!("{PSEUDONYM_PREFIX}{}", &digest[..code_length]))
}

/// 匿名後的檔名，保留來源檔案的副檔名
#[must_use]
pub fn anonymized_file_name(pseudonym: &str, relative_path: &str) -> String {
    match Path::new(relative_path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{pseudonym}.{ext}"),
        None => pseudonym.to_string(),
    }
}

/// 將來源路徑轉成相對於 `root` 的路徑
///
/// 回傳 (實際檔案路徑, 以 `/` 分隔的相對路徑字串)。相對路徑若不是以 `root`
/// 開頭，視為已經相對於 `root`。
pub fn normalize_relative(root: &Path, source: &Path) -> Result<(PathBuf, String), AnonymizeError> {
    let relative = if let Ok(stripped) = source.strip_prefix(root) {
        stripped
    } else if source.is_relative() {
        source
    } else {
        return Err(AnonymizeError::OutsideRoot {
            path: source.to_path_buf(),
            root: root.to_path_buf(),
        });
    };

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| AnonymizeError::NonUtf8Path(source.to_path_buf()))?;
                parts.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(AnonymizeError::InvalidPath(source.to_path_buf()));
            }
        }
    }

    if parts.is_empty() {
        return Err(AnonymizeError::InvalidPath(source.to_path_buf()));
    }

    let mut file_path = root.to_path_buf();
    file_path.extend(&parts);

    Ok((file_path, parts.join("/")))
}
