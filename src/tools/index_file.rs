use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::path_validator::ensure_directory_exists;

/// 索引中的一筆對應：匿名名稱 → 原始相對路徑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub pseudonym: String,
    pub relative_path: String,
}

// 以兩個元素的陣列序列化：["s_1a2b", "task/a.wav"]
impl Serialize for IndexEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (&self.pseudonym, &self.relative_path).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IndexEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (pseudonym, relative_path) = <(String, String)>::deserialize(deserializer)?;
        Ok(Self {
            pseudonym,
            relative_path,
        })
    }
}

/// 依呈現順序排列的匿名化索引
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index {
    entries: Vec<IndexEntry>,
}

impl Index {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("無法讀取索引檔案: {}", path.display()))?;

        let index: Self = serde_json::from_str(&content)
            .with_context(|| format!("無法解析索引檔案: {}", path.display()))?;

        let mut seen = HashSet::new();
        for entry in &index.entries {
            if !seen.insert(entry.pseudonym.as_str()) {
                bail!(
                    "索引檔案含有重複的匿名名稱 {}: {}",
                    entry.pseudonym,
                    path.display()
                );
            }
        }

        Ok(index)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self).context("無法序列化索引")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_directory_exists(parent)?;
        }

        fs::write(path, content)
            .with_context(|| format!("無法寫入索引檔案: {}", path.display()))?;

        Ok(())
    }

    pub fn push(&mut self, pseudonym: String, relative_path: String) {
        self.entries.push(IndexEntry {
            pseudonym,
            relative_path,
        });
    }

    /// 由匿名名稱查回原始相對路徑
    #[must_use]
    pub fn lookup(&self, pseudonym: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.pseudonym == pseudonym)
            .map(|e| e.relative_path.as_str())
    }

    #[must_use]
    pub fn reverse_lookup(&self, relative_path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.relative_path == relative_path)
            .map(|e| e.pseudonym.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
