use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// 最近使用路徑的保留數量
pub const MAX_RECENT_PATHS: usize = 10;

/// 預設的 hash 前綴長度（十六進位字元數）
pub const DEFAULT_CODE_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

/// 匿名化流程的預設值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnonymizerSettings {
    pub code_length: usize,
    pub dest_dir: String,
    pub index_path: String,
    pub salt_file: String,
    /// 只處理這些副檔名（含點、小寫），空清單代表全部檔案
    pub audio_extensions: Vec<String>,
}

impl Default for AnonymizerSettings {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            dest_dir: "anonymized".to_string(),
            index_path: "anonymized_index.json".to_string(),
            salt_file: "salt.txt".to_string(),
            audio_extensions: [".wav", ".mp3", ".flac", ".ogg", ".m4a", ".aac", ".opus"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl AnonymizerSettings {
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        if self.audio_extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let dotted = format!(".{}", ext.to_lowercase());
                self.audio_extensions
                    .iter()
                    .any(|allowed| allowed.to_lowercase() == dotted)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub recent_paths: Vec<String>,
    pub anonymizer: AnonymizerSettings,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}
