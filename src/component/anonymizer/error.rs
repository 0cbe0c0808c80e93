use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnonymizeError {
    /// 兩個不同的相對路徑在截斷後得到相同的匿名名稱
    #[error(
        "Hash 碰撞：{first} 與 {second} 都對應到 {pseudonym}，請加大 code length 後從頭重新執行"
    )]
    Collision {
        pseudonym: String,
        first: String,
        second: String,
    },

    #[error("來源清單中重複出現同一個檔案: {0}")]
    DuplicateSource(String),

    #[error("code length 必須介於 1 到 {max} 之間，目前為 {0}", max = super::pseudonym::MAX_CODE_LENGTH)]
    InvalidCodeLength(usize),

    #[error("{} 不在來源資料夾 {} 之下", .path.display(), .root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("路徑含有不支援的部分（例如 ..）: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("路徑不是有效的 UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("來源不是一般檔案: {}", .0.display())]
    NotAFile(PathBuf),

    /// 目的資料夾會在執行時被清空，不能與來源重疊
    #[error("目的資料夾 {} 與來源資料夾 {} 重疊", .dest.display(), .root.display())]
    DestinationOverlapsSource { dest: PathBuf, root: PathBuf },

    #[error("使用者取消: {0}")]
    Declined(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnonymizeError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
