use crate::component::anonymizer::{
    AnonymizeError, ConfirmPrompt, ConfirmRequest, PlannedFile, plan,
};
use crate::tools::Index;
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// 索引中的匿名名稱與重新計算的結果不一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub relative_path: String,
    pub recorded: String,
    pub expected: String,
}

#[derive(Debug, Default)]
pub struct VerifyReport {
    pub matched: usize,
    pub mismatched: Vec<Mismatch>,
    /// 索引中有記錄，但來源資料夾已經找不到
    pub missing_sources: Vec<String>,
    /// 來源資料夾中有檔案，但索引沒有記錄
    pub unindexed: Vec<String>,
}

impl VerifyReport {
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.mismatched.is_empty() && self.missing_sources.is_empty() && self.unindexed.is_empty()
    }
}

/// 以 salt 重新計算的結果檢查既有索引
#[must_use]
pub fn verify(index: &Index, planned: &[PlannedFile]) -> VerifyReport {
    let mut report = VerifyReport::default();

    let expected: HashMap<&str, &str> = planned
        .iter()
        .map(|p| (p.relative_path.as_str(), p.pseudonym.as_str()))
        .collect();

    for entry in index.iter() {
        match expected.get(entry.relative_path.as_str()) {
            Some(pseudonym) if *pseudonym == entry.pseudonym => report.matched += 1,
            Some(pseudonym) => report.mismatched.push(Mismatch {
                relative_path: entry.relative_path.clone(),
                recorded: entry.pseudonym.clone(),
                expected: (*pseudonym).to_string(),
            }),
            None => report.missing_sources.push(entry.relative_path.clone()),
        }
    }

    report.unindexed = planned
        .iter()
        .filter(|p| index.reverse_lookup(&p.relative_path).is_none())
        .map(|p| p.relative_path.clone())
        .collect();

    report
}

/// 不複製任何檔案，只由 salt 與來源檔名重建索引
pub fn recover<P: AsRef<Path>>(
    root: &Path,
    sources: &[P],
    salt: &str,
    code_length: usize,
    index_path: &Path,
    prompt: &dyn ConfirmPrompt,
) -> Result<Index, AnonymizeError> {
    let planned = plan(root, sources, salt, code_length)?;

    if index_path.is_file() && !prompt.confirm(ConfirmRequest::OverwriteIndex(index_path))? {
        return Err(AnonymizeError::Declined(format!(
            "索引檔案 {} 已存在",
            index_path.display()
        )));
    }

    let mut index = Index::new();
    for file in planned {
        index.push(file.pseudonym, file.relative_path);
    }
    index.save_to_file(index_path)?;
    info!("已重建索引 {} ({} 筆)", index_path.display(), index.len());

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::TempDir;

    struct Always(bool);

    impl ConfirmPrompt for Always {
        fn confirm(&self, _request: ConfirmRequest<'_>) -> Result<bool> {
            Ok(self.0)
        }
    }

    fn planned(salt: &str) -> Vec<PlannedFile> {
        plan(Path::new("/audio"), &["a.wav", "b.wav", "c.wav"], salt, 8).unwrap()
    }

    fn index_from(planned: &[PlannedFile]) -> Index {
        let mut index = Index::new();
        for p in planned {
            index.push(p.pseudonym.clone(), p.relative_path.clone());
        }
        index
    }

    #[test]
    fn test_verify_consistent_index() {
        let planned = planned("pepper");
        let report = verify(&index_from(&planned), &planned);
        assert!(report.is_consistent());
        assert_eq!(report.matched, 3);
    }

    #[test]
    fn test_verify_with_wrong_salt_reports_mismatches() {
        let index = index_from(&planned("pepper"));
        let report = verify(&index, &planned("paprika"));
        assert!(!report.is_consistent());
        assert_eq!(report.matched, 0);
        assert_eq!(report.mismatched.len(), 3);
        assert_eq!(report.mismatched[0].relative_path, "a.wav");
    }

    #[test]
    fn test_verify_reports_missing_and_unindexed() {
        let planned = planned("pepper");
        let mut index = index_from(&planned[..2]);
        index.push("s_00000000".to_string(), "gone.wav".to_string());

        let report = verify(&index, &planned);
        assert_eq!(report.matched, 2);
        assert_eq!(report.missing_sources, vec!["gone.wav"]);
        assert_eq!(report.unindexed, vec!["c.wav"]);
    }

    #[test]
    fn test_recover_writes_same_index_as_plan() {
        let temp_dir = TempDir::new().unwrap();
        let index_path = temp_dir.path().join("index.json");

        let index = recover(
            Path::new("/audio"),
            &["a.wav", "b.wav", "c.wav"],
            "pepper",
            8,
            &index_path,
            &Always(true),
        )
        .unwrap();

        assert_eq!(index, index_from(&planned("pepper")));
        assert_eq!(Index::load_from_file(&index_path).unwrap(), index);
    }

    #[test]
    fn test_recover_declined_keeps_existing_index() {
        let temp_dir = TempDir::new().unwrap();
        let index_path = temp_dir.path().join("index.json");
        fs::write(&index_path, "[]").unwrap();

        let err = recover(
            Path::new("/audio"),
            &["a.wav"],
            "pepper",
            8,
            &index_path,
            &Always(false),
        )
        .unwrap_err();

        assert!(matches!(err, AnonymizeError::Declined(_)));
        assert_eq!(fs::read_to_string(&index_path).unwrap(), "[]");
    }
}
