use super::confirm::{ConfirmPrompt, ConfirmRequest};
use super::error::AnonymizeError;
use super::planner::{PlannedFile, plan};
use crate::config::DEFAULT_CODE_LENGTH;
use crate::tools::{Index, ensure_directory_exists, resolve_path};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone)]
pub struct AnonymizeOptions {
    /// 來源資料夾，索引中的路徑都相對於此
    pub root_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub index_path: PathBuf,
    pub code_length: usize,
}

impl AnonymizeOptions {
    pub fn new(
        root_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        index_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root_dir: root_dir.into(),
            dest_dir: dest_dir.into(),
            index_path: index_path.into(),
            code_length: DEFAULT_CODE_LENGTH,
        }
    }

    #[must_use]
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }
}

/// 匿名化結果統計
#[derive(Debug, Default)]
pub struct AnonymizeReport {
    pub files_copied: usize,
    pub bytes_copied: u64,
    /// 收到中斷訊號，索引檔案沒有寫入
    pub interrupted: bool,
    pub index: Index,
}

pub struct Anonymizer {
    options: AnonymizeOptions,
    salt: String,
    shutdown_signal: Arc<AtomicBool>,
}

impl Anonymizer {
    pub fn new(options: AnonymizeOptions, salt: String, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            options,
            salt,
            shutdown_signal,
        }
    }

    /// 只計算匿名名稱，不動檔案系統
    pub fn plan<P: AsRef<Path>>(&self, sources: &[P]) -> Result<Vec<PlannedFile>, AnonymizeError> {
        plan(
            &self.options.root_dir,
            sources,
            &self.salt,
            self.options.code_length,
        )
    }

    /// 依給定順序匿名化來源檔案
    ///
    /// 所有確認都在變更檔案系統之前完成；使用者拒絕時回傳
    /// [`AnonymizeError::Declined`]，目的資料夾與索引檔案都不會被動到。
    pub fn run<P: AsRef<Path>>(
        &self,
        sources: &[P],
        prompt: &dyn ConfirmPrompt,
    ) -> Result<AnonymizeReport, AnonymizeError> {
        let planned = self.plan(sources)?;
        self.check_destination(&planned)?;

        for file in &planned {
            let metadata = fs::metadata(&file.source).map_err(|e| {
                AnonymizeError::io(format!("無法讀取來源檔案 {}", file.source.display()), e)
            })?;
            if !metadata.is_file() {
                return Err(AnonymizeError::NotAFile(file.source.clone()));
            }
        }

        let dest_dir = &self.options.dest_dir;
        let index_path = &self.options.index_path;

        let dest_exists = dest_dir.exists();
        if dest_exists && !prompt.confirm(ConfirmRequest::OverwriteDestination(dest_dir))? {
            return Err(AnonymizeError::Declined(format!(
                "目的資料夾 {} 已存在",
                dest_dir.display()
            )));
        }
        if index_path.is_file() && !prompt.confirm(ConfirmRequest::OverwriteIndex(index_path))? {
            return Err(AnonymizeError::Declined(format!(
                "索引檔案 {} 已存在",
                index_path.display()
            )));
        }

        if dest_exists {
            clear_destination(dest_dir)?;
        }
        ensure_directory_exists(dest_dir)?;

        let report = self.copy_files(&planned)?;
        if report.interrupted {
            warn!("收到中斷訊號，已複製 {} 個檔案，索引未寫入", report.files_copied);
            return Ok(report);
        }

        report.index.save_to_file(index_path)?;
        info!(
            "匿名化完成 - 檔案: {}, 大小: {} bytes, 索引: {}",
            report.files_copied,
            report.bytes_copied,
            index_path.display()
        );

        Ok(report)
    }

    /// 目的資料夾不可等於來源資料夾、是它的上層，或包含任何來源檔案
    fn check_destination(&self, planned: &[PlannedFile]) -> Result<(), AnonymizeError> {
        let root = resolve_path(&self.options.root_dir)?;
        let dest = resolve_path(&self.options.dest_dir)?;

        let overlaps = root.starts_with(&dest)
            || planned
                .iter()
                .any(|file| root.join(&file.relative_path).starts_with(&dest));
        if overlaps {
            return Err(AnonymizeError::DestinationOverlapsSource {
                dest: self.options.dest_dir.clone(),
                root: self.options.root_dir.clone(),
            });
        }
        Ok(())
    }

    fn copy_files(&self, planned: &[PlannedFile]) -> Result<AnonymizeReport, AnonymizeError> {
        let mut report = AnonymizeReport::default();

        let progress_bar = ProgressBar::new(planned.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        for file in planned {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                progress_bar.abandon_with_message("中斷");
                report.interrupted = true;
                return Ok(report);
            }

            progress_bar.set_message(file.file_name.clone());
            let target = self.options.dest_dir.join(&file.file_name);
            let bytes = fs::copy(&file.source, &target).map_err(|e| {
                AnonymizeError::io(
                    format!(
                        "複製失敗 {} -> {}",
                        file.source.display(),
                        target.display()
                    ),
                    e,
                )
            })?;

            report.files_copied += 1;
            report.bytes_copied += bytes;
            report
                .index
                .push(file.pseudonym.clone(), file.relative_path.clone());
            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("完成");
        Ok(report)
    }
}

fn clear_destination(dest_dir: &Path) -> Result<(), AnonymizeError> {
    let result = if dest_dir.is_dir() {
        fs::remove_dir_all(dest_dir)
    } else {
        fs::remove_file(dest_dir)
    };
    result.map_err(|e| AnonymizeError::io(format!("無法刪除 {}", dest_dir.display()), e))?;
    info!("已刪除既有的目的資料夾: {}", dest_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// 固定回答，並記錄被問過的問題
    struct FixedAnswer {
        answer: bool,
        asked: RefCell<Vec<String>>,
    }

    impl FixedAnswer {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl ConfirmPrompt for FixedAnswer {
        fn confirm(&self, request: ConfirmRequest<'_>) -> Result<bool> {
            let label = match request {
                ConfirmRequest::OverwriteDestination(_) => "dest",
                ConfirmRequest::OverwriteIndex(_) => "index",
            };
            self.asked.borrow_mut().push(label.to_string());
            Ok(self.answer)
        }
    }

    fn setup_sources(root: &Path) -> Vec<PathBuf> {
        fs::create_dir_all(root.join("task1")).unwrap();
        let files = [("task1/a.wav", "aaa"), ("task1/b.wav", "bbbb"), ("c.mp3", "c")];
        files
            .iter()
            .map(|(name, content)| {
                let path = root.join(name);
                fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }

    fn anonymizer(temp: &Path, salt: &str) -> Anonymizer {
        let options = AnonymizeOptions::new(
            temp.join("src"),
            temp.join("out"),
            temp.join("index.json"),
        );
        Anonymizer::new(options, salt.to_string(), Arc::new(AtomicBool::new(false)))
    }

    #[test]
    fn test_run_copies_files_and_writes_index() {
        let temp_dir = TempDir::new().unwrap();
        let sources = setup_sources(&temp_dir.path().join("src"));
        let anonymizer = anonymizer(temp_dir.path(), "pepper");

        let report = anonymizer.run(&sources, &FixedAnswer::new(true)).unwrap();

        assert_eq!(report.files_copied, 3);
        assert_eq!(report.bytes_copied, 8);
        assert!(!report.interrupted);

        let index = Index::load_from_file(&temp_dir.path().join("index.json")).unwrap();
        assert_eq!(index, report.index);
        let relative: Vec<_> = index.iter().map(|e| e.relative_path.as_str()).collect();
        assert_eq!(relative, vec!["task1/a.wav", "task1/b.wav", "c.mp3"]);

        for entry in index.iter() {
            let ext = Path::new(&entry.relative_path).extension().unwrap();
            let copied = temp_dir
                .path()
                .join("out")
                .join(format!("{}.{}", entry.pseudonym, ext.to_str().unwrap()));
            let original = temp_dir.path().join("src").join(&entry.relative_path);
            assert_eq!(fs::read(copied).unwrap(), fs::read(original).unwrap());
        }
    }

    #[test]
    fn test_declined_destination_leaves_it_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let sources = setup_sources(&temp_dir.path().join("src"));
        let out = temp_dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("keep.txt"), "old").unwrap();

        let prompt = FixedAnswer::new(false);
        let err = anonymizer(temp_dir.path(), "pepper")
            .run(&sources, &prompt)
            .unwrap_err();

        assert!(matches!(err, AnonymizeError::Declined(_)));
        assert_eq!(*prompt.asked.borrow(), vec!["dest"]);
        assert_eq!(fs::read_to_string(out.join("keep.txt")).unwrap(), "old");
        assert!(!temp_dir.path().join("index.json").exists());
    }

    #[test]
    fn test_declined_index_overwrite_mutates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let sources = setup_sources(&temp_dir.path().join("src"));
        let index_path = temp_dir.path().join("index.json");
        fs::write(&index_path, "[]").unwrap();

        let err = anonymizer(temp_dir.path(), "pepper")
            .run(&sources, &FixedAnswer::new(false))
            .unwrap_err();

        assert!(matches!(err, AnonymizeError::Declined(_)));
        assert_eq!(fs::read_to_string(&index_path).unwrap(), "[]");
        assert!(!temp_dir.path().join("out").exists());
    }

    #[test]
    fn test_confirmed_rerun_replaces_destination() {
        let temp_dir = TempDir::new().unwrap();
        let sources = setup_sources(&temp_dir.path().join("src"));
        let out = temp_dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("stale.wav"), "stale").unwrap();
        fs::write(temp_dir.path().join("index.json"), "[]").unwrap();

        let prompt = FixedAnswer::new(true);
        let report = anonymizer(temp_dir.path(), "pepper")
            .run(&sources, &prompt)
            .unwrap();

        assert_eq!(*prompt.asked.borrow(), vec!["dest", "index"]);
        assert!(!out.join("stale.wav").exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), report.files_copied);
    }

    #[test]
    fn test_missing_source_fails_before_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let mut sources = setup_sources(&temp_dir.path().join("src"));
        sources.push(temp_dir.path().join("src").join("missing.wav"));

        let err = anonymizer(temp_dir.path(), "pepper")
            .run(&sources, &FixedAnswer::new(true))
            .unwrap_err();

        assert!(matches!(err, AnonymizeError::Io { .. }));
        assert!(!temp_dir.path().join("out").exists());
    }

    #[test]
    fn test_directory_source_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut sources = setup_sources(&temp_dir.path().join("src"));
        fs::create_dir_all(temp_dir.path().join("src").join("clip.wav")).unwrap();
        sources.push(temp_dir.path().join("src").join("clip.wav"));

        let err = anonymizer(temp_dir.path(), "pepper")
            .run(&sources, &FixedAnswer::new(true))
            .unwrap_err();

        assert!(matches!(err, AnonymizeError::NotAFile(_)));
        assert!(!temp_dir.path().join("out").exists());
    }

    #[test]
    fn test_destination_equal_to_root_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("src");
        let sources = setup_sources(&root);
        let options = AnonymizeOptions::new(&root, &root, temp_dir.path().join("index.json"));
        let prompt = FixedAnswer::new(true);

        let err = Anonymizer::new(options, "pepper".to_string(), Arc::new(AtomicBool::new(false)))
            .run(&sources, &prompt)
            .unwrap_err();

        assert!(matches!(err, AnonymizeError::DestinationOverlapsSource { .. }));
        assert!(prompt.asked.borrow().is_empty());
        for source in &sources {
            assert!(source.is_file());
        }
    }

    #[test]
    fn test_destination_above_root_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("src");
        let sources = setup_sources(&root);
        let options = AnonymizeOptions::new(
            &root,
            temp_dir.path(),
            temp_dir.path().join("index.json"),
        );

        let err = Anonymizer::new(options, "pepper".to_string(), Arc::new(AtomicBool::new(false)))
            .run(&sources, &FixedAnswer::new(true))
            .unwrap_err();

        assert!(matches!(err, AnonymizeError::DestinationOverlapsSource { .. }));
        assert!(sources.iter().all(|source| source.is_file()));
    }

    #[test]
    fn test_destination_containing_source_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("src");
        let sources = setup_sources(&root);
        let options = AnonymizeOptions::new(
            &root,
            root.join("task1"),
            temp_dir.path().join("index.json"),
        );

        let err = Anonymizer::new(options, "pepper".to_string(), Arc::new(AtomicBool::new(false)))
            .run(&sources, &FixedAnswer::new(true))
            .unwrap_err();

        assert!(matches!(err, AnonymizeError::DestinationOverlapsSource { .. }));
        assert!(root.join("task1").join("a.wav").is_file());
        assert!(!temp_dir.path().join("index.json").exists());
    }

    #[test]
    fn test_shutdown_signal_stops_before_index_write() {
        let temp_dir = TempDir::new().unwrap();
        let sources = setup_sources(&temp_dir.path().join("src"));
        let options = AnonymizeOptions::new(
            temp_dir.path().join("src"),
            temp_dir.path().join("out"),
            temp_dir.path().join("index.json"),
        );
        let anonymizer =
            Anonymizer::new(options, "pepper".to_string(), Arc::new(AtomicBool::new(true)));

        let report = anonymizer.run(&sources, &FixedAnswer::new(true)).unwrap();

        assert!(report.interrupted);
        assert_eq!(report.files_copied, 0);
        assert!(!temp_dir.path().join("index.json").exists());
    }
}
