use super::anonymize::{AnonymizeOptions, AnonymizeReport, Anonymizer};
use super::confirm::DialoguerPrompt;
use super::error::AnonymizeError;
use crate::component::prompts::{
    prompt_code_length, prompt_salt, prompt_source_directory, prompt_text,
};
use crate::config::UserSettings;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::{scan_source_files, validate_directory_exists};
use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use log::{info, warn};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 互動式匿名化流程
pub struct AnonymizerComponent {
    shutdown_signal: Arc<AtomicBool>,
}

impl AnonymizerComponent {
    pub const fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self { shutdown_signal }
    }

    pub fn run(&self, settings: &mut UserSettings) -> Result<()> {
        println!("{}", style(t!("anonymizer.title")).cyan().bold());

        let Some(input_path) = prompt_source_directory(&settings.recent_paths)? else {
            return Ok(()); // ESC pressed
        };
        let root_dir = PathBuf::from(&input_path);
        validate_directory_exists(&root_dir)?;

        let (salt_file, salt) = prompt_salt(&settings.anonymizer.salt_file)?;

        let dest_dir = prompt_text(&t!("anonymizer.prompt_dest"), &settings.anonymizer.dest_dir)?;
        let index_path =
            prompt_text(&t!("anonymizer.prompt_index"), &settings.anonymizer.index_path)?;
        let code_length = prompt_code_length(settings.anonymizer.code_length)?;

        // 記住這次的選擇
        add_recent_path(settings, &input_path);
        settings.anonymizer.salt_file = salt_file;
        settings.anonymizer.dest_dir.clone_from(&dest_dir);
        settings.anonymizer.index_path.clone_from(&index_path);
        settings.anonymizer.code_length = code_length;
        if let Err(e) = save_settings(settings) {
            warn!("無法儲存設定: {e}");
        }

        println!("{}", style(t!("common.scanning")).dim());
        let sources = scan_source_files(
            &root_dir,
            &settings.anonymizer,
            Some(Path::new(&dest_dir)),
        )?;
        if sources.is_empty() {
            println!("{}", style(t!("anonymizer.no_files")).yellow());
            return Ok(());
        }

        let options = AnonymizeOptions::new(&root_dir, &dest_dir, &index_path)
            .with_code_length(code_length);
        let anonymizer = Anonymizer::new(options, salt, Arc::clone(&self.shutdown_signal));

        // 先算出所有匿名名稱，碰撞會在這裡就失敗
        let planned = anonymizer.plan(&sources)?;
        println!(
            "{}",
            style(t!("anonymizer.found", count = planned.len())).green()
        );

        if !confirm_start()? {
            println!("{}", style(t!("common.cancelled")).yellow());
            return Ok(());
        }

        if self.shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止處理");
            return Ok(());
        }

        match anonymizer.run(&sources, &DialoguerPrompt) {
            Ok(report) => {
                print_report(&report, Path::new(&index_path));
                Ok(())
            }
            Err(AnonymizeError::Declined(reason)) => {
                warn!("匿名化已取消: {reason}");
                println!("{}", style(t!("anonymizer.aborted")).yellow());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn confirm_start() -> Result<bool> {
    let confirm = Confirm::new()
        .with_prompt(t!("anonymizer.confirm_start"))
        .default(true)
        .interact()?;
    Ok(confirm)
}

fn print_report(report: &AnonymizeReport, index_path: &Path) {
    println!();
    println!("{}", style(t!("anonymizer.summary_title")).cyan().bold());
    println!(
        "  {}",
        t!("anonymizer.summary_files", count = style(report.files_copied).green())
    );
    println!(
        "  {}",
        t!(
            "anonymizer.summary_size",
            size = format!("{:.2}", report.bytes_copied as f64 / 1024.0 / 1024.0)
        )
    );

    if report.interrupted {
        println!("{}", style(t!("anonymizer.interrupted")).red());
    } else {
        println!(
            "  {}",
            t!("anonymizer.summary_index", path = index_path.display())
        );
    }

    info!(
        "匿名化摘要 - 檔案: {}, 中斷: {}",
        report.files_copied, report.interrupted
    );
}
