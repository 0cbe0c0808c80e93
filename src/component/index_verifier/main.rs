use super::verifier::{VerifyReport, recover, verify};
use crate::component::anonymizer::{AnonymizeError, DialoguerPrompt, PSEUDONYM_PREFIX, plan};
use crate::component::prompts::{
    prompt_code_length, prompt_salt, prompt_source_directory, prompt_text,
};
use crate::config::UserSettings;
use crate::tools::{Index, scan_source_files, validate_directory_exists, validate_file_exists};
use anyhow::Result;
use console::style;
use log::{info, warn};
use rust_i18n::t;
use std::path::{Path, PathBuf};

/// 列出不一致項目時最多顯示的筆數
const DISPLAY_LIMIT: usize = 10;

/// 索引檢查與重建元件
pub struct IndexVerifier;

impl IndexVerifier {
    /// 以 salt 重新計算匿名名稱並與既有索引比對
    pub fn run_verify(&self, settings: &UserSettings) -> Result<()> {
        println!("{}", style(t!("verifier.verify_title")).cyan().bold());

        let Some(input_path) = prompt_source_directory(&settings.recent_paths)? else {
            return Ok(());
        };
        let root_dir = PathBuf::from(&input_path);
        validate_directory_exists(&root_dir)?;

        let (_, salt) = prompt_salt(&settings.anonymizer.salt_file)?;
        let index_path = prompt_text(
            &t!("anonymizer.prompt_index"),
            &settings.anonymizer.index_path,
        )?;
        validate_file_exists(Path::new(&index_path))?;

        let index = Index::load_from_file(Path::new(&index_path))?;
        let code_length = infer_code_length(&index).unwrap_or(settings.anonymizer.code_length);

        println!("{}", style(t!("common.scanning")).dim());
        let sources = scan_source_files(
            &root_dir,
            &settings.anonymizer,
            Some(Path::new(&settings.anonymizer.dest_dir)),
        )?;
        let planned = plan(&root_dir, &sources, &salt, code_length)?;

        let report = verify(&index, &planned);
        print_verify_report(&report);

        Ok(())
    }

    /// 遺失索引時，由 salt 與來源檔名重建
    pub fn run_recover(&self, settings: &UserSettings) -> Result<()> {
        println!("{}", style(t!("verifier.recover_title")).cyan().bold());

        let Some(input_path) = prompt_source_directory(&settings.recent_paths)? else {
            return Ok(());
        };
        let root_dir = PathBuf::from(&input_path);
        validate_directory_exists(&root_dir)?;

        let (_, salt) = prompt_salt(&settings.anonymizer.salt_file)?;
        let index_path = prompt_text(
            &t!("anonymizer.prompt_index"),
            &settings.anonymizer.index_path,
        )?;
        let code_length = prompt_code_length(settings.anonymizer.code_length)?;

        println!("{}", style(t!("common.scanning")).dim());
        let sources = scan_source_files(
            &root_dir,
            &settings.anonymizer,
            Some(Path::new(&settings.anonymizer.dest_dir)),
        )?;

        match recover(
            &root_dir,
            &sources,
            &salt,
            code_length,
            Path::new(&index_path),
            &DialoguerPrompt,
        ) {
            Ok(index) => {
                println!(
                    "{}",
                    style(t!("verifier.recovered", count = index.len(), path = &index_path))
                        .green()
                );
                Ok(())
            }
            Err(AnonymizeError::Declined(reason)) => {
                warn!("重建索引已取消: {reason}");
                println!("{}", style(t!("anonymizer.aborted")).yellow());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// 由索引中的匿名名稱推回當時使用的 code length
fn infer_code_length(index: &Index) -> Option<usize> {
    index
        .iter()
        .next()
        .and_then(|entry| entry.pseudonym.strip_prefix(PSEUDONYM_PREFIX))
        .map(str::len)
        .filter(|len| *len > 0)
}

fn print_verify_report(report: &VerifyReport) {
    println!();
    println!("{}", style(t!("verifier.summary_title")).cyan().bold());
    println!(
        "  {}",
        t!("verifier.matched", count = style(report.matched).green())
    );

    if report.is_consistent() {
        println!("{}", style(t!("verifier.consistent")).green());
        info!("索引檢查通過 - {} 筆", report.matched);
        return;
    }

    if !report.mismatched.is_empty() {
        println!(
            "  {}",
            style(t!("verifier.mismatched", count = report.mismatched.len())).red()
        );
        for mismatch in report.mismatched.iter().take(DISPLAY_LIMIT) {
            println!(
                "    {} {}: {} ≠ {}",
                style("✗").red(),
                mismatch.relative_path,
                mismatch.recorded,
                mismatch.expected
            );
        }
    }
    print_list(&t!("verifier.missing_sources"), &report.missing_sources);
    print_list(&t!("verifier.unindexed"), &report.unindexed);

    warn!(
        "索引檢查不一致 - 符合: {}, 不符: {}, 來源遺失: {}, 未記錄: {}",
        report.matched,
        report.mismatched.len(),
        report.missing_sources.len(),
        report.unindexed.len()
    );
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    println!("  {} ({})", style(title).yellow(), items.len());
    for item in items.iter().take(DISPLAY_LIMIT) {
        println!("    {} {}", style("→").yellow(), item);
    }
    if items.len() > DISPLAY_LIMIT {
        println!("    {} ...{}", style("⋯").dim(), items.len() - DISPLAY_LIMIT);
    }
}
