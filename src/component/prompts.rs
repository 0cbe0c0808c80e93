//! 各元件共用的互動式輸入

use crate::component::anonymizer::MAX_CODE_LENGTH;
use crate::tools::{read_salt, validate_file_exists};
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::path::Path;

pub(crate) fn prompt_source_directory(recent_paths: &[String]) -> Result<Option<String>> {
    if recent_paths.is_empty() {
        let path: String = Input::new()
            .with_prompt(t!("anonymizer.prompt_source"))
            .interact_text()?;
        return Ok(Some(path.trim().to_string()));
    }

    let mut options: Vec<String> = recent_paths
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let indicator = if Path::new(p).exists() { "✓" } else { "✗" };
            format!("{} [{}] {}", i + 1, indicator, p)
        })
        .collect();
    options.push(t!("common.new_path").to_string());

    println!("{}", style(t!("common.esc_hint")).dim());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("common.select_path"))
        .items(&options)
        .default(0)
        .interact_opt()?;

    match selection {
        None => Ok(None),
        Some(idx) if idx < recent_paths.len() => Ok(Some(recent_paths[idx].clone())),
        Some(_) => {
            let path: String = Input::new()
                .with_prompt(t!("anonymizer.prompt_source"))
                .interact_text()?;
            Ok(Some(path.trim().to_string()))
        }
    }
}

pub(crate) fn prompt_text(prompt: &str, default: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    Ok(value.trim().to_string())
}

pub(crate) fn prompt_code_length(default: usize) -> Result<usize> {
    let value: usize = Input::new()
        .with_prompt(t!("anonymizer.prompt_code_length"))
        .default(default)
        .validate_with(|n: &usize| {
            if (1..=MAX_CODE_LENGTH).contains(n) {
                Ok(())
            } else {
                Err(format!("1 ~ {MAX_CODE_LENGTH}"))
            }
        })
        .interact_text()?;
    Ok(value)
}

/// 詢問 salt 檔案路徑並讀取內容，回傳 (檔案路徑, salt)
pub(crate) fn prompt_salt(default_file: &str) -> Result<(String, String)> {
    let salt_file = prompt_text(&t!("anonymizer.prompt_salt"), default_file)?;
    validate_file_exists(Path::new(&salt_file))?;
    let salt = read_salt(Path::new(&salt_file))?;
    Ok((salt_file, salt))
}
