use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use rust_i18n::t;
use std::path::Path;

/// 會覆蓋既有資料的操作
#[derive(Debug, Clone, Copy)]
pub enum ConfirmRequest<'a> {
    /// 目的資料夾已存在，確認後會整個刪除
    OverwriteDestination(&'a Path),
    /// 索引檔案已存在，確認後會被覆寫
    OverwriteIndex(&'a Path),
}

pub trait ConfirmPrompt {
    fn confirm(&self, request: ConfirmRequest<'_>) -> Result<bool>;
}

/// 以終端機詢問使用者
pub struct DialoguerPrompt;

impl ConfirmPrompt for DialoguerPrompt {
    fn confirm(&self, request: ConfirmRequest<'_>) -> Result<bool> {
        let prompt = match request {
            ConfirmRequest::OverwriteDestination(path) => {
                println!(
                    "{}",
                    style(t!("anonymizer.dest_exists", path = path.display())).yellow()
                );
                t!("anonymizer.confirm_overwrite_dest")
            }
            ConfirmRequest::OverwriteIndex(path) => {
                println!(
                    "{}",
                    style(t!("anonymizer.index_exists", path = path.display())).yellow()
                );
                println!("{}", style(t!("anonymizer.dangerous")).red().bold());
                t!("anonymizer.confirm_overwrite_index")
            }
        };

        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }
}
