use super::resolver::resolve;
use crate::component::prompts::prompt_text;
use crate::config::UserSettings;
use crate::tools::{Index, validate_file_exists};
use anyhow::Result;
use console::style;
use dialoguer::Input;
use log::info;
use rust_i18n::t;
use std::path::Path;

/// 匿名名稱查詢元件
pub struct IndexLookup;

impl IndexLookup {
    pub fn run(&self, settings: &UserSettings) -> Result<()> {
        println!("{}", style(t!("lookup.title")).cyan().bold());

        let index_path = prompt_text(
            &t!("anonymizer.prompt_index"),
            &settings.anonymizer.index_path,
        )?;
        let index_path = Path::new(&index_path);
        validate_file_exists(index_path)?;

        let index = Index::load_from_file(index_path)?;
        println!(
            "{}",
            style(t!("lookup.loaded", count = index.len())).green()
        );
        info!("已載入索引 {} ({} 筆)", index_path.display(), index.len());

        loop {
            let query: String = Input::new()
                .with_prompt(t!("lookup.prompt"))
                .allow_empty(true)
                .interact_text()?;
            if query.trim().is_empty() {
                break;
            }

            match resolve(&index, &query) {
                Some(original) => println!("  {} {}", style("→").green(), original),
                None => println!("  {}", style(t!("lookup.not_found")).yellow()),
            }
        }

        Ok(())
    }
}
