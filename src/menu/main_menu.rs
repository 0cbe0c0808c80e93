use crate::component::anonymizer::MAX_CODE_LENGTH;
use crate::config::save::save_settings;
use crate::config::types::{Config, Language};
use crate::menu::handlers::{
    run_anonymizer, run_index_lookup, run_index_recover, run_index_verify,
};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_anonymize"),
        t!("main_menu.opt_lookup"),
        t!("main_menu.opt_verify"),
        t!("main_menu.opt_recover"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_anonymizer(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            run_index_lookup(term, config)?;
            Ok(true)
        }
        Some(2) => {
            run_index_verify(term, config)?;
            Ok(true)
        }
        Some(3) => {
            run_index_recover(term, config)?;
            Ok(true)
        }
        Some(4) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(5) | None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_code_length"),
            t!("settings.opt_language"),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_code_length_menu(term, config)?,
            Some(1) => show_language_menu(term, config)?,
            Some(2) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// 預設 code length 設定
fn show_code_length_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.code_length.title")).cyan().bold());
    println!(
        "\n{} {}",
        style(t!("settings.code_length.current")).dim(),
        config.settings.anonymizer.code_length
    );
    println!("{}", style(t!("settings.code_length.hint")).dim());
    println!();

    let code_length: usize = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("anonymizer.prompt_code_length"))
        .default(config.settings.anonymizer.code_length)
        .validate_with(|n: &usize| {
            if (1..=MAX_CODE_LENGTH).contains(n) {
                Ok(())
            } else {
                Err(format!("1 ~ {MAX_CODE_LENGTH}"))
            }
        })
        .interact_text_on(term)?;

    if code_length != config.settings.anonymizer.code_length {
        config.settings.anonymizer.code_length = code_length;
        save_settings(&config.settings)?;
        println!("\n{} {}", style(t!("settings.saved")).green(), code_length);
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = [Language::EnUs, Language::ZhTw];

    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();

    let default_index = languages
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = languages[selection];

    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        save_settings(&config.settings)?;
        println!(
            "\n{} {}",
            style(t!("settings.saved")).green(),
            selected_lang
        );
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}
