use crate::component::{AnonymizerComponent, IndexLookup, IndexVerifier};
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use log::warn;
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

fn report_error(e: &anyhow::Error) {
    warn!("元件執行失敗: {e:#}");
    eprintln!("{} {:#}", style(t!("main_menu.error_prefix")).red().bold(), e);
}

pub fn run_anonymizer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let anonymizer = AnonymizerComponent::new(Arc::clone(shutdown_signal));

    if let Err(e) = anonymizer.run(&mut config.settings) {
        report_error(&e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_index_lookup(term: &Term, config: &Config) -> Result<()> {
    if let Err(e) = IndexLookup.run(&config.settings) {
        report_error(&e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_index_verify(term: &Term, config: &Config) -> Result<()> {
    if let Err(e) = IndexVerifier.run_verify(&config.settings) {
        report_error(&e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_index_recover(term: &Term, config: &Config) -> Result<()> {
    if let Err(e) = IndexVerifier.run_recover(&config.settings) {
        report_error(&e);
    }

    pause(term)?;
    Ok(())
}
