mod bootstrap;
mod report;

use anyhow::{Context, bail};
use bootstrap::AppConfig;
use splitpay_application::{BillForm, FormProcessor};
use splitpay_infrastructure::SplitpayCommandParser;
use splitpay_presentation::{SettlementPresenter, format_script_parse_error};
use std::{fs, io::Read, path::Path, process};

fn main() {
    bootstrap::init_logging();

    if let Err(err) = run(&AppConfig::from_env()) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run(config: &AppConfig) -> anyhow::Result<()> {
    let content = read_script(config.script.as_deref(), std::io::stdin().lock())?;
    print!("{}", run_script(config, &content)?);
    Ok(())
}

/// Reads the script at `path`, or all of `stdin` when no path is given.
fn read_script(path: Option<&Path>, mut stdin: impl Read) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            let mut content = String::new();
            stdin
                .read_to_string(&mut content)
                .context("Failed to read script from stdin")?;
            Ok(content)
        }
    }
}

fn run_script(config: &AppConfig, content: &str) -> anyhow::Result<String> {
    let processor =
        FormProcessor::new(&SplitpayCommandParser).with_rounding(config.rounding_context());
    let mut form = BillForm::new();

    let script_run = match processor.run(&mut form, content) {
        Ok(script_run) => script_run,
        Err(err) => bail!(format_script_parse_error(&err)),
    };

    for note in report::ignored_edit_notes(&script_run) {
        tracing::warn!("{note}");
    }

    let presenter = SettlementPresenter::new(&config.currency);
    Ok(report::render_calculations(&script_run, &presenter))
}
