use splitpay_application::ScriptRun;
use splitpay_i18n as i18n;
use splitpay_presentation::SettlementPresenter;

/// Text printed for a finished script: one block per `calculate`,
/// separated by blank lines.
pub fn render_calculations(run: &ScriptRun, presenter: &SettlementPresenter<'_>) -> String {
    run.calculations
        .iter()
        .map(|calculation| match &calculation.result {
            Some(result) => presenter.render(result),
            None => format!("{}\n", i18n::NOTHING_TO_CALCULATE),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn ignored_edit_notes(run: &ScriptRun) -> impl Iterator<Item = String> + '_ {
    run.ignored_lines.iter().map(|line| i18n::ignored_edit(*line))
}
