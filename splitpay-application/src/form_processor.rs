use crate::{
    bill_form::{BillForm, EditOutcome},
    error::ScriptParseError,
    model::{FormCommand, FormScript},
    ports::CommandParser,
};
use splitpay_domain::{RoundingContext, SettlementResult};

/// Result of one `calculate` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub line: usize,
    /// `None` only when the form has no participants.
    pub result: Option<SettlementResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptRun {
    pub calculations: Vec<Calculation>,
    /// Lines whose edit addressed something that does not exist.
    pub ignored_lines: Vec<usize>,
}

#[derive(Clone, Copy)]
pub struct FormProcessor<'a> {
    parser: &'a dyn CommandParser,
    rounding: RoundingContext,
}

impl<'a> FormProcessor<'a> {
    pub fn new(parser: &'a dyn CommandParser) -> Self {
        Self {
            parser,
            rounding: RoundingContext::default(),
        }
    }

    pub fn with_rounding(mut self, rounding: RoundingContext) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn rounding(&self) -> RoundingContext {
        self.rounding
    }

    pub fn parse_script(&self, content: &str) -> Result<FormScript, ScriptParseError> {
        self.parser.parse(content)
    }

    /// Applies a parsed script in order. Settlement is computed only where
    /// the script asks for it.
    pub fn apply_script(&self, form: &mut BillForm, script: &FormScript) -> ScriptRun {
        let mut run = ScriptRun::default();

        for entry in script.commands() {
            match &entry.command {
                FormCommand::Calculate => {
                    let result = form.calculate(self.rounding);
                    if result.is_none() {
                        tracing::warn!(line = entry.line, "Nothing to calculate");
                    }
                    run.calculations.push(Calculation {
                        line: entry.line,
                        result,
                    });
                }
                command => {
                    if form.apply(command) == EditOutcome::Ignored {
                        tracing::debug!(line = entry.line, ?command, "Edit ignored");
                        run.ignored_lines.push(entry.line);
                    }
                }
            }
        }

        run
    }

    pub fn run(&self, form: &mut BillForm, content: &str) -> Result<ScriptRun, ScriptParseError> {
        let script = self.parse_script(content)?;
        Ok(self.apply_script(form, &script))
    }
}
