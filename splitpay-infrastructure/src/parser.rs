use splitpay_application::{
    CommandParser, FormCommand, FormCommandWithLine, FormScript, ScriptParseError,
    item_count_from_text, participant_count_from_text,
};
use splitpay_domain::{AmountInput, SplitMode};
use splitpay_parser::{ParseError, SplitKeyword, Statement, StatementWithLine, parse_script};

#[derive(Default)]
pub struct SplitpayCommandParser;

impl CommandParser for SplitpayCommandParser {
    fn parse(&self, content: &str) -> Result<FormScript, ScriptParseError> {
        let script = parse_script(content).map_err(|err| match err {
            ParseError::SyntaxError { line, detail } => {
                ScriptParseError::SyntaxError { line, detail }
            }
        })?;

        let commands = script
            .statements
            .into_iter()
            .map(to_form_command)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FormScript::new(commands))
    }
}

fn to_form_command(
    StatementWithLine { line, statement }: StatementWithLine<'_>,
) -> Result<FormCommandWithLine, ScriptParseError> {
    let position = |value: u64| {
        usize::try_from(value).map_err(|_| ScriptParseError::PositionOutOfRange {
            position: value,
            line,
        })
    };

    let command = match statement {
        Statement::TotalBill(amount) => FormCommand::SetTotalBill(AmountInput::from(amount)),
        Statement::Tax(amount) => FormCommand::SetTax(AmountInput::from(amount)),
        Statement::People(count) => {
            FormCommand::SetParticipantCount(participant_count_from_text(count))
        }
        Statement::Mode(keyword) => FormCommand::SetSplitMode(match keyword {
            SplitKeyword::Evenly => SplitMode::Evenly,
            SplitKeyword::Contribution => SplitMode::ByContribution,
        }),
        Statement::Name { person, name } => FormCommand::RenameParticipant {
            person: position(person)?,
            name: name.to_string(),
        },
        Statement::Items { person, count } => FormCommand::SetItemCount {
            person: position(person)?,
            count: item_count_from_text(count),
        },
        Statement::Cost {
            person,
            item,
            amount,
        } => FormCommand::SetItemCost {
            person: position(person)?,
            item: position(item)?,
            amount: AmountInput::from(amount),
        },
        Statement::SharedAdd => FormCommand::AddSharedItem,
        Statement::SharedRemove { item } => FormCommand::RemoveSharedItem {
            item: position(item)?,
        },
        Statement::SharedName { item, name } => FormCommand::RenameSharedItem {
            item: position(item)?,
            name: name.to_string(),
        },
        Statement::SharedCost { item, amount } => FormCommand::SetSharedItemCost {
            item: position(item)?,
            amount: AmountInput::from(amount),
        },
        Statement::Share { item, person } => FormCommand::ToggleSharer {
            item: position(item)?,
            person: position(person)?,
        },
        Statement::Calculate => FormCommand::Calculate,
    };

    Ok(FormCommandWithLine { line, command })
}
