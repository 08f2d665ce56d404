use splitpay_application::ScriptParseError;
use splitpay_i18n as i18n;

pub fn format_script_parse_error(error: &ScriptParseError) -> String {
    match error {
        ScriptParseError::SyntaxError { line, detail } => {
            i18n::syntax_error(*line, detail.clone()).to_string()
        }
        ScriptParseError::PositionOutOfRange { position, line } => {
            i18n::syntax_error(*line, i18n::position_out_of_range(*position)).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::syntax(
        ScriptParseError::SyntaxError { line: 4, detail: "Unparsed input: 20".to_string() },
        i18n::syntax_error(4, "Unparsed input: 20".to_string()).to_string()
    )]
    #[case::position(
        ScriptParseError::PositionOutOfRange { position: u64::MAX, line: 2 },
        i18n::syntax_error(2, i18n::position_out_of_range(u64::MAX)).to_string()
    )]
    fn formats_parse_errors(#[case] error: ScriptParseError, #[case] expected: String) {
        assert_eq!(format_script_parse_error(&error), expected);
    }
}
