#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptParseError {
    #[error("Syntax error at line {line}: {detail}")]
    SyntaxError { line: usize, detail: String },
    #[error("Position {position} at line {line} is out of range")]
    PositionOutOfRange { position: u64, line: usize },
}
