use crate::{FormScript, error::ScriptParseError};

pub trait CommandParser: Send + Sync {
    fn parse(&self, content: &str) -> Result<FormScript, ScriptParseError>;
}
