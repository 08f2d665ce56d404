#![warn(clippy::uninlined_format_args)]

pub mod bill_form;
pub mod error;
pub mod form_processor;
pub mod model;
pub mod ports;

pub use bill_form::{BillForm, EditOutcome};
pub use error::ScriptParseError;
pub use form_processor::{Calculation, FormProcessor, ScriptRun};
pub use model::{
    FormCommand, FormCommandWithLine, FormScript, MAX_FORM_COUNT, item_count_from_text,
    participant_count_from_text,
};
pub use ports::CommandParser;
