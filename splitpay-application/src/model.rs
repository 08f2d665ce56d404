use splitpay_domain::{AmountInput, MAX_STORE_SLOTS, SplitMode};

/// A single edit of the bill form.
///
/// Participants, items and shared items are addressed by 1-based display
/// position, the way they appear on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    SetTotalBill(AmountInput),
    SetTax(AmountInput),
    SetParticipantCount(usize),
    SetSplitMode(SplitMode),
    RenameParticipant {
        person: usize,
        name: String,
    },
    SetItemCount {
        person: usize,
        count: usize,
    },
    SetItemCost {
        person: usize,
        item: usize,
        amount: AmountInput,
    },
    AddSharedItem,
    RemoveSharedItem {
        item: usize,
    },
    RenameSharedItem {
        item: usize,
        name: String,
    },
    SetSharedItemCost {
        item: usize,
        amount: AmountInput,
    },
    ToggleSharer {
        item: usize,
        person: usize,
    },
    Calculate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCommandWithLine {
    pub line: usize,
    pub command: FormCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormScript {
    commands: Vec<FormCommandWithLine>,
}

impl FormScript {
    pub fn new(commands: Vec<FormCommandWithLine>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[FormCommandWithLine] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<FormCommandWithLine> {
        self.commands
    }
}

/// Upper bound for participant and item counts read from text.
pub const MAX_FORM_COUNT: usize = MAX_STORE_SLOTS;

// Leading integer of `text`, after optional whitespace and sign.
fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    let value = &trimmed[..sign_len + digits];
    // Overlong digit runs saturate rather than fall back.
    value.parse::<i64>().ok().or(Some(if value.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

/// Participant count as typed into the form: a missing or zero count means
/// one participant, and anything below one is raised to one.
pub fn participant_count_from_text(text: &str) -> usize {
    match leading_integer(text) {
        Some(value) if value >= 1 => usize::try_from(value).map_or(MAX_FORM_COUNT, |count| {
            count.min(MAX_FORM_COUNT)
        }),
        _ => 1,
    }
}

/// Item count as typed into the form: unreadable or negative counts mean no items.
pub fn item_count_from_text(text: &str) -> usize {
    leading_integer(text)
        .and_then(|value| usize::try_from(value).ok())
        .map_or(0, |count| count.min(MAX_FORM_COUNT))
}
