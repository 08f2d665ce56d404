use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;
use std::{
    borrow::Cow,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use crate::services::{RoundingContext, quantize_settlement};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SharedItemId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "person-{}", self.0)
    }
}

impl fmt::Display for SharedItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shared-{}", self.0)
    }
}

/// Monetary amount backed by a 96-bit decimal.
///
/// Addition saturates at the decimal range limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Divides the amount into `parts` equal shares without rounding.
    ///
    /// Returns `None` when `parts` is zero.
    pub fn divide(self, parts: usize) -> Option<Self> {
        self.0.checked_div(Decimal::from(parts)).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Raw text of an amount field, exactly as it was entered.
///
/// Parsing is deferred to settlement time and never fails: see [`AmountInput::parse`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AmountInput(String);

impl AmountInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads the longest leading numeric prefix of the field.
    ///
    /// Leading whitespace is skipped. Empty text, text without a numeric
    /// prefix, and values outside the decimal range all read as zero.
    pub fn parse(&self) -> Money {
        parse_numeric_prefix(&self.0).map_or(Money::ZERO, Money)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Money> for AmountInput {
    fn from(value: Money) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for AmountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_numeric_prefix(text: &str) -> Option<Decimal> {
    let bytes = text.trim_start().as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_len = digits_from(pos);
    let int_part = &bytes[pos..pos + int_len];
    pos += int_len;

    let mut frac_part: &[u8] = &[];
    if bytes.get(pos) == Some(&b'.') {
        let frac_len = digits_from(pos + 1);
        frac_part = &bytes[pos + 1..pos + 1 + frac_len];
        pos += 1 + frac_len;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut mantissa = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        mantissa.push('-');
    }
    if int_part.is_empty() {
        mantissa.push('0');
    } else {
        mantissa.extend(int_part.iter().map(|&b| b as char));
    }
    if !frac_part.is_empty() {
        mantissa.push('.');
        mantissa.extend(frac_part.iter().map(|&b| b as char));
    }

    let exponent = match bytes.get(pos) {
        Some(b'e' | b'E') => {
            let sign_len = usize::from(matches!(bytes.get(pos + 1), Some(b'+' | b'-')));
            let exp_len = digits_from(pos + 1 + sign_len);
            (exp_len > 0).then(|| &bytes[pos + 1..pos + 1 + sign_len + exp_len])
        }
        _ => None,
    };

    match exponent {
        Some(exp) => {
            let exp: String = exp.iter().map(|&b| b as char).collect();
            Decimal::from_scientific(&format!("{mantissa}e{exp}")).ok()
        }
        None => Decimal::from_str(&mantissa).ok(),
    }
}

/// One person splitting the bill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub(crate) id: ParticipantId,
    pub(crate) name: String,
    pub(crate) item_costs: Vec<AmountInput>,
}

impl Participant {
    pub fn new(id: ParticipantId) -> Self {
        Self {
            id,
            name: String::new(),
            item_costs: Vec::new(),
        }
    }

    pub fn with_items(
        id: ParticipantId,
        name: impl Into<String>,
        item_costs: impl IntoIterator<Item = AmountInput>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            item_costs: item_costs.into_iter().collect(),
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_costs(&self) -> &[AmountInput] {
        &self.item_costs
    }

    pub fn item_count(&self) -> usize {
        self.item_costs.len()
    }

    /// Name shown for the participant at `position` (0-based slot).
    pub fn display_name(&self, position: usize) -> Cow<'_, str> {
        if self.name.is_empty() {
            Cow::Owned(format!("Person {}", position + 1))
        } else {
            Cow::Borrowed(&self.name)
        }
    }

    pub fn individual_spending(&self) -> Money {
        self.item_costs.iter().map(AmountInput::parse).sum()
    }
}

/// A cost divided among a subset of participants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedItem {
    pub(crate) id: SharedItemId,
    pub(crate) name: String,
    pub(crate) cost: AmountInput,
    pub(crate) shared_by: IndexSet<ParticipantId>,
}

impl SharedItem {
    pub fn new(id: SharedItemId) -> Self {
        Self {
            id,
            name: String::new(),
            cost: AmountInput::empty(),
            shared_by: IndexSet::new(),
        }
    }

    pub fn with_sharers(
        id: SharedItemId,
        name: impl Into<String>,
        cost: impl Into<AmountInput>,
        shared_by: impl IntoIterator<Item = ParticipantId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cost: cost.into(),
            shared_by: shared_by.into_iter().collect(),
        }
    }

    pub fn id(&self) -> SharedItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> &AmountInput {
        &self.cost
    }

    pub fn shared_by(&self) -> &IndexSet<ParticipantId> {
        &self.shared_by
    }

    pub fn is_shared_by(&self, participant: ParticipantId) -> bool {
        self.shared_by.contains(&participant)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SplitMode {
    /// Bill and tax divided equally among all participants.
    Evenly,
    /// Own items plus shared-item shares, tax divided equally.
    #[default]
    ByContribution,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillContext {
    pub total_bill: AmountInput,
    pub tax: AmountInput,
    pub participant_count: usize,
    pub split_mode: SplitMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExactBreakdown {
    Evenly {
        bill_share: Money,
        tax_share: Money,
    },
    ByContribution {
        individual_spending: Money,
        shared_contribution: Money,
        tax_share: Money,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExactShare {
    pub display_name: String,
    pub total: Money,
    pub breakdown: ExactBreakdown,
}

/// Unrounded settlement. Rounding is deferred to [`ExactSettlement::quantize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExactSettlement {
    pub split_mode: SplitMode,
    pub shares: IndexMap<ParticipantId, ExactShare>,
    /// Cost of shared items nobody is sharing; it is not charged to anyone.
    pub unassigned_shared_cost: Money,
}

impl ExactSettlement {
    pub fn get(&self, participant: ParticipantId) -> Option<&ExactShare> {
        self.shares.get(&participant)
    }

    pub fn total(&self) -> Money {
        self.shares.values().map(|share| share.total).sum()
    }

    pub fn quantize(&self, context: RoundingContext) -> SettlementResult {
        quantize_settlement(self, context)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Breakdown {
    Evenly {
        bill_share: Money,
        tax_share: Money,
    },
    ByContribution {
        contribution_share: Money,
        tax_share: Money,
    },
}

impl Breakdown {
    pub fn tax_share(&self) -> Money {
        match self {
            Breakdown::Evenly { tax_share, .. } | Breakdown::ByContribution { tax_share, .. } => {
                *tax_share
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantSettlement {
    pub display_name: String,
    pub total_owed: Money,
    pub breakdown: Breakdown,
}

/// Per-participant amounts rounded for display, in participant order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementResult {
    pub split_mode: SplitMode,
    pub entries: IndexMap<ParticipantId, ParticipantSettlement>,
    pub unassigned_shared_cost: Money,
}

impl SettlementResult {
    pub fn get(&self, participant: ParticipantId) -> Option<&ParticipantSettlement> {
        self.entries.get(&participant)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &ParticipantSettlement)> + '_ {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(text: &str) -> Money {
        Money::from_decimal(Decimal::from_str(text).unwrap())
    }

    #[rstest]
    #[case::plain("1000", dec("1000"))]
    #[case::fraction("12.75", dec("12.75"))]
    #[case::leading_fraction(".5", dec("0.5"))]
    #[case::trailing_dot("5.", dec("5"))]
    #[case::negative("-20", dec("-20"))]
    #[case::explicit_plus("+3", dec("3"))]
    #[case::leading_whitespace("  42", dec("42"))]
    #[case::trailing_garbage("12abc", dec("12"))]
    #[case::exponent(" 1.5e2", dec("150"))]
    #[case::negative_exponent("25e-1", dec("2.5"))]
    #[case::dangling_exponent("7e", dec("7"))]
    #[case::empty("", Money::ZERO)]
    #[case::letters("abc", Money::ZERO)]
    #[case::sign_only("-", Money::ZERO)]
    #[case::dot_only(".", Money::ZERO)]
    #[case::out_of_range("1e400", Money::ZERO)]
    fn amount_input_reads_numeric_prefix(#[case] text: &str, #[case] expected: Money) {
        assert_eq!(AmountInput::from(text).parse(), expected);
    }

    #[test]
    fn divide_by_zero_parts_is_none() {
        assert_eq!(Money::from_i64(10).divide(0), None);
        assert_eq!(Money::from_i64(10).divide(4), Some(dec("2.5")));
    }

    #[rstest]
    #[case::named("Asha", 0, "Asha")]
    #[case::unnamed_first("", 0, "Person 1")]
    #[case::unnamed_third("", 2, "Person 3")]
    fn display_name_falls_back_to_position(
        #[case] name: &str,
        #[case] position: usize,
        #[case] expected: &str,
    ) {
        let participant = Participant::with_items(ParticipantId(9), name, []);
        assert_eq!(participant.display_name(position), expected);
    }

    #[test]
    fn individual_spending_treats_blank_costs_as_zero() {
        let participant = Participant::with_items(
            ParticipantId(1),
            "",
            ["120.5", "", "oops", "79.5"].map(AmountInput::from),
        );
        assert_eq!(participant.individual_spending(), Money::from_i64(200));
    }
}
