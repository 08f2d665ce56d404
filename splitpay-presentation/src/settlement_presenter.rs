use crate::text_table::{Alignment, TextTableBuilder};
use splitpay_domain::{Breakdown, Money, SettlementResult, SplitMode};
use splitpay_i18n as i18n;
use std::borrow::Cow;

pub struct SettlementPresenter<'a> {
    currency: &'a str,
}

impl<'a> SettlementPresenter<'a> {
    pub fn new(currency: &'a str) -> Self {
        Self { currency }
    }

    /// Renders the split mode heading, one row per participant and, when
    /// some shared cost went unassigned, a closing note.
    pub fn render(&self, result: &SettlementResult) -> String {
        let heading = match result.split_mode {
            SplitMode::Evenly => i18n::SPLIT_EVENLY,
            SplitMode::ByContribution => i18n::SPLIT_BY_CONTRIBUTION,
        };
        let share_header = match result.split_mode {
            SplitMode::Evenly => i18n::BILL_SHARE,
            SplitMode::ByContribution => i18n::CONTRIBUTION_SHARE,
        };

        let headers = [
            Cow::Borrowed(i18n::PERSON),
            Cow::Borrowed(i18n::AMOUNT_OWED),
            Cow::Borrowed(share_header),
            Cow::Borrowed(i18n::TAX_SHARE),
        ];
        let alignments = [
            Alignment::Left,
            Alignment::Right,
            Alignment::Right,
            Alignment::Right,
        ];

        let table = TextTableBuilder::new()
            .alignments(&alignments)
            .headers(&headers)
            .rows(result.iter().map(|(_, entry)| {
                let share = match entry.breakdown {
                    Breakdown::Evenly { bill_share, .. } => bill_share,
                    Breakdown::ByContribution {
                        contribution_share, ..
                    } => contribution_share,
                };
                [
                    Cow::Borrowed(entry.display_name.as_str()),
                    Cow::Owned(self.format_amount(entry.total_owed)),
                    Cow::Owned(self.format_amount(share)),
                    Cow::Owned(self.format_amount(entry.breakdown.tax_share())),
                ]
            }))
            .build();

        let mut output = format!("{heading}\n{table}");
        if !result.unassigned_shared_cost.is_zero() {
            output.push_str(&i18n::unassigned_shared_cost(
                self.format_amount(result.unassigned_shared_cost),
            ));
            output.push('\n');
        }
        output
    }

    pub fn format_amount(&self, amount: Money) -> String {
        if self.currency.is_empty() {
            amount.to_string()
        } else {
            format!("{} {amount}", self.currency)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use splitpay_domain::{
        AmountInput, BillContext, Participant, ParticipantId, SharedItem, SharedItemId,
        compute_settlement,
    };

    fn settle(split_mode: SplitMode, shared: &[SharedItem]) -> SettlementResult {
        let people = [
            Participant::with_items(ParticipantId(0), "Asha", [AmountInput::from("300")]),
            Participant::with_items(ParticipantId(1), "", [AmountInput::from("200")]),
        ];
        let context = BillContext {
            total_bill: "1000".into(),
            tax: "100".into(),
            participant_count: 2,
            split_mode,
        };
        compute_settlement(&people, shared, &context).unwrap()
    }

    #[rstest]
    fn renders_even_split() {
        let output = SettlementPresenter::new("Rs.").render(&settle(SplitMode::Evenly, &[]));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], i18n::SPLIT_EVENLY);
        assert!(lines[1].contains(i18n::BILL_SHARE));
        assert_eq!(lines.len(), 5);
        assert!(lines[3].starts_with("Asha"));
        assert!(lines[3].contains("Rs. 550.00"));
        assert!(lines[3].contains("Rs. 500.00"));
        assert!(lines[4].starts_with("Person 2"));
    }

    #[rstest]
    fn renders_contribution_split_with_unassigned_note() {
        let orphan = SharedItem::with_sharers(SharedItemId(0), "Cake", "75", Vec::new());
        let output = SettlementPresenter::new("")
            .render(&settle(SplitMode::ByContribution, &[orphan]));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], i18n::SPLIT_BY_CONTRIBUTION);
        assert!(lines[1].contains(i18n::CONTRIBUTION_SHARE));
        assert!(lines[3].contains("350.00"));
        assert!(lines[4].contains("250.00"));
        assert_eq!(
            lines.last().copied(),
            Some(i18n::unassigned_shared_cost("75.00").as_str())
        );
    }

    #[rstest]
    #[case::with_currency("Rs.", "Rs. 12.50")]
    #[case::without_currency("", "12.50")]
    fn formats_amounts(#[case] currency: &str, #[case] expected: &str) {
        let amount = splitpay_domain::RoundingContext::default()
            .round(AmountInput::from("12.5").parse());
        assert_eq!(SettlementPresenter::new(currency).format_amount(amount), expected);
    }
}
