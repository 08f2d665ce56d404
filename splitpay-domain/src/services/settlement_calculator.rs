use crate::model::{
    BillContext, ExactBreakdown, ExactSettlement, ExactShare, Money, Participant, ParticipantId,
    SettlementResult, SharedItem, SplitMode,
};
use crate::services::RoundingContext;
use indexmap::IndexMap;

/// Settlement calculation service
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Calculate unrounded shares for every participant.
    ///
    /// # Arguments
    /// * `participants` - Participants in slot order
    /// * `shared_items` - Shared items; ignored when splitting evenly
    /// * `context` - Bill totals, participant count and split mode
    ///
    /// # Returns
    /// `None` when the participant count is zero, otherwise one share per
    /// participant in the given order
    pub fn calculate_exact<'a, P, S>(
        &self,
        participants: P,
        shared_items: S,
        context: &BillContext,
    ) -> Option<ExactSettlement>
    where
        P: IntoIterator<Item = &'a Participant>,
        S: IntoIterator<Item = &'a SharedItem>,
    {
        let count = context.participant_count;
        if count == 0 {
            tracing::debug!("No participants; skipping settlement");
            return None;
        }

        let bill = context.total_bill.parse();
        let tax = context.tax.parse();
        let tax_share = tax.divide(count)?;

        let settlement = match context.split_mode {
            SplitMode::Evenly => {
                let per_person = (bill + tax).divide(count)?;
                let bill_share = bill.divide(count)?;
                let shares = participants
                    .into_iter()
                    .enumerate()
                    .map(|(position, participant)| {
                        let share = ExactShare {
                            display_name: participant.display_name(position).into_owned(),
                            total: per_person,
                            breakdown: ExactBreakdown::Evenly {
                                bill_share,
                                tax_share,
                            },
                        };
                        (participant.id(), share)
                    })
                    .collect();

                ExactSettlement {
                    split_mode: SplitMode::Evenly,
                    shares,
                    unassigned_shared_cost: Money::ZERO,
                }
            }
            SplitMode::ByContribution => {
                let participants: Vec<&Participant> = participants.into_iter().collect();
                let mut shared: IndexMap<ParticipantId, Money> = participants
                    .iter()
                    .map(|participant| (participant.id(), Money::ZERO))
                    .collect();
                let mut unassigned = Money::ZERO;

                for item in shared_items {
                    let cost = item.cost().parse();
                    let sharers = item.shared_by();
                    let Some(per_sharer) = cost.divide(sharers.len()) else {
                        if !cost.is_zero() {
                            tracing::warn!(
                                item = %item.id(),
                                %cost,
                                "Shared item has no sharers; its cost is not charged to anyone"
                            );
                        }
                        unassigned += cost;
                        continue;
                    };

                    for sharer in sharers {
                        match shared.get_mut(sharer) {
                            Some(total) => *total += per_sharer,
                            None => tracing::debug!(%sharer, "Sharer is not a participant"),
                        }
                    }
                }

                let shares = participants
                    .iter()
                    .enumerate()
                    .map(|(position, participant)| {
                        let individual_spending = participant.individual_spending();
                        let shared_contribution =
                            shared.get(&participant.id()).copied().unwrap_or_default();
                        let share = ExactShare {
                            display_name: participant.display_name(position).into_owned(),
                            total: individual_spending + shared_contribution + tax_share,
                            breakdown: ExactBreakdown::ByContribution {
                                individual_spending,
                                shared_contribution,
                                tax_share,
                            },
                        };
                        (participant.id(), share)
                    })
                    .collect();

                ExactSettlement {
                    split_mode: SplitMode::ByContribution,
                    shares,
                    unassigned_shared_cost: unassigned,
                }
            }
        };

        tracing::debug!(
            mode = ?settlement.split_mode,
            participants = settlement.shares.len(),
            "Computed settlement"
        );
        Some(settlement)
    }

    /// Calculate shares and round them for display.
    pub fn calculate<'a, P, S>(
        &self,
        participants: P,
        shared_items: S,
        context: &BillContext,
        rounding: RoundingContext,
    ) -> Option<SettlementResult>
    where
        P: IntoIterator<Item = &'a Participant>,
        S: IntoIterator<Item = &'a SharedItem>,
    {
        self.calculate_exact(participants, shared_items, context)
            .map(|exact| exact.quantize(rounding))
    }
}

/// Settlement rounded to two decimal places, half away from zero.
pub fn compute_settlement<'a, P, S>(
    participants: P,
    shared_items: S,
    context: &BillContext,
) -> Option<SettlementResult>
where
    P: IntoIterator<Item = &'a Participant>,
    S: IntoIterator<Item = &'a SharedItem>,
{
    SettlementCalculator.calculate(participants, shared_items, context, RoundingContext::default())
}
