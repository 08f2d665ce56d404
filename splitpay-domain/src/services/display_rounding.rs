//! Display rounding for settlement amounts.
//!
//! Settlement accumulates unrounded decimals; rounding happens exactly once,
//! here, when an [`ExactSettlement`] is turned into a [`SettlementResult`].
//! Each displayed figure is rounded on its own, so the rounded parts of a
//! breakdown may differ from the rounded total by one unit of the last place.

use crate::model::{
    Breakdown, ExactBreakdown, ExactSettlement, Money, ParticipantSettlement, SettlementResult,
};
use rust_decimal::RoundingStrategy;

/// Rounding mode for display quantization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (e.g., 0.125 -> 0.13, -0.125 -> -0.13).
    #[default]
    HalfUp,
    /// Round half to nearest even digit (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// How settlement amounts are rounded for display.
///
/// # Example
/// ```
/// use splitpay_domain::services::{RoundingContext, RoundingMode};
///
/// let ctx = RoundingContext {
///     scale: 2,
///     rounding_mode: RoundingMode::HalfUp,
/// };
/// assert_eq!(ctx, RoundingContext::default());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundingContext {
    /// Number of decimal places shown (2 for cents or paise).
    pub scale: u32,
    pub rounding_mode: RoundingMode,
}

pub const MAX_DISPLAY_SCALE: u32 = 28;

impl Default for RoundingContext {
    fn default() -> Self {
        Self {
            scale: 2,
            rounding_mode: RoundingMode::HalfUp,
        }
    }
}

impl RoundingContext {
    /// Rounds `amount` and pins its scale, so `Display` always prints
    /// exactly `scale` fractional digits.
    pub fn round(self, amount: Money) -> Money {
        let scale = self.scale.min(MAX_DISPLAY_SCALE);
        let mut value = amount
            .as_decimal()
            .round_dp_with_strategy(scale, self.rounding_mode.strategy());
        value.rescale(scale);
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        Money::from_decimal(value)
    }
}

pub fn quantize_settlement(exact: &ExactSettlement, context: RoundingContext) -> SettlementResult {
    let entries = exact
        .shares
        .iter()
        .map(|(id, share)| {
            let breakdown = match share.breakdown {
                ExactBreakdown::Evenly {
                    bill_share,
                    tax_share,
                } => Breakdown::Evenly {
                    bill_share: context.round(bill_share),
                    tax_share: context.round(tax_share),
                },
                ExactBreakdown::ByContribution {
                    individual_spending,
                    shared_contribution,
                    tax_share,
                } => Breakdown::ByContribution {
                    contribution_share: context.round(individual_spending + shared_contribution),
                    tax_share: context.round(tax_share),
                },
            };

            let entry = ParticipantSettlement {
                display_name: share.display_name.clone(),
                total_owed: context.round(share.total),
                breakdown,
            };
            (*id, entry)
        })
        .collect();

    SettlementResult {
        split_mode: exact.split_mode,
        entries,
        unassigned_shared_cost: context.round(exact.unassigned_shared_cost),
    }
}
