#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    AmountInput, BillContext, Breakdown, ExactBreakdown, ExactSettlement, ExactShare, Money,
    Participant, ParticipantId, ParticipantSettlement, SettlementResult, SharedItem, SharedItemId,
    SplitMode,
};
pub use services::{
    MAX_DISPLAY_SCALE, MAX_STORE_SLOTS, ParticipantStore, RoundingContext, RoundingMode,
    SettlementCalculator, SharerToggle, compute_settlement,
};
