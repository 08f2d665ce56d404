pub mod display_rounding;
pub mod participant_store;
pub mod settlement_calculator;

pub use display_rounding::{MAX_DISPLAY_SCALE, RoundingContext, RoundingMode, quantize_settlement};
pub use participant_store::{MAX_STORE_SLOTS, ParticipantStore, SharerToggle};
pub use settlement_calculator::{SettlementCalculator, compute_settlement};
