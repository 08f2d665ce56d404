use crate::model::FormCommand;
use splitpay_domain::{
    AmountInput, BillContext, ParticipantId, ParticipantStore, RoundingContext,
    SettlementCalculator, SettlementResult, SharedItemId, SplitMode,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// The edit addressed a participant, item or shared item that does not exist.
    Ignored,
}

impl From<bool> for EditOutcome {
    fn from(applied: bool) -> Self {
        if applied { Self::Applied } else { Self::Ignored }
    }
}

/// Everything the bill form holds: bill totals, split mode and the
/// participant store. Settlement reads a snapshot of it on request.
#[derive(Clone, Debug, Default)]
pub struct BillForm {
    store: ParticipantStore,
    total_bill: AmountInput,
    tax: AmountInput,
    split_mode: SplitMode,
}

impl BillForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &ParticipantStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ParticipantStore {
        &mut self.store
    }

    pub fn total_bill(&self) -> &AmountInput {
        &self.total_bill
    }

    pub fn tax(&self) -> &AmountInput {
        &self.tax
    }

    pub fn split_mode(&self) -> SplitMode {
        self.split_mode
    }

    pub fn set_total_bill(&mut self, amount: impl Into<AmountInput>) {
        self.total_bill = amount.into();
    }

    pub fn set_tax(&mut self, amount: impl Into<AmountInput>) {
        self.tax = amount.into();
    }

    pub fn set_split_mode(&mut self, split_mode: SplitMode) {
        self.split_mode = split_mode;
    }

    pub fn bill_context(&self) -> BillContext {
        BillContext {
            total_bill: self.total_bill.clone(),
            tax: self.tax.clone(),
            participant_count: self.store.participant_count(),
            split_mode: self.split_mode,
        }
    }

    pub fn calculate(&self, rounding: RoundingContext) -> Option<SettlementResult> {
        SettlementCalculator.calculate(
            self.store.participants(),
            self.store.shared_items(),
            &self.bill_context(),
            rounding,
        )
    }

    fn participant_id(&self, position: usize) -> Option<ParticipantId> {
        let index = position.checked_sub(1)?;
        self.store.participant_at(index).map(|p| p.id())
    }

    fn shared_item_id(&self, position: usize) -> Option<SharedItemId> {
        let index = position.checked_sub(1)?;
        self.store.shared_item_at(index).map(|item| item.id())
    }

    /// Applies one edit. `Calculate` leaves the form unchanged; see
    /// [`BillForm::calculate`].
    pub fn apply(&mut self, command: &FormCommand) -> EditOutcome {
        match command {
            FormCommand::SetTotalBill(amount) => {
                self.total_bill = amount.clone();
                EditOutcome::Applied
            }
            FormCommand::SetTax(amount) => {
                self.tax = amount.clone();
                EditOutcome::Applied
            }
            FormCommand::SetParticipantCount(count) => {
                self.store.set_participant_count(*count);
                EditOutcome::Applied
            }
            FormCommand::SetSplitMode(split_mode) => {
                self.split_mode = *split_mode;
                EditOutcome::Applied
            }
            FormCommand::RenameParticipant { person, name } => self
                .participant_id(*person)
                .is_some_and(|id| self.store.rename_participant(id, name.as_str()))
                .into(),
            FormCommand::SetItemCount { person, count } => self
                .participant_id(*person)
                .is_some_and(|id| self.store.set_item_count(id, *count))
                .into(),
            FormCommand::SetItemCost {
                person,
                item,
                amount,
            } => match (self.participant_id(*person), item.checked_sub(1)) {
                (Some(id), Some(index)) => {
                    self.store.set_item_cost(id, index, amount.clone()).into()
                }
                _ => EditOutcome::Ignored,
            },
            FormCommand::AddSharedItem => {
                self.store.add_shared_item();
                EditOutcome::Applied
            }
            FormCommand::RemoveSharedItem { item } => self
                .shared_item_id(*item)
                .is_some_and(|id| self.store.remove_shared_item(id))
                .into(),
            FormCommand::RenameSharedItem { item, name } => self
                .shared_item_id(*item)
                .is_some_and(|id| self.store.set_shared_item_name(id, name.as_str()))
                .into(),
            FormCommand::SetSharedItemCost { item, amount } => self
                .shared_item_id(*item)
                .is_some_and(|id| self.store.set_shared_item_cost(id, amount.clone()))
                .into(),
            FormCommand::ToggleSharer { item, person } => {
                match (self.shared_item_id(*item), self.participant_id(*person)) {
                    (Some(item_id), Some(person_id)) => self
                        .store
                        .toggle_sharer(item_id, person_id)
                        .is_some()
                        .into(),
                    _ => EditOutcome::Ignored,
                }
            }
            FormCommand::Calculate => EditOutcome::Applied,
        }
    }
}
