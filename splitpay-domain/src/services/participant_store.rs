use crate::model::{AmountInput, Participant, ParticipantId, SharedItem, SharedItemId};
use indexmap::IndexMap;

/// Upper bound for participants in a store and items per participant.
pub const MAX_STORE_SLOTS: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SharerToggle {
    Added,
    Removed,
}

/// In-memory participants and shared items of one bill.
///
/// Participants are ordered by slot; a participant's position is its 0-based
/// slot index. Ids come from per-store counters and are never reused, so a
/// slot dropped by a resize and later re-added gets a fresh id.
///
/// Edits addressing an unknown id are ignored and report `false` (or `None`).
#[derive(Clone, Debug)]
pub struct ParticipantStore {
    participants: IndexMap<ParticipantId, Participant>,
    shared_items: IndexMap<SharedItemId, SharedItem>,
    next_participant_id: u64,
    next_shared_item_id: u64,
}

impl Default for ParticipantStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticipantStore {
    /// A store with a single unnamed participant.
    pub fn new() -> Self {
        Self::with_participants(1)
    }

    pub fn with_participants(count: usize) -> Self {
        let mut store = Self {
            participants: IndexMap::new(),
            shared_items: IndexMap::new(),
            next_participant_id: 0,
            next_shared_item_id: 0,
        };
        store.set_participant_count(count);
        store
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn participants(&self) -> impl ExactSizeIterator<Item = &Participant> + '_ {
        self.participants.values()
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    pub fn participant_at(&self, position: usize) -> Option<&Participant> {
        self.participants.get_index(position).map(|(_, p)| p)
    }

    pub fn position_of(&self, id: ParticipantId) -> Option<usize> {
        self.participants.get_index_of(&id)
    }

    pub fn shared_items(&self) -> impl ExactSizeIterator<Item = &SharedItem> + '_ {
        self.shared_items.values()
    }

    pub fn shared_item(&self, id: SharedItemId) -> Option<&SharedItem> {
        self.shared_items.get(&id)
    }

    pub fn shared_item_at(&self, position: usize) -> Option<&SharedItem> {
        self.shared_items.get_index(position).map(|(_, item)| item)
    }

    /// Resizes to `count` participants, clamped to `1..=MAX_STORE_SLOTS`.
    ///
    /// The first `count` slots keep their data; extra slots are dropped and
    /// missing ones are appended unnamed with no items. Sharer sets are then
    /// pruned of ids that no longer exist.
    pub fn set_participant_count(&mut self, count: usize) {
        let count = count.clamp(1, MAX_STORE_SLOTS);
        let before = self.participants.len();

        if count < before {
            self.participants.truncate(count);
        } else {
            for _ in before..count {
                let id = ParticipantId(self.next_participant_id);
                self.next_participant_id += 1;
                self.participants.insert(id, Participant::new(id));
            }
        }

        let participants = &self.participants;
        for item in self.shared_items.values_mut() {
            item.shared_by.retain(|id| participants.contains_key(id));
        }

        tracing::debug!(before, after = count, "Resized participants");
    }

    pub fn rename_participant(&mut self, id: ParticipantId, name: impl Into<String>) -> bool {
        let Some(participant) = self.participants.get_mut(&id) else {
            tracing::debug!(%id, "Ignoring rename of unknown participant");
            return false;
        };
        participant.name = name.into();
        true
    }

    /// Sets how many items a participant owns. Costs at indexes below both the
    /// old and new count are kept; new slots start empty. Counts above
    /// `MAX_STORE_SLOTS` are clamped.
    pub fn set_item_count(&mut self, id: ParticipantId, count: usize) -> bool {
        let Some(participant) = self.participants.get_mut(&id) else {
            tracing::debug!(%id, "Ignoring item count for unknown participant");
            return false;
        };
        participant
            .item_costs
            .resize(count.min(MAX_STORE_SLOTS), AmountInput::empty());
        true
    }

    /// Writes one item cost. The index must be below the current item count;
    /// the cost list is never extended here.
    pub fn set_item_cost(
        &mut self,
        id: ParticipantId,
        index: usize,
        value: impl Into<AmountInput>,
    ) -> bool {
        let Some(slot) = self
            .participants
            .get_mut(&id)
            .and_then(|participant| participant.item_costs.get_mut(index))
        else {
            tracing::debug!(%id, index, "Ignoring item cost outside current items");
            return false;
        };
        *slot = value.into();
        true
    }

    pub fn add_shared_item(&mut self) -> SharedItemId {
        let id = SharedItemId(self.next_shared_item_id);
        self.next_shared_item_id += 1;
        self.shared_items.insert(id, SharedItem::new(id));
        id
    }

    pub fn remove_shared_item(&mut self, id: SharedItemId) -> bool {
        self.shared_items.shift_remove(&id).is_some()
    }

    pub fn set_shared_item_name(&mut self, id: SharedItemId, name: impl Into<String>) -> bool {
        let Some(item) = self.shared_items.get_mut(&id) else {
            tracing::debug!(%id, "Ignoring rename of unknown shared item");
            return false;
        };
        item.name = name.into();
        true
    }

    pub fn set_shared_item_cost(&mut self, id: SharedItemId, cost: impl Into<AmountInput>) -> bool {
        let Some(item) = self.shared_items.get_mut(&id) else {
            tracing::debug!(%id, "Ignoring cost of unknown shared item");
            return false;
        };
        item.cost = cost.into();
        true
    }

    /// Adds the participant to the item's sharers, or removes them if present.
    ///
    /// Returns `None` when either id is unknown.
    pub fn toggle_sharer(
        &mut self,
        item_id: SharedItemId,
        participant_id: ParticipantId,
    ) -> Option<SharerToggle> {
        if !self.participants.contains_key(&participant_id) {
            tracing::debug!(%participant_id, "Ignoring toggle for unknown participant");
            return None;
        }
        let item = self.shared_items.get_mut(&item_id)?;

        if item.shared_by.shift_remove(&participant_id) {
            Some(SharerToggle::Removed)
        } else {
            item.shared_by.insert(participant_id);
            Some(SharerToggle::Added)
        }
    }
}
