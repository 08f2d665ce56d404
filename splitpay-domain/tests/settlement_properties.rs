use proptest::prelude::*;
use rust_decimal::Decimal;
use splitpay_domain::{
    AmountInput, BillContext, ExactBreakdown, Money, Participant, ParticipantStore,
    SettlementCalculator, SplitMode,
};

fn cents(value: u64) -> AmountInput {
    AmountInput::from(Money::from_decimal(Decimal::new(value as i64, 2)))
}

fn context(
    bill: AmountInput,
    tax: AmountInput,
    count: usize,
    split_mode: SplitMode,
) -> BillContext {
    BillContext {
        total_bill: bill,
        tax,
        participant_count: count,
        split_mode,
    }
}

proptest! {
    #[test]
    fn even_shares_sum_to_bill_and_tax(
        count in 1usize..=12,
        bill in 0u64..=10_000_000,
        tax in 0u64..=1_000_000,
    ) {
        let store = ParticipantStore::with_participants(count);
        let ctx = context(cents(bill), cents(tax), count, SplitMode::Evenly);
        let exact = SettlementCalculator
            .calculate_exact(store.participants(), store.shared_items(), &ctx)
            .expect("participants present");

        let parts: Money = exact
            .shares
            .values()
            .map(|share| match share.breakdown {
                ExactBreakdown::Evenly { bill_share, tax_share } => bill_share + tax_share,
                ExactBreakdown::ByContribution { .. } => Money::ZERO,
            })
            .sum();
        let expected = (ctx.total_bill.parse() + ctx.tax.parse()).as_decimal();
        let tolerance = Decimal::new(1, 18);

        prop_assert_eq!(exact.shares.len(), count);
        prop_assert!((parts.as_decimal() - expected).abs() <= tolerance);
        prop_assert!((exact.total().as_decimal() - expected).abs() <= tolerance);
    }
}

proptest! {
    #[test]
    fn shared_item_splits_cost_among_sharers(
        count in 1usize..=8,
        cost in 0u64..=1_000_000,
        sharer_mask in 0u16..=255,
    ) {
        let mut store = ParticipantStore::with_participants(count);
        let people: Vec<_> = store.participants().map(Participant::id).collect();
        let item = store.add_shared_item();
        store.set_shared_item_cost(item, cents(cost));

        let mut sharers = Vec::new();
        for (idx, &person) in people.iter().enumerate() {
            if sharer_mask & (1 << idx) != 0 {
                store.toggle_sharer(item, person);
                sharers.push(person);
            }
        }

        let ctx = context(
            AmountInput::empty(),
            AmountInput::empty(),
            count,
            SplitMode::ByContribution,
        );
        let exact = SettlementCalculator
            .calculate_exact(store.participants(), store.shared_items(), &ctx)
            .expect("participants present");
        let cost = cents(cost).parse();

        for person in &people {
            let share = exact.get(*person).expect("share for every participant");
            let ExactBreakdown::ByContribution { shared_contribution, .. } = share.breakdown else {
                return Err(TestCaseError::fail("expected contribution breakdown"));
            };
            let expected = if sharers.contains(person) {
                cost.divide(sharers.len()).unwrap_or_default()
            } else {
                Money::ZERO
            };
            prop_assert_eq!(shared_contribution, expected);
        }

        if sharers.is_empty() {
            prop_assert_eq!(exact.total(), Money::ZERO);
            prop_assert_eq!(exact.unassigned_shared_cost, cost);
        } else {
            prop_assert_eq!(exact.unassigned_shared_cost, Money::ZERO);
        }
    }
}

proptest! {
    #[test]
    fn unshared_item_never_changes_totals(
        own_costs in prop::collection::vec(0u64..=100_000, 1..=6),
        orphan_cost in 0u64..=100_000,
        tax in 0u64..=10_000,
    ) {
        let mut store = ParticipantStore::with_participants(own_costs.len());
        let people: Vec<_> = store.participants().map(Participant::id).collect();
        for (person, cost) in people.iter().zip(&own_costs) {
            store.set_item_count(*person, 1);
            store.set_item_cost(*person, 0, cents(*cost));
        }
        let ctx = context(
            AmountInput::empty(),
            cents(tax),
            people.len(),
            SplitMode::ByContribution,
        );

        let before = SettlementCalculator
            .calculate_exact(store.participants(), store.shared_items(), &ctx)
            .expect("participants present");

        let orphan = store.add_shared_item();
        store.set_shared_item_cost(orphan, cents(orphan_cost));
        let after = SettlementCalculator
            .calculate_exact(store.participants(), store.shared_items(), &ctx)
            .expect("participants present");

        for person in &people {
            prop_assert_eq!(
                before.get(*person).map(|s| s.total),
                after.get(*person).map(|s| s.total)
            );
        }
    }
}

proptest! {
    #[test]
    fn resize_preserves_leading_participants(
        names in prop::collection::vec("[A-Za-z]{0,8}", 1..=8),
        target in 0usize..=10,
    ) {
        let mut store = ParticipantStore::with_participants(names.len());
        let people: Vec<_> = store.participants().map(Participant::id).collect();
        for (person, name) in people.iter().zip(&names) {
            store.rename_participant(*person, name.as_str());
        }
        let item = store.add_shared_item();
        for person in &people {
            store.toggle_sharer(item, *person);
        }

        store.set_participant_count(target);

        let expected_len = target.max(1);
        let kept = expected_len.min(names.len());
        prop_assert_eq!(store.participant_count(), expected_len);
        for idx in 0..kept {
            let participant = store.participant_at(idx).expect("kept slot");
            prop_assert_eq!(participant.id(), people[idx]);
            prop_assert_eq!(participant.name(), names[idx].as_str());
        }
        let sharers = store.shared_item(item).expect("item persists").shared_by();
        prop_assert_eq!(sharers.len(), kept);
        prop_assert!(sharers.iter().all(|id| store.participant(*id).is_some()));
    }
}

proptest! {
    #[test]
    fn item_count_resize_preserves_prefix(
        costs in prop::collection::vec(1u64..=99_999, 0..=8),
        target in 0usize..=10,
    ) {
        let mut store = ParticipantStore::new();
        let person = store.participant_at(0).expect("one participant").id();
        store.set_item_count(person, costs.len());
        for (index, cost) in costs.iter().enumerate() {
            store.set_item_cost(person, index, cents(*cost));
        }

        store.set_item_count(person, target);

        let stored = store.participant(person).expect("participant").item_costs();
        prop_assert_eq!(stored.len(), target);
        for (index, slot) in stored.iter().enumerate() {
            if index < costs.len() {
                prop_assert_eq!(slot, &cents(costs[index]));
            } else {
                prop_assert!(slot.is_empty());
            }
        }
    }
}

proptest! {
    #[test]
    fn toggling_twice_is_identity(
        count in 1usize..=6,
        initial_mask in 0u8..=63,
        toggled in 0usize..=5,
    ) {
        let mut store = ParticipantStore::with_participants(count);
        let people: Vec<_> = store.participants().map(Participant::id).collect();
        let item = store.add_shared_item();
        for (idx, person) in people.iter().enumerate() {
            if initial_mask & (1 << idx) != 0 {
                store.toggle_sharer(item, *person);
            }
        }
        let before = store.shared_item(item).expect("item").shared_by().clone();

        let target = people[toggled % count];
        store.toggle_sharer(item, target);
        store.toggle_sharer(item, target);

        // Sharer sets are unordered.
        let after = store.shared_item(item).expect("item").shared_by();
        prop_assert_eq!(after.len(), before.len());
        prop_assert!(before.iter().all(|id| after.contains(id)));
    }
}
