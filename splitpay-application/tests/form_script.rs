use rstest::{fixture, rstest};
use splitpay_application::{BillForm, FormProcessor, ScriptParseError, ScriptRun};
use splitpay_domain::{Breakdown, Money, SplitMode};
use splitpay_infrastructure::SplitpayCommandParser;

static TEST_PARSER: SplitpayCommandParser = SplitpayCommandParser;

#[fixture]
fn processor() -> FormProcessor<'static> {
    FormProcessor::new(&TEST_PARSER)
}

fn run_script(processor: &FormProcessor<'_>, content: &str) -> (BillForm, ScriptRun) {
    let mut form = BillForm::new();
    let run = processor
        .run(&mut form, content)
        .unwrap_or_else(|err| panic!("script failed: {err}"));
    (form, run)
}

fn totals(run: &ScriptRun, index: usize) -> Vec<String> {
    run.calculations[index]
        .result
        .as_ref()
        .expect("settlement present")
        .iter()
        .map(|(_, entry)| entry.total_owed.to_string())
        .collect()
}

#[rstest]
fn even_split_example(processor: FormProcessor<'static>) {
    let (_, run) = run_script(
        &processor,
        "people 2\nmode evenly\nbill 1000\ntax 100\ncalculate\n",
    );

    assert_eq!(totals(&run, 0), ["550.00", "550.00"]);
    let result = run.calculations[0].result.as_ref().unwrap();
    for (_, entry) in result.iter() {
        assert_eq!(
            entry.breakdown,
            Breakdown::Evenly {
                bill_share: Money::from_i64(500),
                tax_share: Money::from_i64(50),
            }
        );
    }
}

#[rstest]
fn contribution_example(processor: FormProcessor<'static>) {
    let script = "\
people 2
name 1 Asha
items 1 1
cost 1 1 300
items 2 1
cost 2 1 200
shared add
shared name 1 Pizza
shared cost 1 100
share 1 1
share 1 2
tax 100
calculate
";
    let (form, run) = run_script(&processor, script);

    assert_eq!(form.split_mode(), SplitMode::ByContribution);
    assert_eq!(totals(&run, 0), ["400.00", "300.00"]);
    let names: Vec<&str> = run.calculations[0]
        .result
        .as_ref()
        .unwrap()
        .iter()
        .map(|(_, entry)| entry.display_name.as_str())
        .collect();
    assert_eq!(names, ["Asha", "Person 2"]);
}

#[rstest]
fn unshared_item_is_reported_but_not_charged(processor: FormProcessor<'static>) {
    let script = "\
people 2
items 1 1
cost 1 1 80
shared add
shared cost 1 500
calculate
";
    let (_, run) = run_script(&processor, script);

    assert_eq!(totals(&run, 0), ["80.00", "0.00"]);
    let result = run.calculations[0].result.as_ref().unwrap();
    assert_eq!(result.unassigned_shared_cost.to_string(), "500.00");
}

#[rstest]
fn shrinking_people_drops_their_shares(processor: FormProcessor<'static>) {
    let script = "\
people 3
shared add
shared cost 1 90
share 1 1
share 1 2
share 1 3
calculate
people 2
calculate
";
    let (form, run) = run_script(&processor, script);

    assert_eq!(totals(&run, 0), ["30.00", "30.00", "30.00"]);
    assert_eq!(totals(&run, 1), ["45.00", "45.00"]);
    assert_eq!(form.store().shared_item_at(0).unwrap().shared_by().len(), 2);
}

#[rstest]
fn toggling_twice_removes_nothing(processor: FormProcessor<'static>) {
    let script = "\
people 2
shared add
shared cost 1 50
share 1 1
share 1 2
share 1 2
calculate
";
    let (_, run) = run_script(&processor, script);

    assert_eq!(totals(&run, 0), ["50.00", "0.00"]);
}

#[rstest]
fn ignored_edits_are_listed(processor: FormProcessor<'static>) {
    let (_, run) = run_script(&processor, "people 1\nname 5 Ghost\ncost 1 1 10\ncalculate");

    assert_eq!(run.ignored_lines, vec![2, 3]);
    assert_eq!(totals(&run, 0), ["0.00"]);
}

#[rstest]
fn syntax_error_stops_before_any_edit(processor: FormProcessor<'static>) {
    let mut form = BillForm::new();
    let err = processor
        .run(&mut form, "bill 100\nsplit somehow")
        .unwrap_err();

    assert!(matches!(err, ScriptParseError::SyntaxError { line: 2, .. }));
    assert!(form.total_bill().is_empty());
}
