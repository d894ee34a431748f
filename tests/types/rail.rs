use outcome_rail::{BreakSignal, Detail, Outcome, Rail, Railway};

#[test]
fn running_rail_finishes_with_its_outcome() {
    let rail = Rail::from(Outcome::ok_value(1));

    assert!(!rail.is_broken());
    assert!(rail.is_success());
    assert_eq!(rail.into_result(), Ok(Outcome::ok_value(1)));
}

#[test]
fn broken_rail_exposes_the_signal() {
    let rail = Rail::broken(Outcome::fail_with(Detail::forbidden()));

    assert!(rail.is_broken());
    assert_eq!(rail.outcome().status_code(), 403);

    let signal = rail.into_result().unwrap_err();
    assert_eq!(signal.into_outcome(), Outcome::fail_with(Detail::forbidden()));
}

#[test]
fn break_signal_display_names_the_outcome() {
    let signal = BreakSignal::new(Outcome::ok_value(2));
    assert_eq!(signal.to_string(), "chain broken with outcome:\nsuccess: true\nValue: 2\n");
}

#[test]
fn rail_converts_into_outcome() {
    let outcome: Outcome = Outcome::ok().break_rails(true).into();
    assert_eq!(outcome, Outcome::ok());
}

#[test]
fn broken_rail_ignores_every_combinator() {
    let rail = Rail::from(BreakSignal::new(Outcome::ok_value("stop")))
        .on_success(|| 1)
        .on_fail(|| 2)
        .try_func(|| 3)
        .on_success_add_more_data("data")
        .on_success_new_detail(None)
        .finally_tee(Outcome::fail)
        .fail_when(true)
        .break_rails(true);

    assert!(rail.is_broken());
    assert_eq!(rail.finish(), Outcome::ok_value("stop"));
}
