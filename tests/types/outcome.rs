use outcome_rail::{Detail, Exception, Outcome, RailConfig};
use serde_json::{json, Value};

#[test]
fn new_without_optional_parts() {
    let outcome = Outcome::new(true, None, None);

    assert!(outcome.is_success());
    assert!(outcome.detail().is_none());
    assert!(outcome.value().is_none());
}

#[test]
fn new_with_every_part() {
    let outcome = Outcome::new(false, Some(Detail::not_found()), Some(json!({"id": 7})));

    assert!(outcome.is_fail());
    assert_eq!(outcome.detail(), Some(&Detail::not_found()));
    assert_eq!(outcome.value(), Some(&json!({"id": 7})));
}

#[test]
fn status_is_never_inferred_from_value_or_detail() {
    for value in [json!(null), json!(0), json!(false), json!(""), json!([])] {
        assert!(Outcome::ok_value(value).is_success());
    }
    assert!(Outcome::fail_with(Detail::success()).is_fail());
    assert!(Outcome::ok().with_detail(Detail::conflict()).is_success());
}

#[test]
fn status_code_prefers_detail_code() {
    assert_eq!(Outcome::ok().status_code(), 200);
    assert_eq!(Outcome::fail().status_code(), 500);
    assert_eq!(Outcome::ok().with_detail(Detail::created()).status_code(), 201);
    assert_eq!(Outcome::fail_with(Detail::unauthorized()).status_code(), 401);
    assert_eq!(Outcome::fail_with(Detail::forbidden()).status_code(), 403);
    assert_eq!(Outcome::fail_with(Detail::error().with_code(418)).status_code(), 418);
}

#[test]
fn status_code_defaults_apply_only_without_code() {
    let config = RailConfig::new().with_default_codes(204, 503);

    assert_eq!(Outcome::ok().status_code_with(204, 503), 204);
    assert_eq!(Outcome::fail().status_code_for(&config), 503);
    assert_eq!(Outcome::fail_with(Detail::error().without_code()).status_code_for(&config), 503);
    assert_eq!(Outcome::fail_with(Detail::not_found()).status_code_for(&config), 404);
}

#[test]
fn render_lists_present_parts() {
    assert_eq!(Outcome::fail().render(), "success: false\n");
    assert_eq!(Outcome::ok_value(5).render(), "success: true\nValue: 5\n");
    assert_eq!(Outcome::ok_value("text").render(), "success: true\nValue: text\n");
    assert_eq!(
        Outcome::fail_with(Detail::error().with_message("boom")).render(),
        "success: false\nDetail:\nTitle: An error occurred\nMessage: boom\nCode: 500\n\n"
    );
}

#[test]
fn render_skips_falsy_values() {
    for value in [json!(0), json!(false), json!(""), json!([]), json!({}), Value::Null] {
        assert_eq!(Outcome::ok_value(value.clone()).render(), "success: true\n", "{value}");
    }
    assert_eq!(Outcome::ok_value(json!([0])).render(), "success: true\nValue: [0]\n");
}

#[test]
fn convert_applies_none_rule() {
    assert_eq!(Outcome::convert((), true), Outcome::ok());
    assert_eq!(Outcome::convert((), false), Outcome::fail());
    assert_eq!(Outcome::convert(None::<i64>, true), Outcome::ok());
    assert_eq!(Outcome::convert(Some(5), false), Outcome::ok_value(5));
}

#[test]
fn convert_keeps_outcomes_and_details() {
    let failed = Outcome::fail_with(Detail::bad_request());
    assert_eq!(Outcome::convert(failed.clone(), true), failed);

    assert_eq!(Outcome::convert(Detail::created(), false), Outcome::from_detail(Detail::created()));
    assert!(Outcome::convert(Detail::not_found(), true).is_fail());
}

#[test]
fn convert_turns_errors_into_exception_details() {
    let outcome = Outcome::convert(Err::<i32, _>(Exception::msg("bad input")), true);
    let detail = outcome.detail().cloned().unwrap_or_else(Detail::success);

    assert!(outcome.is_fail());
    assert_eq!(detail.title(), "An exception occurred");
    assert_eq!(detail.message(), Some("bad input"));
    assert_eq!(detail.exception(), Some(&Exception::msg("bad input")));
}

#[test]
fn convert_collections_become_values() {
    assert_eq!(Outcome::convert(vec![1, 2], true), Outcome::ok_value(json!([1, 2])));

    let mut map = serde_json::Map::new();
    map.insert("key".into(), Value::from("value"));
    assert_eq!(Outcome::convert(map, true), Outcome::ok_value(json!({"key": "value"})));
}

#[test]
fn into_result_splits_by_status() {
    assert_eq!(Outcome::ok().into_result(), Ok(None));
    assert_eq!(Outcome::ok_value(3).into_result(), Ok(Some(json!(3))));
    assert_eq!(Outcome::fail().into_result(), Err(Detail::error()));
    assert_eq!(Outcome::fail_with(Detail::conflict()).into_result(), Err(Detail::conflict()));
}

#[test]
fn into_parts_returns_every_field() {
    let (success, detail, value) = Outcome::ok_value(1).with_detail(Detail::created()).into_parts();

    assert!(success);
    assert_eq!(detail, Some(Detail::created()));
    assert_eq!(value, Some(json!(1)));
}

#[cfg(feature = "serde")]
#[test]
fn serializes_to_json() {
    let outcome = Outcome::ok_value(json!({"user": "ada"}));
    let encoded = serde_json::to_value(&outcome).unwrap();

    assert_eq!(encoded["success"], json!(true));
    assert_eq!(encoded["value"], json!({"user": "ada"}));
}
