use outcome_rail::{CustomKind, Detail, Entry, Exception, Outcome, Polarity};
use serde_json::json;

#[test]
fn catalog_titles_and_codes() {
    let cases = [
        (Detail::success(), "Operation was successful", 200, Polarity::Success),
        (Detail::created(), "A new resource has been created", 201, Polarity::Success),
        (Detail::partial_content(), "Partial content", 206, Polarity::Success),
        (
            Detail::not_modified(),
            "The resource has not been modified since the last request",
            304,
            Polarity::Success,
        ),
        (Detail::error(), "An error occurred", 500, Polarity::Error),
        (Detail::validation(), "One or more validation errors occurred", 400, Polarity::Error),
        (Detail::bad_request(), "BadRequest Error", 400, Polarity::Error),
        (Detail::unauthorized(), "Unauthorized Error", 401, Polarity::Error),
        (Detail::forbidden(), "Forbidden Error", 403, Polarity::Error),
        (Detail::not_found(), "NotFound Error", 404, Polarity::Error),
        (Detail::conflict(), "Conflict Error", 409, Polarity::Error),
    ];

    for (detail, title, code, polarity) in cases {
        assert_eq!(detail.title(), title);
        assert_eq!(detail.code(), Some(code), "{}", detail.kind().name());
        assert_eq!(detail.polarity(), polarity);
        assert!(detail.message().is_none());
        assert!(detail.more_data().is_empty());
    }
}

#[test]
fn only_error_details_capture_stack_traces() {
    assert!(Detail::success().stack_trace().is_none());
    assert!(Detail::not_found().stack_trace().is_some());
}

#[test]
fn exception_details_carry_a_real_stack_trace() {
    let detail = Detail::from_exception(Exception::msg("x"));
    let trace = detail.stack_trace().unwrap_or_default();

    assert!(!trace.is_empty());
    assert_ne!(trace, "disabled backtrace");
}

#[test]
fn exception_detail_reports_the_wrapped_error() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    let detail = Detail::from_exception(io);

    assert_eq!(detail.title(), "An exception occurred");
    assert_eq!(detail.code(), Some(500));
    assert_eq!(detail.message(), Some("config.toml missing"));
    assert!(detail.exception().is_some_and(|e| e.is::<std::io::Error>()));
}

#[test]
fn exception_detail_message_can_be_overridden() {
    let detail = Detail::from_exception(Exception::msg("raw")).with_message("friendly");

    assert_eq!(detail.message(), Some("friendly"));
    assert_eq!(detail.exception().map(ToString::to_string), Some("raw".to_owned()));
}

#[test]
fn display_includes_errors_and_exception() {
    let detail = Detail::error()
        .with_title("title")
        .with_message("message")
        .with_code(100)
        .with_errors([("message", "error")])
        .with_exception(Exception::msg("Fake exception"));

    assert_eq!(
        detail.to_string(),
        "Title: title\nMessage: message\nCode: 100\nErrors: {\"message\": \"error\"}\nException: Fake exception\n"
    );
}

#[test]
fn validation_errors_accumulate_per_field() {
    let mut detail = Detail::validation();
    detail.add_or_update_error("email", "is required");
    detail.add_or_update_error("age", "must be positive");
    detail.add_or_update_error("email", "is malformed");

    let errors = detail.errors().cloned().unwrap_or_default();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors["email"], "is malformed");
    assert_eq!(errors["age"], "must be positive");
}

#[test]
fn more_data_keeps_insertion_order() {
    let mut detail = Detail::success().with_more_data([json!(1), json!("two")]);
    detail.push_more_data(Detail::error());
    detail.push_more_data(Exception::msg("three"));

    assert_eq!(
        detail.more_data(),
        &[
            Entry::data(1),
            Entry::data("two"),
            Entry::from(Detail::error()),
            Entry::from(Exception::msg("three")),
        ]
    );
}

#[test]
fn custom_kinds_drive_outcome_status() {
    let teapot = CustomKind::new("TeapotError", Polarity::Error, "I'm a teapot", Some(418));
    let outcome = Outcome::from_detail(Detail::custom(teapot).with_message("short and stout"));

    assert!(outcome.is_fail());
    assert_eq!(outcome.status_code(), 418);
    assert_eq!(outcome.detail().map(|d| d.kind().name()), Some("TeapotError"));
}

#[test]
fn equality_ignores_stack_trace() {
    let first = Detail::not_found().with_message("gone");
    let second = Detail::not_found().with_message("gone");

    assert_eq!(first, second);
    assert_ne!(first, Detail::not_found());
}

#[cfg(feature = "serde")]
#[test]
fn detail_serializes_without_stack_trace() {
    let encoded = serde_json::to_value(Detail::conflict().with_message("taken")).unwrap();

    assert_eq!(encoded["title"], json!("Conflict Error"));
    assert_eq!(encoded["message"], json!("taken"));
    assert_eq!(encoded["code"], json!(409));
    assert!(encoded.get("stack_trace").is_none());
}
