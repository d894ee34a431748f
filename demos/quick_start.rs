//! Quick start: a synchronous chain with retries, details and an early break.
//!
//! Run with: cargo run --example quick_start

use outcome_rail::{fail, guard, rail_break, retry, Detail, Outcome, Rail, Railway};
use serde_json::{json, Value};

fn parse_port(raw: &Value) -> Result<u16, std::num::ParseIntError> {
    raw.as_str().unwrap_or_default().parse::<u16>()
}

fn check_port(port: &Value) -> Outcome {
    match port.as_u64() {
        Some(p) if p < 1024 => fail!(validation, "port {} is privileged", p),
        _ => Outcome::ok_value(port.clone()),
    }
}

fn cached(port: &Value) -> Rail {
    if port == &json!(8080) {
        rail_break!(Outcome::ok_value("cached listener").with_detail(Detail::not_modified()));
    }
    Rail::Running(Outcome::ok_value(port.clone()))
}

fn main() {
    println!("Running quick start examples...");

    // 1. Success track
    println!("\n1. Success track:");
    let outcome = Outcome::ok_value("8443")
        .on_success(parse_port)
        .on_success(check_port)
        .on_success_new_detail(Some(Detail::created()))
        .finish();
    print!("{}", outcome);

    // 2. Failure track with extra data
    println!("\n2. Failure track:");
    let outcome = Outcome::ok_value("80")
        .on_success(parse_port)
        .on_success(check_port)
        .on_fail_add_more_data("while loading listener config")
        .finish();
    print!("{}", outcome);

    // 3. Retries aggregate every failure
    println!("\n3. Retries:");
    let outcome = Outcome::ok_value("not a port").on_success(retry(3, parse_port)).finish();
    println!("status {}", outcome.status_code());
    if let Some(detail) = outcome.detail() {
        println!("{}", detail.message().unwrap_or_default());
    }

    // 4. Breaking out of a chain
    println!("\n4. Breaking the chain:");
    let outcome = guard(|| {
        Outcome::ok_value("8080")
            .on_success(parse_port)
            .on_success(cached)
            .on_success(|| "never reached")
    });
    print!("{}", outcome);
}
