//! Async operations: driving futures from a synchronous chain and retrying
//! async work.
//!
//! Run with: cargo run --example async_bridge --features async-tokio

use outcome_rail::async_ext::{guard_async, retry_async, AsyncBridge};
use outcome_rail::{Exception, Outcome, Railway};
use serde_json::{json, Value};

async fn fetch_user(id: Value) -> Result<Value, Exception> {
    match id.as_u64() {
        Some(id) => Ok(json!({"id": id, "name": format!("user-{id}")})),
        None => Err(Exception::msg("id must be a number")),
    }
}

fn sync_chain() {
    println!("\n1. Synchronous chain over async operations:");
    let bridge = AsyncBridge::shared();

    let outcome = Outcome::ok_value(7)
        .on_success(bridge.blocking_with_value(fetch_user))
        .on_success_add_more_data("fetched through the bridge")
        .finish();
    print!("{}", outcome);

    let outcome = bridge.block_on(fetch_user(json!("seven")));
    println!("status {}", outcome.status_code());
}

async fn inside_runtime() {
    println!("\n2. Inside a runtime:");
    let outcome = guard_async(fetch_user(json!(3))).await;
    print!("{}", outcome);

    let outcome = retry_async(3, || fetch_user(Value::Null)).await.finish();
    println!("failed after {} attempts", outcome.detail().map_or(0, |d| d.more_data().len()));

    let refused = AsyncBridge::shared().block_on(async { 1 });
    println!("bridge inside a runtime: status {}", refused.status_code());
}

fn main() {
    println!("Running async bridge examples...");
    sync_chain();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    runtime.block_on(inside_runtime());
}
