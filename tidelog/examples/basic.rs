//! Example: configure the default logger and log through it
//!
//! Reads settings from `TIDELOG_*` environment variables, so
//! `TIDELOG_FORMAT=json TIDELOG_LEVEL=info cargo run --example basic`
//! switches the output without code changes.

use std::time::Duration;

use anyhow::Result;
use tidelog::{copy_keys, field, fields, BasicConfig, Config, Context};

fn main() -> Result<()> {
    let basic = BasicConfig::from_env()?;
    basic.validate()?;

    let mut config = Config::new(basic);
    config.apply_fields = Some(copy_keys(["request_id", "user_id"]));
    tidelog::init(config)?;

    tidelog::info("Starting demo", &[]);

    demo_levels();
    demo_fields();
    demo_context();

    tidelog::info("Demo completed", &[]);
    tidelog::sync()?;
    Ok(())
}

fn demo_levels() {
    tidelog::trace("This is a trace message", &[]);
    tidelog::debug("This is a debug message", &[]);
    tidelog::info("This is an info message", &[]);
    tidelog::warn("This is a warning message", &[]);
    tidelog::error("This is an error message", &[]);
}

fn demo_fields() {
    tidelog::info(
        "Accepted connection",
        &fields! {
            "service" => "checkout",
            "remote_addr" => "10.0.4.17:51522",
            "workers" => 4
        },
    );

    let started = std::time::Instant::now();
    std::thread::sleep(Duration::from_millis(20));
    tidelog::info(
        "Request finished",
        &[field::duration("elapsed", started.elapsed())],
    );

    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "connection timeout");
    tidelog::error("Upstream call failed", &[field::error(&err)]);
}

fn demo_context() {
    let ctx = Context::new()
        .with("request_id", "req-7f3a")
        .with("user_id", 1001)
        .with("session_token", "never logged");

    let logger = tidelog::with_context(&ctx);
    logger.info("Handling request", &[]);
    logger.warn("Slow upstream", &[field::int("latency_ms", 950)]);
}
