// Adapters and bridges writing through the process default logger.
// Installing the bridges is process-wide, so it happens once per binary.

use std::sync::Once;

use serde_json::Value;
use serial_test::serial;
use tidelog::{BasicConfig, Config, Core, IoCore, MemorySink};
use tidelog_adapters::{
    install_log_bridge, install_tracing_bridge, FormatAdapter, FormatLog, MessageAdapter,
    MessageLog,
};

static BRIDGES: Once = Once::new();

fn init_capturing(level: &str) -> MemorySink {
    BRIDGES.call_once(|| {
        install_log_bridge().unwrap();
        install_tracing_bridge().unwrap();
    });

    let sink = MemorySink::new();
    let writer = sink.clone();
    let basic = BasicConfig {
        level: level.to_string(),
        format: "json".to_string(),
        ..BasicConfig::default()
    };
    let config = Config::new(basic).with_core_hook(move |encoder, level, _| {
        Ok(Box::new(IoCore::new(encoder, writer.clone(), level)) as Box<dyn Core>)
    });
    tidelog::init(config).unwrap();
    sink
}

fn messages(sink: &MemorySink) -> Vec<(String, String)> {
    sink.lines()
        .iter()
        .map(|line| {
            let record: Value = serde_json::from_str(line).unwrap();
            (
                record["level"].as_str().unwrap().to_string(),
                record["msg"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn pair(level: &str, msg: &str) -> (String, String) {
    (level.to_string(), msg.to_string())
}

#[test]
#[serial]
fn test_adapters_follow_the_default_logger() {
    let sink = init_capturing("info");

    let message = MessageAdapter::new();
    message.debug("filtered", &[]);
    message.info("request done", &[]);

    let format = FormatAdapter::new();
    format.warn(format_args!("retry {} of {}", 2, 5));

    assert_eq!(
        messages(&sink),
        vec![pair("INFO", "request done"), pair("WARN", "retry 2 of 5")]
    );

    // Reinitializing redirects adapters that were created earlier.
    let second = init_capturing("debug");
    message.debug("now visible", &[]);
    assert_eq!(messages(&second).last(), Some(&pair("DEBUG", "now visible")));
    assert_eq!(sink.lines().len(), 2);
}

#[test]
#[serial]
fn test_log_macros_reach_the_logger() {
    let sink = init_capturing("info");

    log::debug!("filtered by the tidelog threshold");
    log::info!("cache primed with {} entries", 512);
    log::error!(target: "payments", "charge declined");

    let records: Vec<Value> = sink
        .lines()
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .filter(|record: &Value| record.get("target").is_some())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["msg"], "cache primed with 512 entries");
    assert_eq!(records[1]["target"], "payments");
    assert_eq!(records[1]["level"], "ERROR");

    let caller = records[0]["caller"].as_str().unwrap();
    assert!(caller.starts_with("tests/global_adapter_tests.rs:"), "caller was {}", caller);
}

#[test]
#[serial]
fn test_tracing_events_reach_the_logger() {
    let sink = init_capturing("warn");

    tracing::info!("filtered");
    tracing::warn!(disk = "/dev/sda1", free_pct = 4_u64, "disk almost full");

    let records: Vec<Value> = sink
        .lines()
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["msg"], "disk almost full");
    assert_eq!(records[0]["disk"], "/dev/sda1");
    assert_eq!(records[0]["free_pct"], 4);
}
