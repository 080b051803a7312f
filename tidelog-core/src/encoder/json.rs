use std::io::{self, Write};

use serde_json::{Map, Value};

use super::{Encoder, EncoderConfig};
use crate::entry::Entry;

/// One JSON object per entry: fixed keys first, then fields, then the
/// stack trace. A field whose key matches a configured fixed key is written
/// as `fields.<key>` and never replaces the fixed value.
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    config: EncoderConfig,
}

impl JsonEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn is_reserved(&self, key: &str) -> bool {
        let ec = &self.config;
        [
            &ec.level_key,
            &ec.time_key,
            &ec.caller_key,
            &ec.message_key,
            &ec.stacktrace_key,
        ]
        .iter()
        .any(|reserved| !reserved.is_empty() && reserved.as_str() == key)
    }

    fn to_object(&self, entry: &Entry<'_>) -> Map<String, Value> {
        let ec = &self.config;
        let mut object = Map::new();

        if !ec.level_key.is_empty() {
            object.insert(
                ec.level_key.clone(),
                Value::String(ec.level_encoding.render(entry.level)),
            );
        }
        if !ec.time_key.is_empty() {
            object.insert(ec.time_key.clone(), Value::String(ec.format_time(entry)));
        }
        if !ec.caller_key.is_empty() {
            if let Some(caller) = entry.caller {
                object.insert(ec.caller_key.clone(), Value::String(caller.short()));
            }
        }
        if !ec.message_key.is_empty() {
            object.insert(
                ec.message_key.clone(),
                Value::String(entry.message.to_string()),
            );
        }
        for field in entry.fields {
            let key = if self.is_reserved(field.key()) {
                format!("fields.{}", field.key())
            } else {
                field.key().to_string()
            };
            object.insert(key, field.value().clone());
        }
        if !ec.stacktrace_key.is_empty() {
            if let Some(stack) = entry.stacktrace.as_deref() {
                object.insert(ec.stacktrace_key.clone(), Value::String(stack.to_string()));
            }
        }

        object
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, entry: &Entry<'_>, buf: &mut Vec<u8>) -> io::Result<()> {
        serde_json::to_writer(&mut *buf, &self.to_object(entry))?;
        buf.write_all(self.config.line_ending().as_bytes())
    }
}
