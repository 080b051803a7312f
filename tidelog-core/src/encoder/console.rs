use std::io::{self, Write};

use super::{Encoder, EncoderConfig};
use crate::entry::Entry;
use crate::field;

/// Human-readable line encoder.
///
/// Layout: `timestamp SEP LEVEL SEP caller SEP message [SEP {fields}]`,
/// followed by the stack trace on its own lines when one is attached.
#[derive(Debug, Clone)]
pub struct ConsoleEncoder {
    config: EncoderConfig,
}

impl ConsoleEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

impl Encoder for ConsoleEncoder {
    fn encode(&self, entry: &Entry<'_>, buf: &mut Vec<u8>) -> io::Result<()> {
        let ec = &self.config;
        let mut elements: Vec<String> = Vec::with_capacity(5);

        if !ec.time_key.is_empty() {
            elements.push(ec.format_time(entry));
        }
        if !ec.level_key.is_empty() {
            elements.push(ec.level_encoding.render(entry.level));
        }
        if !ec.caller_key.is_empty() {
            if let Some(caller) = entry.caller {
                elements.push(caller.short());
            }
        }
        if !ec.message_key.is_empty() {
            elements.push(entry.message.to_string());
        }
        if !entry.fields.is_empty() {
            let context = serde_json::to_string(&field::to_map(entry.fields))?;
            elements.push(context);
        }

        buf.write_all(elements.join(ec.separator()).as_bytes())?;

        if !ec.stacktrace_key.is_empty() {
            if let Some(stack) = entry.stacktrace.as_deref() {
                buf.write_all(b"\n")?;
                buf.write_all(stack.trim_end().as_bytes())?;
            }
        }

        buf.write_all(ec.line_ending().as_bytes())
    }
}
