//! Cores: an encoder, a sink and a severity threshold.

use std::io::{self, Write};

use tracing_subscriber::fmt::MakeWriter;

use crate::encoder::Encoder;
use crate::entry::Entry;
use crate::level::Level;

/// Accepts entries and persists them.
pub trait Core: Send + Sync {
    /// Whether an entry at `level` would be written.
    fn enabled(&self, level: Level) -> bool;

    /// Encode and persist one entry. Callers check [`Core::enabled`] first.
    fn write(&self, entry: &Entry<'_>) -> io::Result<()>;

    /// Flush buffered output, if any.
    fn sync(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes encoded entries to a [`MakeWriter`] sink.
pub struct IoCore<E, W> {
    encoder: E,
    writer: W,
    level: Level,
}

impl<E, W> IoCore<E, W>
where
    E: Encoder,
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    pub fn new(encoder: E, writer: W, level: Level) -> Self {
        Self {
            encoder,
            writer,
            level,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl<E, W> Core for IoCore<E, W>
where
    E: Encoder,
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn write(&self, entry: &Entry<'_>) -> io::Result<()> {
        let mut buf = Vec::with_capacity(256);
        self.encoder.encode(entry, &mut buf)?;

        let mut writer = self.writer.make_writer();
        writer.write_all(&buf)?;
        if entry.level.is_terminal() {
            writer.flush()?;
        }
        Ok(())
    }

    fn sync(&self) -> io::Result<()> {
        self.writer.make_writer().flush()
    }
}

/// Raises the threshold of a wrapped core. Lowering is not possible.
pub struct LevelOverride<C> {
    inner: C,
    level: Level,
}

impl<C: Core> LevelOverride<C> {
    pub fn new(inner: C, level: Level) -> Self {
        Self { inner, level }
    }
}

impl<C: Core> Core for LevelOverride<C> {
    fn enabled(&self, level: Level) -> bool {
        level >= self.level && self.inner.enabled(level)
    }

    fn write(&self, entry: &Entry<'_>) -> io::Result<()> {
        self.inner.write(entry)
    }

    fn sync(&self) -> io::Result<()> {
        self.inner.sync()
    }
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopCore;

impl Core for NopCore {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn write(&self, _entry: &Entry<'_>) -> io::Result<()> {
        Ok(())
    }
}

impl<C: Core + ?Sized> Core for Box<C> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn write(&self, entry: &Entry<'_>) -> io::Result<()> {
        (**self).write(entry)
    }

    fn sync(&self) -> io::Result<()> {
        (**self).sync()
    }
}

impl<C: Core + ?Sized> Core for std::sync::Arc<C> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn write(&self, entry: &Entry<'_>) -> io::Result<()> {
        (**self).write(entry)
    }

    fn sync(&self) -> io::Result<()> {
        (**self).sync()
    }
}
