use std::fmt;
use std::sync::Arc;

use tidelog_core::{Entry, Field, Level};

/// Callback run after every written entry.
pub type EntryHook = Arc<dyn Fn(&Entry<'_>) + Send + Sync>;

/// What happens after a `Fatal` entry is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FatalHook {
    /// Exit the process with status 1.
    #[default]
    Exit,
    /// Panic with the message instead of exiting.
    Panic,
}

/// Logger behavior applied on top of the core, in order.
#[derive(Clone)]
pub enum LoggerOption {
    /// Record the call site of every entry.
    AddCaller,
    /// Turn call-site recording on or off.
    WithCaller(bool),
    /// Attach a stack trace to entries at or above the level.
    AddStacktrace(Level),
    /// Fields attached to every entry.
    Fields(Vec<Field>),
    /// Raise the threshold of the core. Has no effect if it would lower it.
    IncreaseLevel(Level),
    Hook(EntryHook),
    OnFatal(FatalHook),
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerOption::AddCaller => write!(f, "AddCaller"),
            LoggerOption::WithCaller(enabled) => write!(f, "WithCaller({})", enabled),
            LoggerOption::AddStacktrace(level) => write!(f, "AddStacktrace({:?})", level),
            LoggerOption::Fields(fields) => write!(f, "Fields({:?})", fields),
            LoggerOption::IncreaseLevel(level) => write!(f, "IncreaseLevel({:?})", level),
            LoggerOption::Hook(_) => write!(f, "Hook(..)"),
            LoggerOption::OnFatal(hook) => write!(f, "OnFatal({:?})", hook),
        }
    }
}

impl LoggerOption {
    pub fn hook<F>(f: F) -> Self
    where
        F: Fn(&Entry<'_>) + Send + Sync + 'static,
    {
        LoggerOption::Hook(Arc::new(f))
    }
}
