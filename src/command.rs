use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

/// Terminal outcome of executing one command line.
///
/// Every execution path — internal handler, host shell, or the dispatcher's
/// own input validation — reduces to one of these three values. No partial or
/// streaming result is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// The command ran and reported success.
    Success,
    /// The command ran but signaled failure, or could not be started at all.
    Failed,
    /// The input was empty, had no keyword, or matched no known command.
    InvalidCommand,
}

/// Per-dispatch value handed to a command handler.
///
/// Carries the raw input line exactly as the user typed it (prefix and
/// arguments included) plus an optional bag of caller-supplied metadata such
/// as invocation options. A context is built fresh for every dispatch call and
/// dropped when the handler returns.
pub struct CommandContext {
    input: String,
    metadata: Option<HashMap<String, Box<dyn Any + Send + Sync>>>,
}

impl CommandContext {
    /// Create a context for the given raw input line, without metadata.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            metadata: None,
        }
    }

    /// Create a context carrying additional metadata entries.
    pub fn with_metadata(
        input: impl Into<String>,
        metadata: HashMap<String, Box<dyn Any + Send + Sync>>,
    ) -> Self {
        Self {
            input: input.into(),
            metadata: Some(metadata),
        }
    }

    /// The raw input line, untrimmed, including any routing prefix.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Typed lookup into the metadata bag.
    ///
    /// Returns `None` when the key is absent or the stored value has a
    /// different type than `T`.
    pub fn metadata<T: 'static>(&self, key: &str) -> Option<&T> {
        self.metadata.as_ref()?.get(key)?.downcast_ref::<T>()
    }
}

/// A single internally-implemented shell command, keyed by keyword.
///
/// Expected failure is reported through the [`CommandResult::Failed`] return
/// value, never by panicking; a panic inside a handler is the handler's own
/// fault and propagates to the prompt loop.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Keyword that triggers this command. Matched case-insensitively, unique
    /// within the owning module.
    fn keyword(&self) -> &str;

    /// One-line description shown by `help`.
    fn description(&self) -> &str;

    /// Execute the command. Cancellation is by dropping the returned future.
    async fn execute(&self, context: &CommandContext) -> CommandResult;
}

/// A named bundle of related command handlers.
///
/// Modules are registered once at startup and are read-only for the rest of
/// the process lifetime.
pub trait Module: Send + Sync {
    /// Unique module name, compared case-insensitively by the registry.
    fn name(&self) -> &str;

    /// One-line description shown by `help`.
    fn description(&self) -> &str;

    /// The handlers this module exposes. Queried anew on every resolution.
    fn commands(&self) -> Vec<Arc<dyn CommandHandler>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_raw_input() {
        let context = CommandContext::new("  ash.greet --loud  ");
        assert_eq!(context.input(), "  ash.greet --loud  ");
    }

    #[test]
    fn metadata_lookup_is_typed() {
        let mut metadata: HashMap<String, Box<dyn Any + Send + Sync>> = HashMap::new();
        metadata.insert("user".to_string(), Box::new("root".to_string()));
        metadata.insert("attempt".to_string(), Box::new(3_u32));

        let context = CommandContext::with_metadata("greet", metadata);

        assert_eq!(context.metadata::<String>("user"), Some(&"root".to_string()));
        assert_eq!(context.metadata::<u32>("attempt"), Some(&3));
        // wrong type and missing key both come back empty
        assert_eq!(context.metadata::<u32>("user"), None);
        assert_eq!(context.metadata::<String>("missing"), None);
    }

    #[test]
    fn context_without_metadata_yields_nothing() {
        let context = CommandContext::new("greet");
        assert_eq!(context.metadata::<String>("user"), None);
    }
}
