use std::sync::Arc;

use log::debug;

use crate::command::{CommandContext, CommandResult};
use crate::external::ExternalExecutor;
use crate::registry::ModuleRegistry;

/// Routes one raw input line to an internal command handler, the host shell,
/// or both in sequence.
///
/// The routing strategy is selected by an optional prefix in front of the
/// first `.` of the line:
///
/// - `ash.` runs internal handlers only,
/// - `sh.` tries the host shell first and falls back to an internal handler,
/// - anything else (including no prefix at all) tries an internal handler
///   first and falls back to the host shell.
///
/// The dispatcher holds no state of its own beyond the registry and executor
/// references; malformed input is answered with
/// [`CommandResult::InvalidCommand`], never with an error.
pub struct Dispatcher {
    registry: Arc<ModuleRegistry>,
    external: Arc<dyn ExternalExecutor>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ModuleRegistry>, external: Arc<dyn ExternalExecutor>) -> Self {
        Self { registry, external }
    }

    /// Dispatch a single raw input line and report its outcome.
    ///
    /// The split on the first `.` is purely syntactic: the prefix is not
    /// validated against the known routing names, an unrecognized prefix
    /// simply selects the default internal-first strategy for the remainder.
    /// Each fallback leg runs at most once, strictly after the primary leg
    /// has completed.
    pub async fn dispatch(&self, input: &str) -> CommandResult {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return CommandResult::InvalidCommand;
        }

        let (prefix, remainder) = match trimmed.split_once('.') {
            Some((prefix, remainder)) => (prefix.to_lowercase(), remainder.trim()),
            None => (String::new(), trimmed),
        };
        let Some(keyword) = remainder.split_whitespace().next() else {
            return CommandResult::InvalidCommand;
        };
        debug!("routing keyword {keyword:?} with prefix {prefix:?}");

        let context = CommandContext::new(input);
        match prefix.as_str() {
            "ash" => self.run_internal(keyword, &context).await,
            "sh" => match self.external.run(remainder).await {
                CommandResult::Success => CommandResult::Success,
                _ => self.run_internal(keyword, &context).await,
            },
            _ => match self.run_internal(keyword, &context).await {
                CommandResult::Success => CommandResult::Success,
                _ => self.external.run(remainder).await,
            },
        }
    }

    /// Resolve `keyword` across all registered modules and run the first
    /// case-insensitive match, in registration order.
    async fn run_internal(&self, keyword: &str, context: &CommandContext) -> CommandResult {
        for module in self.registry.get_all() {
            let handler = module
                .commands()
                .into_iter()
                .find(|handler| handler.keyword().eq_ignore_ascii_case(keyword));
            if let Some(handler) = handler {
                debug!("keyword {keyword:?} resolved in module {:?}", module.name());
                return handler.execute(context).await;
            }
        }
        CommandResult::InvalidCommand
    }
}
