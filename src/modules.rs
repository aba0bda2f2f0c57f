use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::command::{CommandContext, CommandHandler, CommandResult, Module};
use crate::registry::ModuleRegistry;

/// Delay between characters of the `about` banner.
const TYPE_DELAY: Duration = Duration::from_millis(20);

const ABOUT_BANNER: &str = "aish — a modular interactive shell.\n\
    Commands resolve against registered modules first and fall through to the\n\
    system shell; prefix a line with `ash.` to stay internal or `sh.` to\n\
    prefer the system shell.";

/// Module exposing the `about` command.
pub struct AboutModule;

impl Module for AboutModule {
    fn name(&self) -> &str {
        "about"
    }

    fn description(&self) -> &str {
        "Information about the shell itself"
    }

    fn commands(&self) -> Vec<Arc<dyn CommandHandler>> {
        vec![Arc::new(AboutCommand)]
    }
}

struct AboutCommand;

#[async_trait]
impl CommandHandler for AboutCommand {
    fn keyword(&self) -> &str {
        "about"
    }

    fn description(&self) -> &str {
        "Print a short description of this shell"
    }

    async fn execute(&self, _context: &CommandContext) -> CommandResult {
        // typewriter effect
        for c in ABOUT_BANNER.chars() {
            print!("{c}");
            let _ = std::io::stdout().flush();
            tokio::time::sleep(TYPE_DELAY).await;
        }
        println!();
        CommandResult::Success
    }
}

/// One module's listing as captured when the module set was frozen.
struct HelpEntry {
    module: String,
    description: String,
    commands: Vec<(String, String)>,
}

/// Module exposing the `help` command.
///
/// Built from a snapshot of the registry taken at startup; registration is
/// finished before the first dispatch, so the snapshot never goes stale.
pub struct HelpModule {
    entries: Arc<Vec<HelpEntry>>,
}

impl HelpModule {
    const NAME: &'static str = "help";
    const DESCRIPTION: &'static str = "List the modules and commands of this shell";

    /// Capture every module registered so far, then append this module's own
    /// listing so `help` also documents itself.
    pub fn from_registry(registry: &ModuleRegistry) -> Self {
        let mut entries: Vec<HelpEntry> = registry
            .get_all()
            .iter()
            .map(|module| HelpEntry {
                module: module.name().to_string(),
                description: module.description().to_string(),
                commands: module
                    .commands()
                    .iter()
                    .map(|handler| {
                        (
                            handler.keyword().to_string(),
                            handler.description().to_string(),
                        )
                    })
                    .collect(),
            })
            .collect();
        entries.push(HelpEntry {
            module: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            commands: vec![(
                Self::NAME.to_string(),
                "Show this listing, or `help <module>` for one module".to_string(),
            )],
        });
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl Module for HelpModule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn commands(&self) -> Vec<Arc<dyn CommandHandler>> {
        vec![Arc::new(HelpCommand {
            entries: self.entries.clone(),
        })]
    }
}

struct HelpCommand {
    entries: Arc<Vec<HelpEntry>>,
}

impl HelpCommand {
    fn print_entry(entry: &HelpEntry) {
        println!("{} — {}", entry.module, entry.description);
        for (keyword, description) in &entry.commands {
            println!("    {keyword:<12} {description}");
        }
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    fn keyword(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "Show this listing, or `help <module>` for one module"
    }

    async fn execute(&self, context: &CommandContext) -> CommandResult {
        // the keyword is the first word of the line, an optional module
        // filter follows it
        let filter = context.input().split_whitespace().nth(1);
        match filter {
            None => {
                for entry in self.entries.iter() {
                    Self::print_entry(entry);
                }
                CommandResult::Success
            }
            Some(name) => match self
                .entries
                .iter()
                .find(|entry| entry.module.eq_ignore_ascii_case(name))
            {
                Some(entry) => {
                    Self::print_entry(entry);
                    CommandResult::Success
                }
                None => {
                    eprintln!("help: no such module: {name}");
                    CommandResult::Failed
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn help_module() -> HelpModule {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(AboutModule));
        HelpModule::from_registry(&registry)
    }

    fn only_command(module: &dyn Module) -> Arc<dyn CommandHandler> {
        let mut commands = module.commands();
        assert_eq!(commands.len(), 1);
        commands.remove(0)
    }

    #[tokio::test(start_paused = true)]
    async fn about_reports_success() {
        let handler = only_command(&AboutModule);
        let context = CommandContext::new("about");
        assert_eq!(handler.execute(&context).await, CommandResult::Success);
    }

    #[tokio::test]
    async fn help_lists_all_modules() {
        let handler = only_command(&help_module());
        let context = CommandContext::new("help");
        assert_eq!(handler.execute(&context).await, CommandResult::Success);
    }

    #[tokio::test]
    async fn help_filters_by_module_name() {
        let handler = only_command(&help_module());
        let context = CommandContext::new("help About");
        assert_eq!(handler.execute(&context).await, CommandResult::Success);
    }

    #[tokio::test]
    async fn help_rejects_unknown_module() {
        let handler = only_command(&help_module());
        let context = CommandContext::new("help nosuchmodule");
        assert_eq!(handler.execute(&context).await, CommandResult::Failed);
    }

    #[test]
    fn help_documents_itself() {
        let module = help_module();
        assert_eq!(module.entries.len(), 2);
        assert_eq!(module.entries[1].module, "help");
    }
}
