use std::sync::Arc;

use anyhow::Result;
use argh::FromArgs;

use aish::modules::{AboutModule, HelpModule};
use aish::prompt::Prompt;
use aish::{CommandResult, Dispatcher, HostShell, ModuleRegistry};

#[derive(FromArgs)]
/// An extensible interactive shell with prefix-routed command dispatch.
struct Args {
    /// execute a single command line and exit
    #[argh(option, short = 'c')]
    command: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut registry = ModuleRegistry::new();
    registry.register(Arc::new(AboutModule));
    // register additional modules here, before the help snapshot
    let help = HelpModule::from_registry(&registry);
    registry.register(Arc::new(help));

    let dispatcher = Dispatcher::new(Arc::new(registry), Arc::new(HostShell));

    if let Some(line) = args.command {
        let result = dispatcher.dispatch(&line).await;
        std::process::exit(exit_code(result));
    }

    let mut prompt = Prompt::new()?;
    while let Some(line) = prompt.read_line() {
        if line.trim().is_empty() {
            continue;
        }
        tokio::select! {
            _ = tokio::signal::ctrl_c() => println!("interrupted"),
            result = dispatcher.dispatch(&line) => {
                if result == CommandResult::InvalidCommand {
                    println!("Unknown command: {}", line.trim());
                }
            }
        }
    }
    Ok(())
}

fn exit_code(result: CommandResult) -> i32 {
    match result {
        CommandResult::Success => 0,
        CommandResult::Failed => 1,
        CommandResult::InvalidCommand => 127,
    }
}
