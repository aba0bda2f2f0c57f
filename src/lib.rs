//! An extensible interactive command shell built around prefix-aware dispatch.
//!
//! Each line read from the user either names a command implemented by one of
//! the registered [`Module`]s or is forwarded to the host operating system's
//! native shell. An optional prefix in front of the first `.` selects the
//! strategy: `ash.` stays internal, `sh.` prefers the system shell, and an
//! unprefixed line tries internal handlers first with the system shell as
//! fallback.
//!
//! The main entry point is [`Dispatcher`], which resolves keywords across a
//! [`ModuleRegistry`] populated once at startup. New functionality is added by
//! implementing [`Module`] and [`CommandHandler`] and registering the module
//! before the first dispatch; the [`modules`] module shows two small
//! examples.

pub mod command;
pub mod dispatch;
pub mod external;
pub mod modules;
pub mod prompt;
pub mod registry;

pub use command::{CommandContext, CommandHandler, CommandResult, Module};
pub use dispatch::Dispatcher;
pub use external::{ExternalExecutor, HostShell};
pub use registry::ModuleRegistry;
