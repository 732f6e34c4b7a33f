//! One module per subcommand; each exposes an `execute` entry point.

pub mod add;
pub mod completions;
pub mod del;
pub mod get;
pub mod list;
pub mod setup;
pub mod update;
