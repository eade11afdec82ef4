mod cli;
mod run;

pub use cli::{ApplyCommand, Cli, Commands, GraphCommand, OutputFormat, ValidateCommand};
pub use run::{execute_apply, execute_graph, execute_validate, CliError};
