pub mod analyze;
pub mod clean;
pub mod cli;
pub mod codegen;
pub mod discriminant;
pub mod error;
pub mod inference;
pub mod merge;
pub mod schema;

use std::process::ExitCode;

fn main() -> ExitCode {
    let command_line_interface = cli::CommandLineInterface::load();
    command_line_interface.run()
}
