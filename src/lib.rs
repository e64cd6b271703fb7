pub mod assemble;
pub mod assign;
pub mod cli;
pub mod formats;
pub mod model;
pub mod pattern;
pub mod runtime;
pub mod store;
pub mod workflow;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
