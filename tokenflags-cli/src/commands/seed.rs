//! Seed command.

use tokenflags_engine::Seed;

use crate::error::CliResult;

pub fn run() -> CliResult<()> {
    println!("{}", Seed::random());
    Ok(())
}
