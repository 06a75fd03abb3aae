//! State command - show or clear persisted state.

use colored::Colorize;
use tokenflags_config::StateStore;
use tokenflags_config::state::SOURCE_DATA_KEY;

use super::{GlobalOptions, Session};
use crate::error::CliResult;

pub fn run(options: &GlobalOptions, clear: bool) -> CliResult<()> {
    let mut session = Session::open(options)?;

    if clear {
        session.state.clear()?;
        session.success(&format!("Cleared {}", session.state.path().display()));
        return Ok(());
    }

    print_state(&session.state);
    Ok(())
}

fn print_state(state: &StateStore) {
    println!();
    println!(
        "  {} {}",
        "State:".bright_white().bold(),
        state.path().display()
    );

    if state.is_empty() {
        println!("    {}", "(empty)".dimmed());
        println!();
        return;
    }

    for (key, value) in state.iter() {
        if key == SOURCE_DATA_KEY {
            println!("    {:<12} {}", key, format!("<{} bytes>", value.len() / 2).dimmed());
        } else {
            println!("    {:<12} {}", key, value.cyan());
        }
    }
    println!();
}
