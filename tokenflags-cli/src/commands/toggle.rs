//! Toggle command - activate controls the way a click would.

use super::{GlobalOptions, Session};
use crate::error::CliResult;

pub fn run(options: &GlobalOptions, keys: &[String]) -> CliResult<()> {
    let mut session = Session::open(options)?;
    session.load_token(None);

    for key in keys {
        session.panel.activate(key)?;
        if let Some(control) = session.panel.control(key) {
            session.info(&format!("{} -> {}", control.label(), control.display()));
        }
    }

    let token = session.commit()?;
    println!("{}", token);
    Ok(())
}
