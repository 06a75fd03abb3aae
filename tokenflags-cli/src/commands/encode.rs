//! Encode command - assign control values and print the token.

use super::{GlobalOptions, Session, parse_assignment};
use crate::error::CliResult;

pub fn run(options: &GlobalOptions, from: Option<&str>, assignments: &[String]) -> CliResult<()> {
    let mut session = Session::open(options)?;
    session.load_token(from);

    for assignment in assignments {
        let (key, value) = parse_assignment(assignment)?;
        session.panel.set(key, value)?;
        if let Some(control) = session.panel.control(key) {
            session.info(&format!("{} = {}", control.label(), control.display()));
        }
    }

    let token = session.commit()?;
    println!("{}", token);
    Ok(())
}
