//! Check command - strict token validation.

use tokenflags_core::Base32;

use super::{GlobalOptions, Session};
use crate::error::CliResult;

/// Fails unless `token` has exactly the panel's length, only alphabet
/// symbols and no stray bits.
pub fn run(options: &GlobalOptions, token: &str) -> CliResult<()> {
    let session = Session::open(options)?;
    let size = session.panel.size();

    Base32::check(token, size)?;
    session.success(&format!(
        "{} is a valid {}-byte token",
        token.trim(),
        size
    ));
    Ok(())
}
