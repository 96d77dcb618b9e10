//! CLI command handlers
//!
//! Each handler issues one request through the agent and prints the reply a
//! chat user would see. Claim rejections are replies, not failures; ledger and
//! clock failures propagate to `main`.

use anyhow::Result;
use reserva_agent::AgentError;

pub mod channel;
pub mod claims;
pub mod run;
pub mod sweep;

/// Print the reply for `result`, turning rejections into their user-facing text
pub(crate) fn reply<T>(
    result: Result<T, AgentError>,
    render: impl FnOnce(T) -> String,
) -> Result<()> {
    match result {
        Ok(value) => {
            println!("{}", render(value));
            Ok(())
        }
        Err(err) => match err.rejection() {
            Some(rejection) => {
                println!("{rejection}");
                Ok(())
            }
            None => Err(err.into()),
        },
    }
}

/// Print a listing, one entry per line, or a placeholder when empty
pub(crate) fn print_list(entries: &[String], empty: &str) {
    if entries.is_empty() {
        println!("{empty}");
        return;
    }
    for entry in entries {
        println!("{entry}");
    }
}
