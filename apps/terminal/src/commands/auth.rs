//! # Login
//!
//! Username/password check against the credential file before the menu.

use std::io::{BufRead, Write};
use tracing::{debug, error};

use crate::console::Console;
use crate::error::{AppError, AppResult};
use pump_store::Store;

/// Prompts for credentials up to `max_attempts` times.
///
/// Returns the authenticated username. A missing credential file, running
/// out of input, or running out of attempts is fatal.
pub fn login<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &Store,
    max_attempts: u32,
) -> AppResult<String> {
    let users = store.users();
    let known = users.load()?.len();
    debug!(known, "Credential file read");

    for attempt in 1..=max_attempts {
        let Some(username) = console.prompt("Username: ")? else {
            break;
        };
        let Some(password) = console.prompt("Password: ")? else {
            break;
        };

        if users.verify(&username, &password)? {
            console.line(format!("Welcome, {}!", username))?;
            return Ok(username);
        }

        debug!(attempt, max_attempts, "Login attempt rejected");
        console.line("Invalid username or password.")?;
    }

    error!(max_attempts, "Login attempts exhausted");
    Err(AppError::fatal("Too many failed login attempts. Exiting."))
}
