//! # Menu Commands
//!
//! One module per group of menu actions.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── purchase.rs  ◄─── Fuel keys: price, pay, commit
//! ├── history.rs   ◄─── V / S / X: history, summary, delete
//! └── auth.rs      ◄─── Login before the menu
//! ```
//!
//! Every command takes the console and only the state it needs, and returns
//! an [`AppResult`](crate::error::AppResult) the session loop reports.

pub mod auth;
pub mod history;
pub mod purchase;
