//! Account Service Module
//!
//! User accounts and everything bound to them: registration with uniqueness
//! pre-checks, bearer-token login, the email-verification and password-reset
//! workflows, and the authenticated account's address book.

// Public exports
pub mod contract;
pub use contract::{Account, AccountError, AccountPatch, NewAccount};

pub mod config;
pub use config::Config;

pub mod api;
pub mod domain;
pub mod infra;
