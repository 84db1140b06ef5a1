//! Outbound email delivery.

pub mod client;

pub use client::HttpMailClient;
