//! Order and payment ledger for a food-delivery marketplace.
//!
//! The crate is split into layers:
//! - [`domain`]: accounts, orders and menu items, with the rules for moving funds and loyalty
//!   points between them.
//! - [`ports`]: traits for persistence and the admin capability.
//! - [`adapters`]: in-memory implementations of the ports.
//! - [`commands`]: one request type per operation, served by [`commands::DomainLogic`] through
//!   [`tower::Service`].

pub mod adapters;
pub mod commands;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
