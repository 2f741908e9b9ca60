//! Data models for the weather relay.
//!
//! `api` holds the HTTP request/response shapes; `weather` holds the
//! domain types shared by the relay and the presentation client.

pub mod api;
pub mod weather;

pub use api::*;
pub use weather::*;
