//! HTTP request handlers for the relay endpoints.

pub mod forecast;
pub mod health;
pub mod metrics;
pub mod not_found;
pub mod openapi;
pub mod weather;

pub use forecast::*;
pub use health::*;
pub use metrics::*;
pub use not_found::*;
pub use openapi::*;
pub use weather::*;
