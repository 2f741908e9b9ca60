//! Utility functions for request metadata and metric labels.

pub mod http;
pub mod route;

pub use http::*;
pub use route::*;
