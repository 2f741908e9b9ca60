//! Configuration structures and loading utilities.
//!
//! Every configuration struct loads from environment variables. Only the
//! upstream credential is mandatory; everything else has a default.

pub mod logging;
pub mod metrics;
pub mod relay;

pub use logging::*;
pub use metrics::*;
pub use relay::*;
