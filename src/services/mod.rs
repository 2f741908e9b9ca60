//! Business logic and service layer modules.
//!
//! The relay itself (`weather`), its provider client (`upstream`), the
//! derived forecast fields (`forecast`), and metrics collection.

pub mod forecast;
pub mod metrics;
pub mod upstream;
pub mod weather;

pub use forecast::*;
pub use metrics::*;
pub use upstream::*;
pub use weather::*;
