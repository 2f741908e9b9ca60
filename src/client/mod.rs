//! Presentation client for the relay.
//!
//! - `api`: the relay operations and their HTTP implementation
//! - `geolocation`: the device position capability
//! - `state`: query state and the events that update it
//! - `display`: pure derivations of what the view renders
//! - `session`: the async driver tying them together

pub mod api;
pub mod display;
pub mod geolocation;
pub mod session;
pub mod state;

pub use api::*;
pub use display::*;
pub use geolocation::*;
pub use session::*;
pub use state::*;
