//! Countdown Timer - a background countdown with an HTTP control surface
//!
//! Digit entry is parsed into a duration, and a single countdown session
//! ticks in a background task whether or not a UI is attached. Progress is
//! pushed to subscribers and the current state can be read back at any time.

pub mod api;
pub mod config;
pub mod duration;
pub mod engine;
pub mod error;
pub mod services;
pub mod state;
mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use engine::{CountdownEngine, SessionHandle};
pub use error::{InputRejected, Rejected};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
