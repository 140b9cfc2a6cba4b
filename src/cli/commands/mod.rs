//! Command implementations.

mod config;
mod fetch;
mod serve;
mod tracks;

pub use config::run_config;
pub use fetch::run_fetch;
pub use serve::run_serve;
pub use tracks::run_tracks;
