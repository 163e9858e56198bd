//! Type definitions for the exchange API

pub mod actions;
pub mod api;
pub mod constants;
pub mod market;

// Re-export commonly used types
pub use actions::*;
pub use api::*;
pub use constants::*;
pub use market::*;
