//! High-level trading interface

pub mod agent;

pub use agent::{Agent, CancelRequest, OrderRequest};
