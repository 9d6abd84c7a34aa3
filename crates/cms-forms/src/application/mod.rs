//! Application layer
//!
//! Orchestrates use cases and owns the transport contract.

pub mod commands;
pub mod dto;

pub use commands::FormService;
pub use dto::*;
