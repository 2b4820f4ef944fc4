//! Application layer orchestrating domain logic and infrastructure.

pub mod bundle;
pub mod extract;
pub mod resolve;
pub mod walk;
