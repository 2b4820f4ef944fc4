//! Core types shared by the extraction, resolution, and walking layers.

pub mod errors;
pub mod model;
