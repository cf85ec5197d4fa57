//! Output rendering for loaded view-models.

pub mod generator;

pub use generator::*;
