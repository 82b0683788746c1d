//! Board ownership and match resolution.

pub mod engine;

pub use engine::BoardEngine;
