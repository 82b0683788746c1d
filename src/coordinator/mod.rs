//! Timed orchestration around match attempts.

pub mod match_coordinator;

pub use match_coordinator::{MatchCoordinator, ResolutionDelays};
