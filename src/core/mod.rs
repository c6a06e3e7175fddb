//! Core engine types: RNG, grid geometry, and the `Engine` trait.
//!
//! This module contains the building blocks that are game-agnostic.
//! The concrete rule engines in `crate::games` compose them.

pub mod engine;
pub mod grid;
pub mod rng;

pub use engine::Engine;
pub use grid::{Direction, Point};
pub use rng::{GameRng, GameRngState};
