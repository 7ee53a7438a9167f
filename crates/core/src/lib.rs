//! # Boxpack Core
//!
//! Container geometry and packing state for the boxpack 3D bin packing
//! engine.
//!
//! This crate provides the foundational types shared by the search crates:
//!
//! - **Items**: [`BoxItem`] and its axis-aligned [`Rotation`]s
//! - **Free space**: [`Space`] regions with guillotine splitting
//! - **Moves**: [`Placement`] of one item at one position in one rotation
//! - **State**: [`PackingState`] — a persistent value exposing legal-move
//!   enumeration and move application
//!
//! A [`PackingState`] is never mutated by a move: [`PackingState::apply`]
//! returns a new state and leaves the receiver intact, so search trees can
//! hold many versions of the same packing cheaply (the placement history is
//! structurally shared between versions).
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod history;
pub mod item;
pub mod placement;
pub mod space;
pub mod state;

// Re-exports
pub use error::{Error, Result};
pub use history::PlacementLog;
pub use item::{BoxItem, Rotation};
pub use placement::Placement;
pub use space::Space;
pub use state::{PackingState, DEFAULT_PENALTY_FACTOR};
