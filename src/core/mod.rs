//! Core primitives.
//!
//! Vector and rectangle math shared by every simulation stage, plus the
//! state hasher used to check replays for determinism.

pub mod vec2;
pub mod rect;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use rect::Rect;
pub use hash::{compute_state_hash, StateHash, StateHasher};
