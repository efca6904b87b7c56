//! Coordinate types.
//!
//! World units are pixels with a top-left origin and y growing downward,
//! matching the texture space the sprites are authored in.

mod vec2;

pub use vec2::Vec2;
