// File: crates/progress-core/src/types.rs
// Summary: Shared types and constants (canvas size, margins).

use serde::Deserialize;

/// Default logical canvas width.
pub const WIDTH: i32 = 800;
/// Default logical canvas height.
pub const HEIGHT: i32 = 400;

/// Canvas margins, in logical pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right), widened so it cannot overflow.
    pub const fn hsum(&self) -> i64 { self.left as i64 + self.right as i64 }
    /// Total vertical inset (top + bottom), widened so it cannot overflow.
    pub const fn vsum(&self) -> i64 { self.top as i64 + self.bottom as i64 }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(50, 100, 30, 50)
    }
}
