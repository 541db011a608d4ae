//! Archery: a bow bouncing along the left edge of the screen, a three-ring
//! target in the bottom-right corner, and a menu/pause layer on top.
//!
//! Everything here is terminal-agnostic game logic; the binary owns the
//! terminal, the frame clock and the renderer.

pub mod compute;
pub mod config;
pub mod context;
pub mod entities;
pub mod error;
pub mod input;
pub mod menu;
pub mod scenery;
