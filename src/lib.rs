//! resized core
//!
//! Everything between a command string and the X server: configuration,
//! the EWMH client plumbing and the placement state machine.

pub mod config;
pub mod shared;
pub mod wm;
