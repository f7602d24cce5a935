//! Window Manager Module
//!
//! Client-side EWMH plumbing: property decoding, capability checks, client
//! messages, window lookup, geometry requests and the placement controller
//! built on top of them.

pub mod directory;
pub mod display;
pub mod ewmh;
pub mod moveresize;
pub mod netwm;
pub mod placement;
pub mod property;
pub mod screen;

#[cfg(test)]
pub mod testing;

pub use display::{X11Display, XDisplay};
pub use ewmh::Atoms;
pub use placement::Placer;
