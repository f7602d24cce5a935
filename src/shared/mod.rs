//! Helpers shared by the window-directory and placement code

pub mod glob;
