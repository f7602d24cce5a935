//! Screen Module
//!
//! The two snapping regions and the 3×3 grid laid over each of them.
//! Digits follow the numeric keypad: 7 is the top-left cell, 3 the
//! bottom-right one, 0 is not a cell.

use crate::config::{RegionConfig, RegionsConfig};

/// Which region a grid command addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionSide {
    Left,
    Right,
}

/// Usable rectangle of a region, in root coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The region minus its top padding
    pub fn from_region(region: &RegionConfig) -> Self {
        Self {
            x: region.x_offset,
            y: region.top_padding as i32,
            width: region.width as i32,
            height: region.height.saturating_sub(region.top_padding) as i32,
        }
    }

    /// Top-left grid intersection of the cell under `digit`
    pub fn start_corner(&self, digit: u8) -> Option<(i32, i32)> {
        let (col, row) = cell(digit)?;
        Some((
            self.x + col * self.width / 3,
            self.y + row * self.height / 3,
        ))
    }

    /// Bottom-right grid intersection of the cell under `digit`
    pub fn end_corner(&self, digit: u8) -> Option<(i32, i32)> {
        let (col, row) = cell(digit)?;
        Some((
            self.x + (col + 1) * self.width / 3,
            self.y + (row + 1) * self.height / 3,
        ))
    }
}

/// Column and row (from the top) of a keypad digit
fn cell(digit: u8) -> Option<(i32, i32)> {
    match digit {
        1..=9 => {
            let index = i32::from(digit - 1);
            Some((index % 3, 2 - index / 3))
        }
        _ => None,
    }
}

/// Both regions, resolved once from the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub left: Rect,
    pub right: Rect,
}

impl Regions {
    pub fn new(config: &RegionsConfig) -> Self {
        Self {
            left: Rect::from_region(&config.left),
            right: Rect::from_region(&config.right),
        }
    }

    pub fn get(&self, side: RegionSide) -> Rect {
        match side {
            RegionSide::Left => self.left,
            RegionSide::Right => self.right,
        }
    }
}
