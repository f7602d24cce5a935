//! MoveResize Module
//!
//! Geometry requests for a single window: move/resize, maximize and
//! fullscreen. Move/resize goes through `_NET_MOVERESIZE_WINDOW` when the
//! window manager supports it and falls back to plain `ConfigureWindow`
//! requests otherwise.

use anyhow::Result;
use bitflags::bitflags;
use tracing::debug;
use x11rb::protocol::xproto::Window;

use crate::wm::display::XDisplay;
use crate::wm::ewmh::Atoms;
use crate::wm::netwm::{send_client_message, wm_supports};

bitflags! {
    /// Field-presence bits of the `_NET_MOVERESIZE_WINDOW` flags word.
    /// Bits 0-7 hold the gravity.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MoveResizeFlags: u32 {
        const X      = 1 << 8;
        const Y      = 1 << 9;
        const WIDTH  = 1 << 10;
        const HEIGHT = 1 << 11;
    }
}

/// `_NET_WM_STATE` action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum StateMode {
    Remove = 0,
    Add = 1,
    Toggle = 2,
}

/// Requested geometry; `None` leaves that field unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveResize {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl MoveResize {
    pub fn rect(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn flags(&self) -> MoveResizeFlags {
        let mut flags = MoveResizeFlags::empty();
        flags.set(MoveResizeFlags::X, self.x.is_some());
        flags.set(MoveResizeFlags::Y, self.y.is_some());
        flags.set(MoveResizeFlags::WIDTH, self.width.is_some());
        flags.set(MoveResizeFlags::HEIGHT, self.height.is_some());
        flags
    }

    /// Position usable by a plain `ConfigureWindow`
    fn position(&self) -> Option<(i32, i32)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x >= 0 && y >= 0 => Some((x, y)),
            _ => None,
        }
    }

    /// Size usable by a plain `ConfigureWindow`
    fn size(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w >= 1 && h >= 1 => Some((w as u32, h as u32)),
            _ => None,
        }
    }
}

/// Unset fields travel as -1, like every other EWMH client sends them
fn wire(value: Option<i32>) -> u32 {
    value.unwrap_or(-1) as u32
}

/// Move and/or resize `window`.
///
/// `gravity` is passed through in the low byte of the flags word.
pub fn move_resize<D: XDisplay + ?Sized>(
    display: &D,
    atoms: &Atoms,
    window: Window,
    gravity: u32,
    request: MoveResize,
) -> Result<()> {
    if wm_supports(display, atoms, atoms._net_moveresize_window) {
        let flags = (gravity & 0xff) | request.flags().bits();
        debug!("_NET_MOVERESIZE_WINDOW for {}: {:?}", window, request);
        return send_client_message(
            display,
            window,
            atoms._net_moveresize_window,
            [
                flags,
                wire(request.x),
                wire(request.y),
                wire(request.width),
                wire(request.height),
            ],
        );
    }

    match (request.position(), request.size()) {
        (Some((x, y)), Some((w, h))) => {
            debug!("Fallback move+resize of {} to {}x{}+{}+{}", window, w, h, x, y);
            display.move_resize_window(window, x, y, w, h)
        }
        (Some((x, y)), None) => {
            debug!("Fallback move of {} to +{}+{}", window, x, y);
            display.move_window(window, x, y)
        }
        (None, Some((w, h))) => {
            debug!("Fallback resize of {} to {}x{}", window, w, h);
            display.resize_window(window, w, h)
        }
        (None, None) => {
            debug!("Nothing to configure for {}: {:?}", window, request);
            Ok(())
        }
    }
}

/// Add, remove or toggle both maximized states of `window`
pub fn maximize<D: XDisplay + ?Sized>(
    display: &D,
    atoms: &Atoms,
    window: Window,
    mode: StateMode,
) -> Result<()> {
    send_client_message(
        display,
        window,
        atoms.net_wm_state,
        [
            mode as u32,
            atoms._net_wm_state_maximized_vert,
            atoms._net_wm_state_maximized_horz,
            0,
            0,
        ],
    )
}

/// Add, remove or toggle the fullscreen state of `window`
pub fn fullscreen<D: XDisplay + ?Sized>(
    display: &D,
    atoms: &Atoms,
    window: Window,
    mode: StateMode,
) -> Result<()> {
    send_client_message(
        display,
        window,
        atoms.net_wm_state,
        [mode as u32, atoms._net_wm_state_fullscreen, 0, 0, 0],
    )
}
