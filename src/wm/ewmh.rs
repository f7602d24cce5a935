//! EWMH (Extended Window Manager Hints) atoms
//!
//! Every atom the agent asks the window manager about, interned once at
//! start-up. Predefined atoms (`ATOM`, `CARDINAL`, `WINDOW`, `STRING`,
//! `WM_NAME`) come straight from `AtomEnum` and are not listed here.

use anyhow::Result;
use x11rb::protocol::xproto::Atom;

use crate::wm::display::XDisplay;

/// Holds all interned EWMH atoms
#[derive(Debug, Clone)]
pub struct Atoms {
    pub net_supported: Atom,
    pub net_client_list: Atom,
    pub net_active_window: Atom,
    pub net_current_desktop: Atom,
    pub net_wm_desktop: Atom,
    pub net_wm_name: Atom,
    pub net_wm_state: Atom,
    pub _net_wm_state_fullscreen: Atom,
    pub _net_wm_state_maximized_vert: Atom,
    pub _net_wm_state_maximized_horz: Atom,
    pub _net_moveresize_window: Atom,
    pub utf8_string: Atom,
    // Legacy GNOME (WIN_*) hints, still exported by some older WMs
    pub _win_client_list: Atom,
    pub _win_workspace: Atom,
}

impl Atoms {
    /// Intern all required atoms
    pub fn new<D: XDisplay + ?Sized>(display: &D) -> Result<Self> {
        let intern = |name: &str| display.intern_atom(name);

        Ok(Self {
            net_supported: intern("_NET_SUPPORTED")?,
            net_client_list: intern("_NET_CLIENT_LIST")?,
            net_active_window: intern("_NET_ACTIVE_WINDOW")?,
            net_current_desktop: intern("_NET_CURRENT_DESKTOP")?,
            net_wm_desktop: intern("_NET_WM_DESKTOP")?,
            net_wm_name: intern("_NET_WM_NAME")?,
            net_wm_state: intern("_NET_WM_STATE")?,
            _net_wm_state_fullscreen: intern("_NET_WM_STATE_FULLSCREEN")?,
            _net_wm_state_maximized_vert: intern("_NET_WM_STATE_MAXIMIZED_VERT")?,
            _net_wm_state_maximized_horz: intern("_NET_WM_STATE_MAXIMIZED_HORZ")?,
            _net_moveresize_window: intern("_NET_MOVERESIZE_WINDOW")?,
            utf8_string: intern("UTF8_STRING")?,
            _win_client_list: intern("_WIN_CLIENT_LIST")?,
            _win_workspace: intern("_WIN_WORKSPACE")?,
        })
    }
}
