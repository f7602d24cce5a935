//! Window Directory
//!
//! Looks windows up through the window manager's root properties: the
//! managed-client list, the active window, per-window titles and desktops.
//! Nothing is cached; every call asks the server again.

use anyhow::Result;
use tracing::{debug, warn};
use x11rb::protocol::xproto::{Atom, AtomEnum, Window};

use crate::shared::glob::wildcard_match;
use crate::wm::display::XDisplay;
use crate::wm::ewmh::Atoms;
use crate::wm::netwm::send_client_message;
use crate::wm::property::{get_first_property, get_property};

/// Errors from window lookups
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("cannot get client list properties (_NET_CLIENT_LIST or _WIN_CLIENT_LIST)")]
    ClientListUnavailable,
}

/// All managed windows, in the order the window manager lists them
pub fn client_list<D: XDisplay + ?Sized>(
    display: &D,
    atoms: &Atoms,
) -> Result<Vec<Window>, DirectoryError> {
    let candidates: [(Atom, Atom); 2] = [
        (atoms.net_client_list, AtomEnum::WINDOW.into()),
        (atoms._win_client_list, AtomEnum::CARDINAL.into()),
    ];

    get_first_property(display, display.root(), &candidates)
        .and_then(|prop| prop.longs().map(<[Window]>::to_vec))
        .ok_or(DirectoryError::ClientListUnavailable)
}

/// Title of `window`: `WM_NAME`, falling back to `_NET_WM_NAME`
pub fn window_title<D: XDisplay + ?Sized>(
    display: &D,
    atoms: &Atoms,
    window: Window,
) -> Option<String> {
    let candidates: [(Atom, Atom); 2] = [
        (AtomEnum::WM_NAME.into(), AtomEnum::STRING.into()),
        (atoms.net_wm_name, atoms.utf8_string),
    ];

    get_first_property(display, window, &candidates).and_then(|prop| prop.text())
}

/// First managed window whose title matches the glob `pattern`
pub fn window_by_title<D: XDisplay + ?Sized>(
    display: &D,
    atoms: &Atoms,
    pattern: &str,
) -> Result<Option<Window>, DirectoryError> {
    for window in client_list(display, atoms)? {
        let Some(title) = window_title(display, atoms, window) else {
            continue;
        };
        if wildcard_match(pattern, &title) {
            debug!("Window {} ({:?}) matches {:?}", window, title, pattern);
            return Ok(Some(window));
        }
    }

    Ok(None)
}

/// Root `_NET_ACTIVE_WINDOW`, or 0 when unset
pub fn active_window<D: XDisplay + ?Sized>(display: &D, atoms: &Atoms) -> Window {
    get_property(
        display,
        display.root(),
        AtomEnum::WINDOW,
        atoms.net_active_window,
    )
    .and_then(|prop| prop.first_long())
    .unwrap_or(0)
}

/// Switch to the desktop `window` lives on, then activate and raise it
pub fn activate<D: XDisplay + ?Sized>(display: &D, atoms: &Atoms, window: Window) -> Result<()> {
    let candidates: [(Atom, Atom); 2] = [
        (atoms.net_wm_desktop, AtomEnum::CARDINAL.into()),
        (atoms._win_workspace, AtomEnum::CARDINAL.into()),
    ];

    let desktop = get_first_property(display, window, &candidates).and_then(|p| p.first_long());
    if let Some(desktop) = desktop {
        if let Err(e) = send_client_message(
            display,
            display.root(),
            atoms.net_current_desktop,
            [desktop, 0, 0, 0, 0],
        ) {
            warn!("Cannot switch to desktop {}: {}", desktop, e);
        }
    }

    if let Err(e) = send_client_message(display, window, atoms.net_active_window, [0; 5]) {
        warn!("Cannot send _NET_ACTIVE_WINDOW for window {}: {}", window, e);
    }
    // Not every WM honours _NET_ACTIVE_WINDOW, so raise it ourselves too
    display.map_raised(window)?;

    Ok(())
}
