//! NetWM Module
//!
//! Capability negotiation against `_NET_SUPPORTED` and the client-message
//! path every EWMH request goes through.

use anyhow::Result;
use tracing::debug;
use x11rb::protocol::xproto::{Atom, AtomEnum, EventMask, Window};

use crate::wm::display::{ClientMessage, XDisplay};
use crate::wm::ewmh::Atoms;
use crate::wm::property::get_property;

/// Does the window manager advertise `feature` in root `_NET_SUPPORTED`?
pub fn wm_supports<D: XDisplay + ?Sized>(display: &D, atoms: &Atoms, feature: Atom) -> bool {
    let Some(supported) =
        get_property(display, display.root(), AtomEnum::ATOM, atoms.net_supported)
    else {
        debug!("Root window has no _NET_SUPPORTED list");
        return false;
    };

    supported
        .longs()
        .is_some_and(|list| list.contains(&feature))
}

/// Send an EWMH client message about `window` to the root window.
///
/// Returns as soon as the request is queued; the window manager handles it
/// whenever it gets to it, if at all.
pub fn send_client_message<D: XDisplay + ?Sized>(
    display: &D,
    window: Window,
    message_type: Atom,
    data: [u32; 5],
) -> Result<()> {
    let message = ClientMessage {
        window,
        message_type,
        data,
    };
    debug!(
        "Client message {} for window {}: {:?}",
        message_type, window, data
    );

    display.send_event(
        display.root(),
        EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
        &message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wm::property::RawProperty;
    use crate::wm::testing::{Call, FakeDisplay, ROOT};

    #[test]
    fn test_supported_feature() {
        let display = FakeDisplay::new();
        let atoms = Atoms::new(&display).unwrap();
        display.set_property(
            ROOT,
            atoms.net_supported,
            RawProperty::longs(
                AtomEnum::ATOM,
                &[atoms.net_wm_state, atoms._net_moveresize_window],
            ),
        );

        assert!(wm_supports(&display, &atoms, atoms._net_moveresize_window));
        assert!(!wm_supports(&display, &atoms, atoms.net_wm_desktop));
    }

    #[test]
    fn test_missing_supported_list() {
        let display = FakeDisplay::new();
        let atoms = Atoms::new(&display).unwrap();
        assert!(!wm_supports(&display, &atoms, atoms._net_moveresize_window));
    }

    #[test]
    fn test_supported_list_of_wrong_type() {
        let display = FakeDisplay::new();
        let atoms = Atoms::new(&display).unwrap();
        display.set_property(
            ROOT,
            atoms.net_supported,
            RawProperty::longs(AtomEnum::CARDINAL, &[atoms._net_moveresize_window]),
        );
        assert!(!wm_supports(&display, &atoms, atoms._net_moveresize_window));
    }

    #[test]
    fn test_client_message_goes_to_root() {
        let display = FakeDisplay::new();
        send_client_message(&display, 42, 77, [1, 2, 3, 4, 5]).unwrap();

        assert_eq!(
            display.calls(),
            vec![Call::SendEvent {
                destination: ROOT,
                mask: EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
                message: ClientMessage {
                    window: 42,
                    message_type: 77,
                    data: [1, 2, 3, 4, 5],
                },
            }]
        );
    }

    #[test]
    fn test_client_message_send_failure() {
        let display = FakeDisplay::new();
        display.fail_sends(true);
        assert!(send_client_message(&display, 42, 77, [0; 5]).is_err());
    }
}
