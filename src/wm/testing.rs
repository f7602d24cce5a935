//! In-memory display used by the unit tests.
//!
//! Properties are scripted per (window, atom); every request that would
//! change server state is recorded as a [`Call`] instead.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use anyhow::{Result, anyhow};
use x11rb::protocol::xproto::{Atom, AtomEnum, EventMask, Window};

use crate::wm::display::{ClientMessage, XDisplay};
use crate::wm::property::RawProperty;

pub const ROOT: Window = 0x100;

/// A recorded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SendEvent {
        destination: Window,
        mask: EventMask,
        message: ClientMessage,
    },
    Move {
        window: Window,
        x: i32,
        y: i32,
    },
    Resize {
        window: Window,
        width: u32,
        height: u32,
    },
    MoveResize {
        window: Window,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    MapRaised(Window),
    Flush,
}

#[derive(Default)]
pub struct FakeDisplay {
    atoms: RefCell<HashMap<String, Atom>>,
    properties: RefCell<HashMap<(Window, Atom), RawProperty>>,
    broken_windows: RefCell<HashSet<Window>>,
    calls: RefCell<Vec<Call>>,
    fail_sends: Cell<bool>,
}

impl FakeDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atom for `name`, interning it on first use
    pub fn atom(&self, name: &str) -> Atom {
        let mut atoms = self.atoms.borrow_mut();
        let next = 1000 + atoms.len() as Atom;
        *atoms.entry(name.to_string()).or_insert(next)
    }

    pub fn set_property(&self, window: Window, property: Atom, value: RawProperty) {
        self.properties
            .borrow_mut()
            .insert((window, property), value);
    }

    pub fn set_active_window(&self, window: Window) {
        let property = self.atom("_NET_ACTIVE_WINDOW");
        self.set_property(ROOT, property, RawProperty::longs(AtomEnum::WINDOW, &[window]));
    }

    pub fn set_client_list(&self, windows: &[Window]) {
        let property = self.atom("_NET_CLIENT_LIST");
        self.set_property(ROOT, property, RawProperty::longs(AtomEnum::WINDOW, windows));
    }

    /// Set `WM_NAME` as a Latin-1 `STRING`
    pub fn set_title(&self, window: Window, title: &str) {
        self.set_property(
            window,
            AtomEnum::WM_NAME.into(),
            RawProperty::bytes(AtomEnum::STRING, title.as_bytes()),
        );
    }

    pub fn set_supported(&self, features: &[&str]) {
        let list: Vec<Atom> = features.iter().map(|f| self.atom(f)).collect();
        let property = self.atom("_NET_SUPPORTED");
        self.set_property(ROOT, property, RawProperty::longs(AtomEnum::ATOM, &list));
    }

    /// Make every property query on `window` fail like a `BadWindow`
    pub fn break_window(&self, window: Window) {
        self.broken_windows.borrow_mut().insert(window);
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.set(fail);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Client messages sent so far, in order
    pub fn messages(&self) -> Vec<ClientMessage> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::SendEvent { message, .. } => Some(*message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl XDisplay for FakeDisplay {
    fn root(&self) -> Window {
        ROOT
    }

    fn intern_atom(&self, name: &str) -> Result<Atom> {
        Ok(self.atom(name))
    }

    fn get_property(
        &self,
        window: Window,
        property: Atom,
        _type: Atom,
        _long_length: u32,
    ) -> Result<RawProperty> {
        if self.broken_windows.borrow().contains(&window) {
            return Err(anyhow!("BadWindow: {}", window));
        }
        Ok(self
            .properties
            .borrow()
            .get(&(window, property))
            .cloned()
            .unwrap_or_else(RawProperty::absent))
    }

    fn send_event(
        &self,
        destination: Window,
        mask: EventMask,
        message: &ClientMessage,
    ) -> Result<()> {
        if self.fail_sends.get() {
            return Err(anyhow!("connection closed"));
        }
        self.record(Call::SendEvent {
            destination,
            mask,
            message: *message,
        });
        Ok(())
    }

    fn move_window(&self, window: Window, x: i32, y: i32) -> Result<()> {
        self.record(Call::Move { window, x, y });
        Ok(())
    }

    fn resize_window(&self, window: Window, width: u32, height: u32) -> Result<()> {
        self.record(Call::Resize {
            window,
            width,
            height,
        });
        Ok(())
    }

    fn move_resize_window(
        &self,
        window: Window,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    ) -> Result<()> {
        self.record(Call::MoveResize {
            window,
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn map_raised(&self, window: Window) -> Result<()> {
        self.record(Call::MapRaised(window));
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.record(Call::Flush);
        Ok(())
    }
}
