//! Display Module
//!
//! The single seam between the placement core and the X server. Everything
//! above this module speaks in terms of [`XDisplay`]; the live connection is
//! an [`X11Display`] wrapping an x11rb `RustConnection`.

use anyhow::{Context, Result};
use tracing::info;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    Atom, ClientMessageEvent, ConfigureWindowAux, ConnectionExt as _, EventMask, StackMode, Window,
};
use x11rb::rust_connection::RustConnection;

use crate::wm::property::RawProperty;

/// A format-32 client message addressed to `window`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientMessage {
    pub window: Window,
    pub message_type: Atom,
    pub data: [u32; 5],
}

/// The protocol operations the core needs from a display connection.
///
/// Queries are synchronous round-trips. Everything else is queued and only
/// guaranteed to reach the server after [`XDisplay::flush`].
pub trait XDisplay {
    /// Root window of the screen we were connected to
    fn root(&self) -> Window;

    /// Intern `name`, creating the atom if it does not exist yet
    fn intern_atom(&self, name: &str) -> Result<Atom>;

    /// Fetch up to `long_length` 32-bit units of `property`
    fn get_property(
        &self,
        window: Window,
        property: Atom,
        type_: Atom,
        long_length: u32,
    ) -> Result<RawProperty>;

    /// Queue `message` for delivery to `destination` with `mask`
    fn send_event(&self, destination: Window, mask: EventMask, message: &ClientMessage)
        -> Result<()>;

    fn move_window(&self, window: Window, x: i32, y: i32) -> Result<()>;

    fn resize_window(&self, window: Window, width: u32, height: u32) -> Result<()>;

    fn move_resize_window(&self, window: Window, x: i32, y: i32, width: u32, height: u32)
        -> Result<()>;

    /// Raise `window` to the top of the stack and map it
    fn map_raised(&self, window: Window) -> Result<()>;

    /// Push every queued request to the server
    fn flush(&self) -> Result<()>;
}

/// Live X11 connection
pub struct X11Display {
    conn: RustConnection,
    screen_num: usize,
    root: Window,
}

impl X11Display {
    /// Connect to `display_name`, or `$DISPLAY` when `None`
    pub fn connect(display_name: Option<&str>) -> Result<Self> {
        let (conn, screen_num) =
            x11rb::connect(display_name).context("Failed to connect to X server")?;

        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .context("X server reported no screen for our connection")?;

        info!("Connected to X server, screen {}, root window {}", screen_num, root);

        Ok(Self {
            conn,
            screen_num,
            root,
        })
    }

    pub fn screen_num(&self) -> usize {
        self.screen_num
    }
}

impl XDisplay for X11Display {
    fn root(&self) -> Window {
        self.root
    }

    fn intern_atom(&self, name: &str) -> Result<Atom> {
        Ok(self.conn.intern_atom(false, name.as_bytes())?.reply()?.atom)
    }

    fn get_property(
        &self,
        window: Window,
        property: Atom,
        type_: Atom,
        long_length: u32,
    ) -> Result<RawProperty> {
        let reply = self
            .conn
            .get_property(false, window, property, type_, 0, long_length)?
            .reply()?;

        Ok(reply.into())
    }

    fn send_event(
        &self,
        destination: Window,
        mask: EventMask,
        message: &ClientMessage,
    ) -> Result<()> {
        let event = ClientMessageEvent::new(32, message.window, message.message_type, message.data);
        self.conn.send_event(false, destination, mask, event)?;
        Ok(())
    }

    fn move_window(&self, window: Window, x: i32, y: i32) -> Result<()> {
        self.conn
            .configure_window(window, &ConfigureWindowAux::new().x(x).y(y))?;
        Ok(())
    }

    fn resize_window(&self, window: Window, width: u32, height: u32) -> Result<()> {
        self.conn.configure_window(
            window,
            &ConfigureWindowAux::new().width(width).height(height),
        )?;
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
        self.conn.configure_window(
            window,
            &ConfigureWindowAux::new()
                .x(x)
                .y(y)
                .width(width)
                .height(height),
        )?;
        Ok(())
    }

    fn map_raised(&self, window: Window) -> Result<()> {
        self.conn.configure_window(
            window,
            &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE),
        )?;
        self.conn.map_window(window)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }
}
