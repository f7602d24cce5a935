//! Property Codec
//!
//! Typed decoding of window properties. The server hands back a type atom,
//! a format (8/16/32) and a byte buffer; we check the type against what was
//! asked for and turn the buffer into a sequence of fixed-width values so no
//! caller ever indexes raw bytes.

use std::ffi::c_ulong;

use tracing::debug;
use x11rb::protocol::xproto::{Atom, AtomEnum, GetPropertyReply, Window};

use crate::wm::display::XDisplay;

/// Upper bound for a single property read, in 32-bit units (4096 bytes)
pub const MAX_PROPERTY_LONGS: u32 = 1024;

/// A `GetProperty` reply as it came off the wire
#[derive(Debug, Clone)]
pub struct RawProperty(pub GetPropertyReply);

impl From<GetPropertyReply> for RawProperty {
    fn from(reply: GetPropertyReply) -> Self {
        Self(reply)
    }
}

impl RawProperty {
    fn new(type_: Atom, format: u8, value_len: u32, value: Vec<u8>) -> Self {
        Self(GetPropertyReply {
            format,
            type_,
            value_len,
            value,
            ..Default::default()
        })
    }

    /// The reply the server sends for a property that does not exist
    pub fn absent() -> Self {
        Self::new(AtomEnum::NONE.into(), 0, 0, Vec::new())
    }

    /// Format-32 property holding `values`
    pub fn longs(type_: impl Into<Atom>, values: &[u32]) -> Self {
        Self::new(type_.into(), 32, values.len() as u32, encode_longs(values))
    }

    /// Format-8 property holding `bytes`
    pub fn bytes(type_: impl Into<Atom>, bytes: &[u8]) -> Self {
        Self::new(type_.into(), 8, bytes.len() as u32, bytes.to_vec())
    }
}

/// Encode 32-bit values the way `ChangeProperty` expects them
pub fn encode_longs(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}

/// Decoded property payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyData {
    Bytes(Vec<u8>),
    Words(Vec<u16>),
    Longs(Vec<u32>),
}

/// A present property whose type matched the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub type_: Atom,
    pub data: PropertyData,
}

impl Property {
    /// Decode `raw`, or `None` if it is missing, of another type, or malformed
    pub fn decode(requested: Atom, raw: RawProperty) -> Option<Self> {
        let reply = raw.0;
        if reply.type_ == u32::from(AtomEnum::NONE) || reply.type_ != requested {
            return None;
        }

        let width = usize::from(reply.format / 8);
        if reply.value.len() != reply.value_len as usize * width {
            return None;
        }

        let data = if let Some(values) = reply.value32() {
            PropertyData::Longs(values.collect())
        } else if let Some(values) = reply.value16() {
            PropertyData::Words(values.collect())
        } else if reply.format == 8 {
            PropertyData::Bytes(reply.value)
        } else {
            return None;
        };

        Some(Self {
            type_: reply.type_,
            data,
        })
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match &self.data {
            PropertyData::Bytes(b) => b.len(),
            PropertyData::Words(w) => w.len(),
            PropertyData::Longs(l) => l.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte length of the value in Xlib's client-side layout.
    ///
    /// Xlib keeps 32-bit items in a C `long`, which is 8 bytes on LP64.
    pub fn native_len(&self) -> usize {
        match &self.data {
            PropertyData::Bytes(b) => b.len(),
            PropertyData::Words(w) => w.len() * 2,
            PropertyData::Longs(l) => l.len() * std::mem::size_of::<c_ulong>(),
        }
    }

    /// The value laid out as Xlib would return it, plus one trailing NUL
    pub fn to_native_buffer(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.native_len() + 1);
        match &self.data {
            PropertyData::Bytes(b) => buf.extend_from_slice(b),
            PropertyData::Words(w) => buf.extend(w.iter().flat_map(|v| v.to_ne_bytes())),
            PropertyData::Longs(l) => {
                buf.extend(l.iter().flat_map(|&v| c_ulong::from(v).to_ne_bytes()))
            }
        }
        buf.push(0);
        buf
    }

    pub fn longs(&self) -> Option<&[u32]> {
        match &self.data {
            PropertyData::Longs(l) => Some(l),
            _ => None,
        }
    }

    pub fn first_long(&self) -> Option<u32> {
        self.longs().and_then(|l| l.first().copied())
    }

    /// String payload up to the first NUL.
    ///
    /// `STRING` is ISO Latin-1; anything else is treated as UTF-8.
    pub fn text(&self) -> Option<String> {
        let PropertyData::Bytes(bytes) = &self.data else {
            return None;
        };
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let bytes = &bytes[..end];

        if self.type_ == u32::from(AtomEnum::STRING) {
            Some(bytes.iter().map(|&b| char::from(b)).collect())
        } else {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

/// Read `property` of `window`, expecting it to have type `type_`.
///
/// Protocol errors are treated like a missing property.
pub fn get_property<D: XDisplay + ?Sized>(
    display: &D,
    window: Window,
    type_: impl Into<Atom>,
    property: impl Into<Atom>,
) -> Option<Property> {
    let (type_, property) = (type_.into(), property.into());

    match display.get_property(window, property, type_, MAX_PROPERTY_LONGS) {
        Ok(raw) => Property::decode(type_, raw),
        Err(e) => {
            debug!("Cannot get property {} of window {}: {}", property, window, e);
            None
        }
    }
}

/// Try `(property, type)` candidates in order; the first present one wins
pub fn get_first_property<D: XDisplay + ?Sized>(
    display: &D,
    window: Window,
    candidates: &[(Atom, Atom)],
) -> Option<Property> {
    candidates
        .iter()
        .find_map(|&(property, type_)| get_property(display, window, type_, property))
}
