//! Placement Module
//!
//! Turns the command stream into window geometry. Grid commands come in
//! pairs: the first digit picks the top-left cell, the second the
//! bottom-right one, and the active window is snapped to the rectangle
//! between them. A pending first corner only survives while the same
//! window stays active.

use anyhow::Result;
use tracing::{debug, info, warn};
use x11rb::protocol::xproto::Window;

use crate::config::{Config, PlacementConfig};
use crate::wm::directory::{activate, active_window, window_by_title, window_title};
use crate::wm::display::XDisplay;
use crate::wm::ewmh::Atoms;
use crate::wm::moveresize::{fullscreen, maximize, move_resize, MoveResize, StateMode};
use crate::wm::screen::{RegionSide, Regions};

/// A parsed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `+`
    ToggleMaximize,
    /// `a<pattern>`
    Activate(&'a str),
    /// `l<key>` / `r<key>`; `key` is whatever followed the selector
    Grid { side: RegionSide, key: Option<char> },
}

impl<'a> Command<'a> {
    /// Parse one command line; unknown selectors yield `None`
    pub fn parse(input: &'a str) -> Option<Self> {
        let mut chars = input.chars();
        match chars.next()? {
            '+' => Some(Command::ToggleMaximize),
            'a' => Some(Command::Activate(chars.as_str())),
            'l' => Some(Command::Grid {
                side: RegionSide::Left,
                key: chars.next(),
            }),
            'r' => Some(Command::Grid {
                side: RegionSide::Right,
                key: chars.next(),
            }),
            _ => None,
        }
    }
}

/// First-corner state of the grid gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Idle,
    /// Keypad digit 1-9 of the first corner
    Corner(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementState {
    pub pending: Pending,
    /// Active window as seen by the last non-empty command
    pub last_active: Window,
}

impl Default for PlacementState {
    fn default() -> Self {
        Self {
            pending: Pending::Idle,
            last_active: 0,
        }
    }
}

/// The placement controller; feed it one command at a time
pub struct Placer<'d, D: XDisplay + ?Sized> {
    display: &'d D,
    atoms: Atoms,
    regions: Regions,
    settings: PlacementConfig,
    state: PlacementState,
}

impl<'d, D: XDisplay + ?Sized> Placer<'d, D> {
    /// Intern the atoms we need and resolve the regions from `config`
    pub fn new(display: &'d D, config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            display,
            atoms: Atoms::new(display)?,
            regions: Regions::new(&config.regions),
            settings: config.placement.clone(),
            state: PlacementState::default(),
        })
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    /// Handle one command. Protocol errors are logged, never returned.
    pub fn handle(&mut self, input: &str) {
        if input.is_empty() {
            return;
        }

        let previous = self.state.last_active;
        self.state.last_active = active_window(self.display, &self.atoms);

        let Some(command) = Command::parse(input) else {
            debug!("Ignoring unknown command {:?}", input);
            return;
        };

        let result = match command {
            Command::ToggleMaximize => self.toggle_maximize(),
            Command::Activate(pattern) => self.activate_matching(pattern),
            Command::Grid { side, key } => self.grid(side, key, previous),
        };

        if let Err(e) = result {
            warn!("Command {:?} failed: {}", input, e);
        }
    }

    fn toggle_maximize(&mut self) -> Result<()> {
        self.state.pending = Pending::Idle;
        let window = self.state.last_active;
        debug!("Toggling maximize on {}", window);

        maximize(self.display, &self.atoms, window, StateMode::Toggle)?;
        self.display.flush()
    }

    fn activate_matching(&mut self, pattern: &str) -> Result<()> {
        self.state.pending = Pending::Idle;

        match window_by_title(self.display, &self.atoms, pattern) {
            Ok(Some(window)) => {
                info!("Activating window {} matching {:?}", window, pattern);
                activate(self.display, &self.atoms, window)?;
                self.display.flush()
            }
            Ok(None) => {
                debug!("No window title matches {:?}", pattern);
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                Ok(())
            }
        }
    }

    fn grid(&mut self, side: RegionSide, key: Option<char>, previous: Window) -> Result<()> {
        let Some(digit) = key.and_then(|c| c.to_digit(10)).map(|d| d as u8) else {
            debug!("Ignoring grid command without a digit: {:?}", key);
            return Ok(());
        };

        if digit == 0 {
            self.state.pending = Pending::Idle;
            return Ok(());
        }

        let window = self.state.last_active;
        let first = match self.state.pending {
            Pending::Corner(first) if window == previous => first,
            _ => {
                debug!("First corner {} on {:?} for window {}", digit, side, window);
                self.state.pending = Pending::Corner(digit);
                return Ok(());
            }
        };

        let rect = self.regions.get(side);
        let (Some((xstart, ystart)), Some((xend, mut yend))) =
            (rect.start_corner(first), rect.end_corner(digit))
        else {
            return Ok(());
        };
        self.state.pending = Pending::Idle;

        if xend <= xstart || yend <= ystart {
            // Reversed or empty: start over with this digit as the first corner
            debug!("Corners {} -> {} do not span a rectangle", first, digit);
            self.state.pending = Pending::Corner(digit);
            return Ok(());
        }

        if window_title(self.display, &self.atoms, window).as_deref()
            == Some(self.settings.terminal_title.as_str())
        {
            if yend - self.settings.terminal_allowance > ystart {
                yend -= self.settings.terminal_allowance;
            } else {
                debug!(
                    "Terminal allowance {} does not fit {} rows, skipping it",
                    self.settings.terminal_allowance,
                    yend - ystart
                );
            }
        }

        let request = MoveResize::rect(xstart, ystart, xend - xstart, yend - ystart);
        info!("Placing window {} at {:?}", window, request);

        if let Err(e) = fullscreen(self.display, &self.atoms, window, StateMode::Remove) {
            warn!("Cannot clear fullscreen on window {}: {}", window, e);
        }
        if let Err(e) = maximize(self.display, &self.atoms, window, StateMode::Remove) {
            warn!("Cannot clear maximize on window {}: {}", window, e);
        }
        move_resize(
            self.display,
            &self.atoms,
            window,
            self.settings.gravity,
            request,
        )?;
        self.display.flush()
    }
}
