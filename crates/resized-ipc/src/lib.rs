//! resized IPC
//!
//! The command channel between key bindings / shell scripts and the
//! `resized` agent: a named pipe carrying one short command per line.
//!
//! ```text
//! echo l7 > /tmp/resized
//! echo l3 > /tmp/resized
//! echo QUIT > /tmp/resized
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use nix::sys::stat::{self, Mode};
use nix::unistd;
use tracing::{debug, info, warn};

/// Default location of the command pipe
pub const DEFAULT_FIFO_PATH: &str = "/tmp/resized";

/// Lines starting with this token stop the agent
pub const QUIT: &str = "QUIT";

/// One line received on the pipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A command for the placement core, newline already stripped
    Command(String),
    /// Shutdown request
    Quit,
}

impl Message {
    /// Decode a raw line (with or without its trailing newline)
    pub fn from_line(line: &[u8]) -> Self {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        if line.starts_with(QUIT.as_bytes()) {
            return Message::Quit;
        }

        Message::Command(String::from_utf8_lossy(line).into_owned())
    }
}

/// Errors produced by the command pipe.
#[derive(Debug, thiserror::Error)]
pub enum FifoError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("mkfifo failed: {0}")]
    Mkfifo(#[from] Errno),
}

/// Named pipe the agent reads its commands from.
///
/// The pipe file is created by [`CommandFifo::create`] and removed again
/// when the value is dropped.
pub struct CommandFifo {
    path: PathBuf,
}

impl CommandFifo {
    /// Create the pipe at `path`, replacing whatever file is already there
    pub fn create(path: impl AsRef<Path>) -> Result<Self, FifoError> {
        let path = path.as_ref().to_path_buf();

        // Writers can be any local user, so the pipe must end up 0666
        stat::umask(Mode::empty());
        let mode = Mode::from_bits_truncate(0o666);

        match unistd::mkfifo(&path, mode) {
            Ok(()) => {}
            Err(Errno::EEXIST) => {
                debug!("Replacing stale file at {:?}", path);
                std::fs::remove_file(&path)?;
                unistd::mkfifo(&path, mode)?;
            }
            Err(e) => return Err(e.into()),
        }

        info!("Command pipe ready at {:?}", path);
        Ok(Self { path })
    }

    /// The filesystem path of the pipe.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Feed every received command to `handler` until `QUIT` arrives.
    ///
    /// Opening the pipe blocks until a writer shows up; when the writer
    /// closes its end the pipe is simply reopened.
    pub fn run<F: FnMut(&str)>(&self, mut handler: F) -> Result<(), FifoError> {
        loop {
            let reader = BufReader::new(File::open(&self.path)?);
            if drain(reader, &mut handler)?.is_break() {
                info!("Quit requested on {:?}", self.path);
                return Ok(());
            }
        }
    }
}

impl Drop for CommandFifo {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Failed to remove command pipe {:?}: {}", self.path, e);
        }
    }
}

/// Read lines until EOF or `QUIT`, handing each command to `handler`
fn drain<R: BufRead, F: FnMut(&str)>(
    mut reader: R,
    handler: &mut F,
) -> Result<ControlFlow<()>, FifoError> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(ControlFlow::Continue(()));
        }

        match Message::from_line(&line) {
            Message::Quit => return Ok(ControlFlow::Break(())),
            Message::Command(command) => {
                debug!("Received command {:?}", command);
                handler(&command);
            }
        }
    }
}
