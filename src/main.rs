//! resized
//!
//! Snaps the active X11 window to a 3×3 grid on one of two screen regions.
//! Commands arrive one per line on a named pipe (`/tmp/resized` by default):
//!
//! - `l<d>` / `r<d>`: keypad digit on the left/right region; two digits in a
//!   row span a rectangle, `0` cancels
//! - `+`: toggle maximize
//! - `a<pattern>`: activate the first window whose title matches the glob
//! - `QUIT`: exit

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resized::config::Config;
use resized::wm::{Placer, X11Display};
use resized_ipc::CommandFifo;

const USAGE: &str = "usage: resized [--fifo PATH] [--display NAME]";

/// Command line overrides
#[derive(Debug, Default)]
struct Args {
    fifo: Option<PathBuf>,
    display: Option<String>,
    help: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fifo" => {
                    parsed.fifo = Some(args.next().context("--fifo needs a path")?.into());
                }
                "--display" => {
                    parsed.display = Some(args.next().context("--display needs a name")?);
                }
                "-h" | "--help" => parsed.help = true,
                other => bail!("unknown argument {:?}\n{}", other, USAGE),
            }
        }

        Ok(parsed)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "resized=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    info!("Starting resized");

    let config = Config::load().context("Failed to load configuration")?;
    let fifo_path = args.fifo.unwrap_or_else(|| config.channel.fifo_path.clone());

    let display = X11Display::connect(args.display.as_deref())?;
    let screen_num = display.screen_num();
    info!("Using screen {}", screen_num);

    let mut placer =
        Placer::new(&display, &config).context("Failed to set up placement")?;

    let fifo = CommandFifo::create(&fifo_path)
        .with_context(|| format!("Failed to create command pipe at {:?}", fifo_path))?;

    fifo.run(|command| placer.handle(command))?;

    info!("Goodbye");
    Ok(())
}
