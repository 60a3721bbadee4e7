mod reader;
mod screen;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use screen::Screen;
use std::io::{self, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use view::{Flow, View};

/// Display refresh interval while waiting for moves.
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "arena-renderer", version, about = "Live board for arena games")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let listener = TcpListener::bind(("localhost", args.port))
        .with_context(|| format!("cannot listen on localhost:{}", args.port))?;
    info!(port = args.port, "waiting for a game");

    let (stream, peer) = listener.accept().context("accepting the driver connection")?;
    info!(%peer, "driver connected");

    let control = stream.try_clone().context("cloning the driver connection")?;
    let (events, _reader) = reader::spawn(stream);

    let mut view = View::new();
    let result = Screen::enter(io::stdout())
        .context("preparing the terminal")
        .and_then(|mut screen| run(&mut view, &events, &control, screen.out()));

    info!(plies = view.board().ply(), link = ?view.link(), "renderer closed");
    result
}

fn run<W: Write>(
    view: &mut View,
    events: &Receiver<reader::StreamEvent>,
    control: &TcpStream,
    out: &mut W,
) -> Result<()> {
    let mut consuming = true;

    loop {
        view.draw(out)?;

        if event::poll(if consuming { Duration::ZERO } else { TICK })? {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    break;
                }
            }
        }

        if !consuming {
            continue;
        }

        match events.recv_timeout(TICK) {
            Ok(event) => {
                if view.on_event(event) == Flow::Close {
                    consuming = false;
                    disconnect(control);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => consuming = false,
        }
    }

    disconnect(control);
    Ok(())
}

fn disconnect(stream: &TcpStream) {
    if let Err(e) = stream.shutdown(Shutdown::Both) {
        if e.kind() != io::ErrorKind::NotConnected {
            warn!(error = %e, "shutting down the driver connection");
        }
    }
}
