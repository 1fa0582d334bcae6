use std::env;
use std::io::{self, stdout};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod app;
mod input;
mod render;

use app::App;
use render::Renderer;
use scribe::fs::DiskFiles;
use scribe::scripting::ScriptEngine;

#[tokio::main]
async fn main() -> io::Result<()> {
    // Logs go to stderr so they never mix with the view on stdout.
    // RUST_LOG=scribe=debug shows session activity.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = ScriptEngine::new();
    if let Err(err) = config.load_default() {
        warn!("{err}");
    }

    let mut app = App::new(config.settings(), DiskFiles);
    for path in env::args().skip(1) {
        app.open(path);
    }

    let renderer = Renderer::new();
    let mut out = stdout();
    renderer.render(&mut out, &app)?;
    app.redraw = false;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Main loop
    while app.running {
        renderer.prompt(&mut out)?;
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    input::handle_line(&mut app, &line);
                    renderer.render(&mut out, &app)?;
                    app.redraw = false;
                }
                None => app.request_quit(true),
            },
            _ = tokio::signal::ctrl_c() => {
                app.request_quit(false);
                renderer.render(&mut out, &app)?;
            }
        }
    }

    Ok(())
}
