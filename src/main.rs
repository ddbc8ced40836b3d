//! Blockfall terminal runner.
//!
//! Reads config from the environment, optionally installs a file logger,
//! then runs a fixed-timestep loop: poll input until the next tick, advance
//! the app, render.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::app::App;
use blockfall::config::AppConfig;
use blockfall::logging::init_file_logger;
use blockfall::term::{FrameBuffer, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Some(path) = &config.log_path {
        init_file_logger(path)?;
    }
    info!("starting with {:?}", config);

    let mut app = App::from_config(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Restore the terminal before reporting any error.
    let restored = term.exit();
    result.and(restored)
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut fb = FrameBuffer::new(0, 0);

    while !app.should_quit() {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => app.handle_key(key),
                    // Held keys repeat through the app's own handler.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => app.handle_key_release(key.code),
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            app.tick(TICK_MS);
        }
    }

    info!("quit");
    Ok(())
}
