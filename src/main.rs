//! Terminal Xiangqi runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for keyboard and mouse input and a custom
//! framebuffer-based renderer (no ratatui widgets/layout).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::{Env, Target};
use log::info;

use xiangqi::config::AppConfig;
use xiangqi::core::{GameSnapshot, GameState};
use xiangqi::input::{handle_key_event, handle_mouse_event, should_quit};
use xiangqi::term::{FrameBuffer, GameView, HitTarget, TerminalRenderer, Viewport};
use xiangqi::types::GameAction;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }
    info!("starting with {:?}", config);

    let mut term = TerminalRenderer::new().with_mouse(config.mouse);
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Append timestamped records to `path`; the screen belongs to the board.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{:5}] {}",
                Local::now().format("%T%.3f"),
                record.level(),
                record.args(),
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut game_state = GameState::new();
    let mut view = GameView::default().with_script(config.script);

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let tick = Duration::from_millis(config.tick_ms);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        game_state.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(tick)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    info!("quit");
                    return Ok(());
                }
                match handle_key_event(key) {
                    Some(GameAction::ToggleScript) => view.toggle_script(),
                    Some(action) => {
                        game_state.apply_action(action);
                    }
                    None => {}
                }
            }
            Event::Mouse(mouse) => {
                let Some((x, y)) = handle_mouse_event(mouse) else {
                    continue;
                };
                match view.hit_test(viewport, x, y) {
                    Some(HitTarget::Square(sq)) => {
                        game_state.select(sq);
                    }
                    Some(HitTarget::ScriptToggle) => view.toggle_script(),
                    None => {}
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
