//! Terminal replay viewer (default binary).
//!
//! Loads a frame log in the background, then plays it back in the terminal
//! with crossterm input and the framebuffer renderer from `arena_replay::term`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use arena_replay::core::{FitParams, Viewer, ViewerConfig};
use arena_replay::input::{handle_key_event, should_quit, DragTracker};
use arena_replay::loader::{spawn_load, FrameSource, LoadEvent, Replay};
use arena_replay::term::{
    Captions, FrameBuffer, PlaybackStatus, RenderThrottle, ReplayView, Scene, TerminalRenderer,
    Viewport,
};
use arena_replay::types::{
    ViewerCommand, CAMERA_MARGIN, CAMERA_MIN_SIZE, DEFAULT_FRAME_SPEED_MS, UI_TICK_MS,
};

/// Longest the loop sleeps when nothing is scheduled.
const IDLE_REDRAW_MS: u64 = 250;

/// Replay viewer for arena shooter frame logs.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Replay log: a file path or an http(s):// URL.
    source: String,

    /// Milliseconds between frames during playback.
    #[arg(long, env = "ARENA_REPLAY_SPEED_MS", default_value_t = DEFAULT_FRAME_SPEED_MS)]
    speed_ms: u32,

    /// World units added around the living players when fitting the camera.
    #[arg(long, default_value_t = CAMERA_MARGIN)]
    margin: f64,

    /// Smallest camera width/height in world units.
    #[arg(long, default_value_t = CAMERA_MIN_SIZE)]
    min_size: f64,

    /// Start playing as soon as the replay is loaded.
    #[arg(long)]
    autoplay: bool,

    /// Write logs to this file (the terminal is busy drawing).
    #[arg(long, env = "ARENA_REPLAY_LOG", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            frame_speed_ms: self.speed_ms,
            fit: FitParams {
                margin: self.margin,
                min_size: self.min_size,
            },
            autoplay: self.autoplay,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let source = FrameSource::parse(&cli.source);
    log::info!("loading replay from {}", source);
    let loads = spawn_load(source.clone());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, cli.viewer_config(), &source, loads);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    config: ViewerConfig,
    source: &FrameSource,
    loads: Receiver<LoadEvent>,
) -> Result<()> {
    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as u64;

    let view = ReplayView::default();
    let mut scene = Scene::new();
    let mut captions = Captions::default();
    let mut drag = DragTracker::new();
    let mut throttle = RenderThrottle::new(IDLE_REDRAW_MS);
    let mut fb = FrameBuffer::new(0, 0);

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut viewer = Viewer::new(config, view.canvas_for(viewport));

    let mut notice = Some(format!("loading {}", source));
    let mut pending = Some(loads);

    loop {
        let now = now_ms();

        if let Some(rx) = &pending {
            match rx.try_recv() {
                Ok(LoadEvent::Loaded(replay)) => {
                    let Replay { map, frames } = *replay;
                    viewer.load(map, frames, now, &mut scene, &mut captions);
                    notice = None;
                    pending = None;
                }
                Ok(LoadEvent::Failed(e)) => {
                    notice = Some(format!("load failed: {}", e));
                    pending = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    notice = Some("loader exited without a result".to_string());
                    pending = None;
                }
            }
            if pending.is_none() {
                throttle.invalidate();
            }
        }

        let changed = viewer.poll(now, &mut scene, &mut captions);
        let captions_changed = captions.expire(now);

        if throttle.should_render(now, scene.revision(), changed || captions_changed) {
            let clock = viewer.clock();
            let status = PlaybackStatus {
                frame_index: clock.current_index(),
                frame_count: clock.len(),
                playing: clock.is_playing(),
                speed_ms: clock.frame_speed_ms(),
                notice: notice.as_deref(),
            };
            let active = captions.active(now);
            view.render_into(&scene, &status, &active, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until the next tick or animation step.
        let mut wait_ms = match viewer.next_wakeup_ms(now) {
            Some(0) => UI_TICK_MS as u64,
            Some(ms) => ms.min(IDLE_REDRAW_MS),
            None => IDLE_REDRAW_MS,
        };
        if pending.is_some() {
            wait_ms = wait_ms.min(UI_TICK_MS as u64);
        }

        if !event::poll(Duration::from_millis(wait_ms))? {
            continue;
        }
        let command = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                handle_key_event(key)
            }
            Event::Mouse(mouse) => drag.handle(mouse),
            Event::Resize(w, h) => {
                viewport = Viewport::new(w, h);
                viewer.resize(view.canvas_for(viewport), now_ms());
                term.invalidate();
                throttle.invalidate();
                None
            }
            _ => None,
        };

        if let Some(command) = command {
            apply(&mut viewer, command, now_ms(), &mut scene, &mut captions);
            throttle.invalidate();
        }
    }
}

fn apply(
    viewer: &mut Viewer,
    command: ViewerCommand,
    now: u64,
    scene: &mut Scene,
    captions: &mut Captions,
) {
    if !viewer.apply(command, now, scene, captions) {
        log::debug!("command {} had no effect", command.as_str());
    }
}
