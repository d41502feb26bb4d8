//! Asynchronous replay loading.
//!
//! [`load`] is the async entry point. [`spawn_load`] runs it on a background
//! thread with its own current-thread tokio runtime and reports the outcome
//! over a channel, so a synchronous UI loop can keep drawing while it waits.

use std::sync::mpsc;
use std::thread;

use crate::error::LoadError;
use crate::parse::{parse_replay, Replay};
use crate::source::FrameSource;

/// Outcome of a background load.
#[derive(Debug)]
pub enum LoadEvent {
    Loaded(Box<Replay>),
    Failed(LoadError),
}

pub async fn load(source: &FrameSource) -> Result<Replay, LoadError> {
    let text = fetch_text(source).await?;
    let replay = parse_replay(&text)?;
    log::info!(
        "loaded {} frames ({} walls) from {}",
        replay.frames.len(),
        replay.map.walls.len(),
        source
    );
    Ok(replay)
}

async fn fetch_text(source: &FrameSource) -> Result<String, LoadError> {
    match source {
        FrameSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })
        }
        FrameSource::Url(url) => {
            let http_err = |source| LoadError::Http {
                url: url.clone(),
                source,
            };
            let response = reqwest::get(url.as_str()).await.map_err(http_err)?;
            let response = response.error_for_status().map_err(http_err)?;
            response.text().await.map_err(http_err)
        }
    }
}

/// Load `source` on a background thread.
///
/// Exactly one [`LoadEvent`] is sent; the sender is dropped afterwards.
pub fn spawn_load(source: FrameSource) -> mpsc::Receiver<LoadEvent> {
    let (tx, rx) = mpsc::channel::<LoadEvent>();
    thread::spawn(move || {
        let event = match load_blocking(&source) {
            Ok(replay) => LoadEvent::Loaded(Box::new(replay)),
            Err(e) => {
                log::warn!("loading {} failed: {}", source, e);
                LoadEvent::Failed(e)
            }
        };
        let _ = tx.send(event);
    });
    rx
}

/// Run [`load`] to completion on a fresh current-thread runtime.
pub fn load_blocking(source: &FrameSource) -> Result<Replay, LoadError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(LoadError::Runtime)?;
    runtime.block_on(load(source))
}
