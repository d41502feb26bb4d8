//! Replay log decoding.
//!
//! Two layouts are accepted:
//!
//! ```text
//! {"radius": 400, "walls": [...]}          <- map header
//! {"radius": 400, "players": [...], ...}   <- frame 0
//! {"radius": 398, "players": [...], ...}   <- frame 1
//! ```
//!
//! or a single document `{"map": {...}, "frames": [{...}, ...]}` (may be
//! pretty-printed).

use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;
use crate::types::{ArenaMap, Frame};

/// A decoded replay: static map plus ordered frames.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Replay {
    pub map: ArenaMap,
    pub frames: Vec<Frame>,
}

#[derive(Deserialize)]
struct ReplayDocument {
    map: Option<ArenaMap>,
    #[serde(default)]
    frames: Vec<Frame>,
}

pub fn parse_replay(text: &str) -> Result<Replay, LoadError> {
    let first = text.lines().find(|l| !l.trim().is_empty());
    let Some(first) = first else {
        return Err(LoadError::MissingMap);
    };

    if is_document(first) {
        parse_document(text)
    } else {
        parse_lines(text)
    }
}

/// A first line that is not a complete JSON value (pretty-printed `{`) or an
/// object with `map`/`frames` keys starts a document.
fn is_document(first_line: &str) -> bool {
    match serde_json::from_str::<Value>(first_line) {
        Ok(Value::Object(obj)) => obj.contains_key("map") || obj.contains_key("frames"),
        Ok(_) => false,
        Err(_) => true,
    }
}

fn parse_document(text: &str) -> Result<Replay, LoadError> {
    let doc: ReplayDocument = serde_json::from_str(text).map_err(|e| LoadError::Parse {
        line: e.line(),
        source: e,
    })?;
    let map = doc.map.ok_or(LoadError::MissingMap)?;
    finish(map, doc.frames)
}

fn parse_lines(text: &str) -> Result<Replay, LoadError> {
    let mut map: Option<ArenaMap> = None;
    let mut frames = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parse_err = |source| LoadError::Parse {
            line: i + 1,
            source,
        };
        if map.is_none() {
            map = Some(serde_json::from_str(line).map_err(parse_err)?);
        } else {
            frames.push(serde_json::from_str(line).map_err(parse_err)?);
        }
    }

    finish(map.ok_or(LoadError::MissingMap)?, frames)
}

fn finish(map: ArenaMap, frames: Vec<Frame>) -> Result<Replay, LoadError> {
    if frames.is_empty() {
        return Err(LoadError::NoFrames);
    }
    Ok(Replay { map, frames })
}
