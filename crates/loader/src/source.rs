use std::fmt;
use std::path::PathBuf;

/// Where a replay comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSource {
    File(PathBuf),
    Url(String),
}

impl FrameSource {
    /// `http://` and `https://` identifiers are remote, anything else is a path.
    pub fn parse(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            FrameSource::Url(s.to_string())
        } else {
            FrameSource::File(PathBuf::from(s))
        }
    }
}

impl fmt::Display for FrameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameSource::File(path) => write!(f, "{}", path.display()),
            FrameSource::Url(url) => f.write_str(url),
        }
    }
}
