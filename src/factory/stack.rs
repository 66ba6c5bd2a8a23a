//! Call stack capture for error instances

use regex::Regex;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Most frames kept per captured stack
pub const FRAME_LIMIT: usize = 10;

static LOCATION_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s+at\s+(?P<location>\S.*?)\s*$").ok());

static SYMBOL_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\d+:\s+)?(?P<symbol>\S.*?)\s*$").ok());

/// Symbol prefixes belonging to the capture machinery itself
const INTERNAL_PREFIXES: [&str; 4] = [
    "std::backtrace",
    "<std::backtrace",
    "backtrace::",
    concat!(env!("CARGO_CRATE_NAME"), "::factory::"),
];

/// One resolved call frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub symbol: String,
    pub location: Option<String>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location.as_deref() {
            Some(location) => write!(f, "    at {} ({location})", self.symbol),
            None => write!(f, "    at {}", self.symbol),
        }
    }
}

/// Frames recorded at construction, symbolized on first use
///
/// Capturing only walks the stack. Symbol lookup and parsing happen in
/// [`CapturedStack::frames`], which an error calls once when its stack is
/// first read.
#[derive(Debug, Clone, Default)]
pub struct CapturedStack(Source);

#[derive(Debug, Clone, Default)]
enum Source {
    #[default]
    Empty,
    Unresolved(Arc<Backtrace>),
    Resolved(Vec<Frame>),
}

impl CapturedStack {
    /// Record the frames of whoever is constructing an error
    ///
    /// Holds nothing when the platform cannot produce a backtrace.
    #[must_use]
    pub fn capture() -> Self {
        let backtrace = Backtrace::force_capture();
        if backtrace.status() == BacktraceStatus::Captured {
            Self(Source::Unresolved(Arc::new(backtrace)))
        } else {
            Self(Source::Empty)
        }
    }

    /// A stack with no frames, used when stack traces are disabled
    #[must_use]
    #[inline]
    pub const fn empty() -> Self {
        Self(Source::Empty)
    }

    /// Wrap frames that are already resolved
    #[must_use]
    #[inline]
    pub const fn from_frames(frames: Vec<Frame>) -> Self {
        Self(Source::Resolved(frames))
    }

    /// Resolve symbols and return the caller frames, at most [`FRAME_LIMIT`]
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        match self.0 {
            Source::Empty => Vec::new(),
            Source::Unresolved(ref backtrace) => {
                caller_frames(parse_frames(&backtrace.to_string()))
            }
            Source::Resolved(ref frames) => frames.clone(),
        }
    }
}

/// Drop the leading capture frames and cap the rest
fn caller_frames(frames: Vec<Frame>) -> Vec<Frame> {
    frames
        .into_iter()
        .skip_while(|frame| is_internal(&frame.symbol))
        .take(FRAME_LIMIT)
        .collect()
}

fn is_internal(symbol: &str) -> bool {
    if symbol.contains("::tests::") {
        return false;
    }
    INTERNAL_PREFIXES
        .iter()
        .any(|prefix| symbol.starts_with(prefix))
}

/// Parse the short `Display` form of a std backtrace
///
/// Each `N: symbol` (or unnumbered inlined symbol) line starts a frame, and
/// an `at path:line:col` line attaches a location to the frame above it.
pub fn parse_frames(text: &str) -> Vec<Frame> {
    let (Some(location_re), Some(symbol_re)) = (LOCATION_LINE.as_ref(), SYMBOL_LINE.as_ref())
    else {
        return Vec::new();
    };

    let mut frames: Vec<Frame> = Vec::new();
    for line in text.lines() {
        if let Some(caps) = location_re.captures(line) {
            if let Some(frame) = frames.last_mut()
                && frame.location.is_none()
            {
                frame.location = Some(caps["location"].to_owned());
            }
        } else if let Some(caps) = symbol_re.captures(line) {
            frames.push(Frame {
                symbol: caps["symbol"].to_owned(),
                location: None,
            });
        }
    }
    frames
}
