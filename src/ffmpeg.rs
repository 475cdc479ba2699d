//! FFmpeg log verbosity control.
//!
//! FFmpeg has its own logging system separate from the Rust
//! [`log`](https://crates.io/crates/log) crate, and by default it chatters
//! to stderr about codec quirks and container oddities while frames are
//! being decoded. This module wraps FFmpeg's log-level API so callers can
//! tune that output without importing `ffmpeg-next` themselves.
//!
//! This controls **FFmpeg's own console output** only. Rust-side messages
//! emitted through the `log` facade are configured with a standard `log`
//! subscriber instead.
//!
//! # Example
//!
//! ```no_run
//! use framepick::{FfmpegLogLevel, VideoSource, set_ffmpeg_log_level};
//!
//! // Only let actual decode errors through.
//! set_ffmpeg_log_level(FfmpegLogLevel::Error);
//!
//! let source = VideoSource::open("input.mp4")?;
//! # Ok::<(), framepick::FramepickError>(())
//! ```

use ffmpeg_next::util::log::Level;

/// Verbosity level for FFmpeg's internal logger.
///
/// Maps directly to FFmpeg's `AV_LOG_*` constants; setting a level
/// suppresses all messages below that severity.
///
/// # Ordering (most verbose to most quiet)
///
/// `Trace` > `Debug` > `Verbose` > `Info` > `Warning` > `Error` > `Fatal` > `Panic` > `Quiet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    /// Print nothing at all.
    Quiet,
    /// Only log right before the process aborts.
    Panic,
    /// Only log unrecoverable errors (the context becomes invalid but the
    /// process may continue).
    Fatal,
    /// Log recoverable errors.
    Error,
    /// Log warnings (FFmpeg's default level).
    Warning,
    /// Log informational messages.
    Info,
    /// Log detailed informational messages.
    Verbose,
    /// Log debugging information.
    Debug,
    /// Extremely noisy tracing output.
    Trace,
}

impl From<FfmpegLogLevel> for Level {
    fn from(level: FfmpegLogLevel) -> Self {
        match level {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Panic => Level::Panic,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Verbose => Level::Verbose,
            FfmpegLogLevel::Debug => Level::Debug,
            FfmpegLogLevel::Trace => Level::Trace,
        }
    }
}

/// Set the verbosity of FFmpeg's internal logger.
///
/// Affects what the FFmpeg libraries print to stderr for the whole process.
///
/// # Example
///
/// ```no_run
/// use framepick::{FfmpegLogLevel, set_ffmpeg_log_level};
///
/// // Silence FFmpeg completely.
/// set_ffmpeg_log_level(FfmpegLogLevel::Quiet);
/// ```
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level.into());
}
