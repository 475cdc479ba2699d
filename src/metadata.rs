//! Video metadata types.
//!
//! This module defines the metadata structure returned by
//! [`VideoSource::metadata`](crate::VideoSource::metadata). Metadata is
//! read once when the file is opened and cached for the lifetime of the
//! source.

use std::time::Duration;

/// Metadata for the video stream of an opened file.
///
/// Includes dimensions, frame rate, total frame count, and codec name.
///
/// # Example
///
/// ```no_run
/// use framepick::VideoSource;
///
/// let source = VideoSource::open("input.mp4")?;
/// let metadata = source.metadata();
/// println!("Total Frames: {}", metadata.frame_count);
/// println!("Codec: {}", metadata.codec);
/// # Ok::<(), framepick::FramepickError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Total number of frames.
    ///
    /// Taken from the container when the stream declares an exact count,
    /// otherwise estimated from duration and frame rate. Both values can be
    /// off by a few frames for badly muxed files; the extraction loop treats
    /// this as an upper bound, not a promise.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"hevc"`, `"av1"`).
    pub codec: String,
    /// Duration of the video stream.
    pub duration: Duration,
}
