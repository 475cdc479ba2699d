//! Error types for the `framepick` crate.
//!
//! This module defines [`FramepickError`], the unified error type returned by
//! all fallible operations in the crate. Variants carry enough context (file
//! paths, frame indices, requested counts) to diagnose a failure without
//! additional logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framepick` operations.
///
/// Every public method that can fail returns `Result<T, FramepickError>`.
/// All failures here are deterministic and non-transient (bad path, bad
/// argument, full disk); nothing in this crate retries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramepickError {
    /// The video file could not be opened by the demuxer.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// The sampling policy string is neither `normal` nor `random`.
    #[error("Unknown sampling policy `{0}` (expected `normal` or `random`)")]
    InvalidPolicy(String),

    /// The requested sample count cannot be satisfied for this video.
    ///
    /// Raised during selection, before any decoding starts.
    #[error("Invalid sample count: {reason} (requested {target_count} of {total_frames} frames)")]
    InvalidSampleCount {
        /// The number of frames that was requested.
        target_count: u64,
        /// The total number of frames reported by the video.
        total_frames: u64,
        /// Which validation rule was violated.
        reason: String,
    },

    /// A video frame could not be decoded or converted.
    #[error("Failed to decode video frame: {0}")]
    VideoDecode(String),

    /// Writing one extracted frame to disk failed.
    ///
    /// Extraction stops at the first failed write; frames written before the
    /// failure remain on disk.
    #[error("Failed to write frame {frame_index} to {path}: {source}")]
    FrameWrite {
        /// Index of the frame whose write failed.
        frame_index: u64,
        /// Destination path of the failed write.
        path: PathBuf,
        /// The underlying `image` crate error.
        #[source]
        source: ImageError,
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// An I/O error occurred while creating directories or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

impl From<FfmpegError> for FramepickError {
    fn from(error: FfmpegError) -> Self {
        FramepickError::Ffmpeg(error.to_string())
    }
}
