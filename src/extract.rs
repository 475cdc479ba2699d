//! Frame extraction driver.
//!
//! Ties [`FrameSelection`] and [`VideoSource`] together: decode the video in
//! a single forward pass, test each frame's index against the selection, and
//! write the hits to disk as JPEG files. [`extract_frames`] is the one-call
//! entry point; [`save_selected_frames`] is the underlying loop for callers
//! that want to open the source and compute the selection themselves.

use std::{fs, path::Path};

use rand::Rng;

use crate::{
    error::FramepickError,
    selection::{FrameSelection, SamplePolicy, SampleRequest},
    video::VideoSource,
};

/// File name for an extracted frame: `frame_{index:06}.jpg`.
///
/// Indices wider than six digits are not truncated.
///
/// # Example
///
/// ```
/// use framepick::frame_file_name;
///
/// assert_eq!(frame_file_name(7), "frame_000007.jpg");
/// assert_eq!(frame_file_name(1_234_567), "frame_1234567.jpg");
/// ```
#[must_use]
pub fn frame_file_name(frame_index: u64) -> String {
    format!("frame_{frame_index:06}.jpg")
}

/// Counts reported by [`extract_frames`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct ExtractionSummary {
    /// Total number of frames the video reported at open time.
    pub total_frames: u64,
    /// Number of frame indices the selection chose.
    pub selected: u64,
    /// Number of frames actually written to disk.
    ///
    /// Can fall short of `selected` when the reported frame count
    /// overestimates the stream and decoding ends early.
    pub written: u64,
}

/// Decode `source` sequentially and write every selected frame into
/// `output_dir`, returning the number of frames written.
///
/// Frames are named with [`frame_file_name`] and saved as JPEG. The
/// `observer` callback runs after each successful write with the frame index
/// and destination path; pass a no-op closure when no reporting is needed.
/// Decoding stops as soon as the highest selected index has been written.
///
/// The output directory must already exist; [`extract_frames`] creates it
/// for you.
///
/// # Errors
///
/// Returns [`FramepickError::FrameWrite`] with the failing index and path if
/// a write fails (frames written before the failure stay on disk), or any
/// decode error from [`VideoSource::next_frame`].
///
/// # Example
///
/// ```no_run
/// use framepick::{FrameSelection, VideoSource, save_selected_frames};
///
/// let mut source = VideoSource::open("input.mp4")?;
/// let selection = FrameSelection::evenly_spaced(source.metadata().frame_count, 10)?;
/// let written = save_selected_frames(
///     &mut source,
///     &selection,
///     "frames/".as_ref(),
///     |index, path| println!("frame {index} -> {}", path.display()),
/// )?;
/// println!("saved {written} frames");
/// # Ok::<(), framepick::FramepickError>(())
/// ```
pub fn save_selected_frames<F>(
    source: &mut VideoSource,
    selection: &FrameSelection,
    output_dir: &Path,
    mut observer: F,
) -> Result<u64, FramepickError>
where
    F: FnMut(u64, &Path),
{
    let Some(last_index) = selection.last() else {
        return Ok(0);
    };

    let mut written: u64 = 0;
    let mut frame_index: u64 = 0;

    while let Some(image) = source.next_frame()? {
        if selection.contains(frame_index) {
            let path = output_dir.join(frame_file_name(frame_index));
            image
                .save(&path)
                .map_err(|error| FramepickError::FrameWrite {
                    frame_index,
                    path: path.clone(),
                    source: error,
                })?;
            written += 1;
            observer(frame_index, &path);

            if frame_index == last_index {
                break;
            }
        }
        frame_index += 1;
    }

    let selected = selection.len() as u64;
    if written < selected {
        log::warn!(
            "Video ended after {} frames; {} of {} selected frames not written",
            frame_index,
            selected - written,
            selected,
        );
    }

    Ok(written)
}

/// Sample `target_count` frames from the video at `video_path` and write
/// them into `output_dir` as JPEG files.
///
/// Creates the output directory (and parents) if needed, opens the video,
/// computes a [`FrameSelection`] for its reported frame count, and performs
/// one sequential decoding pass. Only the [`SamplePolicy::Random`] policy
/// draws from `rng`; pass a seeded generator for reproducible runs.
///
/// # Errors
///
/// Returns [`FramepickError::FileOpen`] or [`FramepickError::NoVideoStream`]
/// if the video cannot be opened, [`FramepickError::InvalidSampleCount`] if
/// the request cannot be satisfied, and write or decode errors from the
/// extraction pass.
///
/// # Example
///
/// ```no_run
/// use framepick::{SamplePolicy, extract_frames};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let summary = extract_frames("input.mp4", "frames/", 200, SamplePolicy::Even, &mut rng)?;
/// println!("wrote {} of {} frames", summary.written, summary.total_frames);
/// # Ok::<(), framepick::FramepickError>(())
/// ```
pub fn extract_frames<P, Q, R>(
    video_path: P,
    output_dir: Q,
    target_count: u64,
    policy: SamplePolicy,
    rng: &mut R,
) -> Result<ExtractionSummary, FramepickError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: Rng + ?Sized,
{
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut source = VideoSource::open(video_path)?;
    let total_frames = source.metadata().frame_count;

    let request = SampleRequest::new(total_frames, target_count, policy);
    let selection = FrameSelection::compute(&request, rng)?;

    log::info!(
        "Extracting {} of {} frames to {} (policy={})",
        selection.len(),
        total_frames,
        output_dir.display(),
        policy,
    );

    let written = save_selected_frames(&mut source, &selection, output_dir, |_, _| {})?;

    Ok(ExtractionSummary {
        total_frames,
        selected: selection.len() as u64,
        written,
    })
}
