//! # framepick
//!
//! Sample a bounded number of still frames from a video and write them out
//! as JPEG images.
//!
//! `framepick` decides *which* frames to keep up front (evenly spaced or
//! uniformly random), then decodes the video exactly once in a forward pass,
//! saving the selected frames as `frame_{index:06}.jpg` files. Decoding is
//! powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! ## Quick Start
//!
//! ### One call
//!
//! ```no_run
//! use framepick::{SamplePolicy, extract_frames};
//! use rand::{SeedableRng, rngs::SmallRng};
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let summary = extract_frames("input.mp4", "frames/", 200, SamplePolicy::Even, &mut rng)?;
//! println!("wrote {} of {} frames", summary.written, summary.total_frames);
//! # Ok::<(), framepick::FramepickError>(())
//! ```
//!
//! ### Composed
//!
//! ```no_run
//! use framepick::{FrameSelection, SamplePolicy, SampleRequest, VideoSource,
//!                 save_selected_frames};
//! use rand::{SeedableRng, rngs::SmallRng};
//!
//! let mut source = VideoSource::open("input.mp4")?;
//! let total_frames = source.metadata().frame_count;
//!
//! let request = SampleRequest::new(total_frames, 50, SamplePolicy::Random);
//! let mut rng = SmallRng::seed_from_u64(7);
//! let selection = FrameSelection::compute(&request, &mut rng)?;
//!
//! std::fs::create_dir_all("frames/")?;
//! save_selected_frames(&mut source, &selection, "frames/".as_ref(), |index, path| {
//!     println!("frame {index} -> {}", path.display());
//! })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - **Two sampling policies** — evenly spaced (every `total / target`-th
//!   frame) or uniform random without replacement; both validated against
//!   the video's frame count before any decoding starts
//! - **Single decoding pass** — no seeking, flat memory use, stops early
//!   once the last selected frame is written
//! - **Reproducible randomness** — random sampling draws from a
//!   caller-supplied seedable RNG
//! - **Rich metadata** — dimensions, frame rate, frame count, codec, and
//!   duration cached at open time
//! - **Contextual errors** — failures carry the offending path, frame
//!   index, or requested counts
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system; see the
//! README for platform-specific instructions.

pub mod error;
pub mod extract;
pub mod ffmpeg;
pub mod metadata;
pub mod selection;
pub mod video;

pub use error::FramepickError;
pub use extract::{ExtractionSummary, extract_frames, frame_file_name, save_selected_frames};
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use metadata::VideoMetadata;
pub use selection::{FrameSelection, SamplePolicy, SampleRequest};
pub use video::VideoSource;
