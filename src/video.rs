//! Sequential video decoding.
//!
//! This module provides [`VideoSource`], a pull-based decoder that opens a
//! video file, caches its metadata, and yields frames one at a time in decode
//! order. Each call to [`next_frame`](VideoSource::next_frame) reads just
//! enough packets to produce one more frame, so memory use stays flat no
//! matter how long the video is.
//!
//! Decoding is strictly forward; there is no seeking. A frame's index is its
//! ordinal position in decode order, starting at zero, which callers track by
//! counting the frames they pull.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    Error as FfmpegError, Packet, Rational,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use ffmpeg_sys_next::AV_NOPTS_VALUE;
use image::{DynamicImage, RgbImage};

use crate::{error::FramepickError, metadata::VideoMetadata};

/// A video file opened for sequential frame decoding.
///
/// Created via [`VideoSource::open`], this struct holds the demuxer context,
/// a decoder for the best video stream, and cached [`VideoMetadata`]. Frames
/// come out as [`DynamicImage`] values in RGB8 at the stream's native
/// resolution.
///
/// # Example
///
/// ```no_run
/// use framepick::VideoSource;
///
/// let mut source = VideoSource::open("input.mp4")?;
/// println!("Total Frames: {}", source.metadata().frame_count);
///
/// let mut decoded: u64 = 0;
/// while let Some(_image) = source.next_frame()? {
///     decoded += 1;
/// }
/// println!("decoded {decoded} frames");
/// # Ok::<(), framepick::FramepickError>(())
/// ```
pub struct VideoSource {
    /// Demuxer context for the opened file.
    input_context: Input,
    /// Decoder for the selected video stream.
    decoder: VideoDecoder,
    /// Converter from the stream's pixel format to RGB24.
    scaler: ScalingContext,
    /// Index of the best video stream.
    video_stream_index: usize,
    /// Metadata captured when the file was opened.
    metadata: VideoMetadata,
    /// Path to the opened file (kept for error messages).
    path: PathBuf,
    decoded_frame: VideoFrame,
    scaled_frame: VideoFrame,
    /// Whether EOF has been sent to the decoder.
    eof_sent: bool,
    /// Whether the decoder has been fully drained.
    finished: bool,
}

impl Debug for VideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSource")
            .field("path", &self.path)
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file for sequential decoding.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, locates the best
    /// video stream, and caches its metadata. The frame count comes from the
    /// container when the stream declares one, otherwise it is estimated
    /// from duration and frame rate.
    ///
    /// # Errors
    ///
    /// Returns [`FramepickError::FileOpen`] if the file cannot be opened or
    /// its codec parameters cannot be read, and
    /// [`FramepickError::NoVideoStream`] if no video stream is present.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use framepick::{FramepickError, VideoSource};
    ///
    /// let source = VideoSource::open("video.mp4")?;
    /// # Ok::<(), FramepickError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FramepickError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        // Initialise ffmpeg (safe to call multiple times).
        ffmpeg_next::init().map_err(|error| FramepickError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| FramepickError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(FramepickError::NoVideoStream)?;
        let video_stream_index = stream.index();
        let time_base = stream.time_base();

        let codec_parameters = stream.parameters();
        let decoder_context =
            CodecContext::from_parameters(codec_parameters).map_err(|error| {
                FramepickError::FileOpen {
                    path: file_path.clone(),
                    reason: format!(
                        "Failed to read video codec parameters for stream {video_stream_index}: {error}"
                    ),
                }
            })?;
        let decoder =
            decoder_context
                .decoder()
                .video()
                .map_err(|error| FramepickError::FileOpen {
                    path: file_path.clone(),
                    reason: format!(
                        "Failed to create video decoder for stream {video_stream_index}: {error}"
                    ),
                })?;

        let width = decoder.width();
        let height = decoder.height();

        // Frames per second from the stream's average frame rate, falling
        // back to the nominal rate field.
        let frame_rate = stream.avg_frame_rate();
        let frames_per_second = if frame_rate.denominator() != 0 {
            frame_rate.numerator() as f64 / frame_rate.denominator() as f64
        } else {
            let rate = stream.rate();
            if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            }
        };

        // Stream duration when the muxer recorded one, otherwise the
        // container-level duration.
        let stream_duration = stream.duration();
        let duration = if stream_duration != AV_NOPTS_VALUE && stream_duration > 0 {
            Duration::from_secs_f64(pts_to_seconds(stream_duration, time_base))
        } else {
            let container_duration = input_context.duration();
            if container_duration > 0 {
                Duration::from_micros(container_duration as u64)
            } else {
                Duration::ZERO
            }
        };

        let declared_frames = stream.frames();
        let frame_count = if declared_frames > 0 {
            declared_frames as u64
        } else if frames_per_second > 0.0 {
            (duration.as_secs_f64() * frames_per_second) as u64
        } else {
            0
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;

        let metadata = VideoMetadata {
            width,
            height,
            frames_per_second,
            frame_count,
            codec,
            duration,
        };

        log::info!(
            "Opened video file: {} ({}x{}, {:.2} fps, codec={}, {} frames)",
            file_path.display(),
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.codec,
            metadata.frame_count,
        );

        Ok(Self {
            input_context,
            decoder,
            scaler,
            video_stream_index,
            metadata,
            path: file_path,
            decoded_frame: VideoFrame::empty(),
            scaled_frame: VideoFrame::empty(),
            eof_sent: false,
            finished: false,
        })
    }

    /// Get a reference to the cached video metadata.
    ///
    /// Metadata is extracted once during [`open`](VideoSource::open) and
    /// does not require any decoding.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Path of the opened file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode and return the next frame, or `None` once the stream is
    /// exhausted.
    ///
    /// Reads packets from the demuxer until the decoder produces a frame,
    /// then converts it to RGB8. After the last packet, the decoder is
    /// flushed so buffered frames still come out; every call after that
    /// returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`FramepickError::Ffmpeg`] if the decoder rejects a packet
    /// and [`FramepickError::VideoDecode`] if a decoded frame cannot be
    /// converted to an image.
    pub fn next_frame(&mut self) -> Result<Option<DynamicImage>, FramepickError> {
        if self.finished {
            return Ok(None);
        }

        loop {
            // Drain any frame the decoder already has buffered.
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                let image = self.convert_current_frame()?;
                return Ok(Some(image));
            }

            // Nothing buffered; the decoder needs more packets.
            if self.eof_sent {
                // EOF was sent and the last buffered frame is gone.
                self.finished = true;
                return Ok(None);
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    if packet.stream() == self.video_stream_index {
                        self.decoder.send_packet(&packet)?;
                    }
                    // Audio and subtitle packets are skipped.
                }
                Err(FfmpegError::Eof) => {
                    self.decoder.send_eof()?;
                    self.eof_sent = true;
                }
                Err(_) => {
                    // Non-fatal read error; try the next packet.
                }
            }
        }
    }

    /// Scale and convert the current `decoded_frame` to a [`DynamicImage`].
    fn convert_current_frame(&mut self) -> Result<DynamicImage, FramepickError> {
        self.scaler.run(&self.decoded_frame, &mut self.scaled_frame)?;

        let width = self.metadata.width;
        let height = self.metadata.height;
        let buffer = frame_to_rgb_buffer(&self.scaled_frame, width, height);
        let rgb_image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            FramepickError::VideoDecode(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })?;
        Ok(DynamicImage::ImageRgb8(rgb_image))
    }
}

/// Copy a decoded frame's pixels into a tightly-packed RGB buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 3); the
/// padding is stripped so the result can be handed to
/// [`image::RgbImage::from_raw`] directly.
fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let expected_stride = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == expected_stride {
        // No padding, copy the entire plane at once.
        data[..expected_stride * (height as usize)].to_vec()
    } else {
        // Stride includes padding bytes, copy row by row.
        let mut buffer = Vec::with_capacity(expected_stride * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + expected_stride]);
        }
        buffer
    }
}

/// Convert a PTS value to seconds using the stream time base.
fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64
}
