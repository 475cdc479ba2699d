//! Extraction integration tests.
//!
//! Error-path tests run everywhere; end-to-end tests require the fixture
//! files from `tests/fixtures/generate_fixtures.sh` and are skipped when the
//! fixtures are absent.

use std::path::Path;

use framepick::{
    FramepickError, FrameSelection, SamplePolicy, VideoSource, extract_frames, frame_file_name,
    save_selected_frames,
};
use rand::{SeedableRng, rngs::SmallRng};

fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_video.mp4"
}

#[test]
fn open_nonexistent_file() {
    let result = VideoSource::open("this_file_does_not_exist.mp4");
    assert!(result.is_err());

    let error_message = result.unwrap_err().to_string();
    assert!(
        error_message.contains("Failed to open video file"),
        "Error message should mention file open failure: {error_message}",
    );
    assert!(
        error_message.contains("this_file_does_not_exist.mp4"),
        "Error message should name the path: {error_message}",
    );
}

#[test]
fn open_invalid_file() {
    // Create a temporary file with garbage content.
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a video file")
        .expect("Failed to write invalid file");

    let result = VideoSource::open(&invalid_file_path);
    assert!(result.is_err(), "Expected error for invalid video file");
}

#[test]
fn frame_names_are_zero_padded() {
    assert_eq!(frame_file_name(0), "frame_000000.jpg");
    assert_eq!(frame_file_name(42), "frame_000042.jpg");
    assert_eq!(frame_file_name(999_999), "frame_999999.jpg");
    // Wider indices keep all their digits.
    assert_eq!(frame_file_name(1_234_567), "frame_1234567.jpg");
}

#[test]
fn sequential_decode_yields_every_frame() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut source = VideoSource::open(path).expect("Failed to open test video");
    let metadata = source.metadata().clone();
    assert!(metadata.frame_count > 0, "Fixture should report its frames");
    assert!(metadata.width > 0 && metadata.height > 0);

    let mut decoded: u64 = 0;
    while let Some(image) = source.next_frame().expect("Decoding should succeed") {
        assert_eq!(image.width(), metadata.width);
        assert_eq!(image.height(), metadata.height);
        decoded += 1;
    }

    assert_eq!(
        decoded, metadata.frame_count,
        "The fixture declares an exact frame count",
    );

    // The source stays drained once exhausted.
    assert!(source.next_frame().expect("Drained source is not an error").is_none());
}

#[test]
fn extract_evenly_spaced_frames() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut rng = SmallRng::seed_from_u64(0);

    let summary = extract_frames(path, output.path(), 10, SamplePolicy::Even, &mut rng)
        .expect("Extraction should succeed");

    assert!(summary.total_frames >= 10);
    assert!(summary.selected >= 10, "floored stride never under-selects");
    assert_eq!(summary.written, summary.selected);

    // Frame 0 is always selected by the evenly-spaced policy.
    assert!(output.path().join("frame_000000.jpg").exists());

    let files = std::fs::read_dir(output.path())
        .expect("Failed to read output dir")
        .count() as u64;
    assert_eq!(files, summary.written);
}

#[test]
fn extract_random_frames_skips_frame_zero() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut rng = SmallRng::seed_from_u64(1234);

    let summary = extract_frames(path, output.path(), 5, SamplePolicy::Random, &mut rng)
        .expect("Extraction should succeed");

    assert_eq!(summary.selected, 5);
    assert_eq!(summary.written, 5);
    assert!(
        !output.path().join("frame_000000.jpg").exists(),
        "Random sampling never draws frame 0",
    );

    let files = std::fs::read_dir(output.path())
        .expect("Failed to read output dir")
        .count();
    assert_eq!(files, 5);
}

#[test]
fn save_selected_frames_reports_each_write() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut source = VideoSource::open(path).expect("Failed to open test video");
    let selection = FrameSelection::evenly_spaced(source.metadata().frame_count, 4)
        .expect("Selection should succeed");

    let mut observed: Vec<u64> = Vec::new();
    let written = save_selected_frames(&mut source, &selection, output.path(), |index, frame_path| {
        observed.push(index);
        assert!(frame_path.exists(), "Observer runs after the write");
    })
    .expect("Extraction should succeed");

    assert_eq!(written as usize, observed.len());
    assert_eq!(observed, selection.indices());
}

#[test]
fn invalid_sample_count_fails_before_decoding() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut rng = SmallRng::seed_from_u64(0);

    let result = extract_frames(path, output.path(), 0, SamplePolicy::Even, &mut rng);
    assert!(matches!(
        result,
        Err(FramepickError::InvalidSampleCount { .. })
    ));

    let files = std::fs::read_dir(output.path())
        .expect("Failed to read output dir")
        .count();
    assert_eq!(files, 0, "No frames may be written for a rejected request");
}

#[test]
fn metadata_is_cached_at_open() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let source = VideoSource::open(path).expect("Failed to open test video");
    let metadata = source.metadata();

    assert!(metadata.frames_per_second > 0.0);
    assert!(!metadata.duration.is_zero());
    assert!(!metadata.codec.is_empty());
}
