//! Frame index selection policies.
//!
//! This module decides *which* frames to keep before any decoding happens.
//! A [`SampleRequest`] pairs a video's frame count with the desired number
//! of samples and a [`SamplePolicy`]; [`FrameSelection::compute`] turns that
//! into a sorted, duplicate-free set of frame indices that the extraction
//! loop can test membership against in `O(log n)`.
//!
//! Selection is pure: it never touches the video file, so policies can be
//! unit-tested (and benchmarked) without any media fixtures.

use std::{fmt, str::FromStr};

use rand::Rng;

use crate::error::FramepickError;

/// How frame indices are chosen from a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplePolicy {
    /// Evenly-spaced sampling: keep every `stride`-th frame starting at
    /// frame 0, where `stride = total_frames / target_count` (integer
    /// division).
    ///
    /// Parsed from the string `normal`.
    #[default]
    Even,
    /// Uniform random sampling without replacement from `1..total_frames`.
    /// Frame 0 is never selected.
    ///
    /// Parsed from the string `random`.
    Random,
}

impl SamplePolicy {
    /// The canonical string form of this policy (`normal` or `random`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SamplePolicy::Even => "normal",
            SamplePolicy::Random => "random",
        }
    }
}

impl fmt::Display for SamplePolicy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SamplePolicy {
    type Err = FramepickError;

    /// Parse a policy name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`FramepickError::InvalidPolicy`] naming the rejected input
    /// if it is neither `normal` nor `random`.
    ///
    /// # Example
    ///
    /// ```
    /// use framepick::SamplePolicy;
    ///
    /// let policy: SamplePolicy = "Random".parse()?;
    /// assert_eq!(policy, SamplePolicy::Random);
    /// assert!("uniform".parse::<SamplePolicy>().is_err());
    /// # Ok::<(), framepick::FramepickError>(())
    /// ```
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "normal" => Ok(SamplePolicy::Even),
            "random" => Ok(SamplePolicy::Random),
            _ => Err(FramepickError::InvalidPolicy(input.to_string())),
        }
    }
}

/// A request to sample `target_count` frames from a video of
/// `total_frames` frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct SampleRequest {
    /// Total number of frames in the video.
    pub total_frames: u64,
    /// Desired number of sampled frames.
    pub target_count: u64,
    /// Policy used to choose the indices.
    pub policy: SamplePolicy,
}

impl SampleRequest {
    /// Create a new sample request.
    pub fn new(total_frames: u64, target_count: u64, policy: SamplePolicy) -> Self {
        Self {
            total_frames,
            target_count,
            policy,
        }
    }
}

/// A sorted, duplicate-free set of frame indices chosen for extraction.
///
/// Produced by [`FrameSelection::compute`] (or the policy-specific
/// constructors) and consumed by the extraction loop, which calls
/// [`contains`](FrameSelection::contains) once per decoded frame.
///
/// # Example
///
/// ```
/// use framepick::{FrameSelection, SamplePolicy, SampleRequest};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let request = SampleRequest::new(1000, 10, SamplePolicy::Even);
/// let mut rng = SmallRng::seed_from_u64(0);
/// let selection = FrameSelection::compute(&request, &mut rng)?;
/// assert_eq!(selection.len(), 10);
/// assert!(selection.contains(300));
/// assert!(!selection.contains(301));
/// # Ok::<(), framepick::FramepickError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct FrameSelection {
    indices: Vec<u64>,
}

impl FrameSelection {
    /// Compute a selection for `request`, drawing from `rng` when the
    /// policy calls for randomness.
    ///
    /// The evenly-spaced policy never reads from `rng`; passing a seeded
    /// generator makes random selections reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`FramepickError::InvalidSampleCount`] if the request cannot
    /// be satisfied; see [`evenly_spaced`](FrameSelection::evenly_spaced)
    /// and [`random`](FrameSelection::random) for the per-policy rules.
    pub fn compute<R>(request: &SampleRequest, rng: &mut R) -> Result<Self, FramepickError>
    where
        R: Rng + ?Sized,
    {
        match request.policy {
            SamplePolicy::Even => Self::evenly_spaced(request.total_frames, request.target_count),
            SamplePolicy::Random => Self::random(request.total_frames, request.target_count, rng),
        }
    }

    /// Select evenly-spaced frame indices: every `stride`-th frame starting
    /// at 0, where `stride = total_frames / target_count`.
    ///
    /// Because the stride is rounded down, the realized selection can hold
    /// slightly more than `target_count` indices; e.g. 10 frames at a
    /// target of 3 gives stride 3 and indices `[0, 3, 6, 9]`. Callers that
    /// need an exact count should truncate the result themselves.
    ///
    /// # Errors
    ///
    /// Returns [`FramepickError::InvalidSampleCount`] if `target_count` is
    /// zero, `total_frames` is zero, or `target_count > total_frames`.
    ///
    /// # Example
    ///
    /// ```
    /// use framepick::FrameSelection;
    ///
    /// let selection = FrameSelection::evenly_spaced(10, 3)?;
    /// assert_eq!(selection.indices(), &[0, 3, 6, 9]);
    /// # Ok::<(), framepick::FramepickError>(())
    /// ```
    pub fn evenly_spaced(total_frames: u64, target_count: u64) -> Result<Self, FramepickError> {
        validate_request(total_frames, target_count)?;
        if target_count > total_frames {
            return Err(FramepickError::InvalidSampleCount {
                target_count,
                total_frames,
                reason: "target count exceeds the total frame count".to_string(),
            });
        }

        let stride = total_frames / target_count;
        let indices: Vec<u64> = (0..total_frames).step_by(stride as usize).collect();

        Ok(Self { indices })
    }

    /// Select `target_count` distinct frame indices uniformly at random
    /// from `1..total_frames`.
    ///
    /// Frame 0 is deliberately excluded from the draw pool. The returned
    /// indices are sorted ascending regardless of draw order.
    ///
    /// # Errors
    ///
    /// Returns [`FramepickError::InvalidSampleCount`] if `target_count` is
    /// zero, `total_frames` is zero, or `target_count >= total_frames`
    /// (the pool `1..total_frames` holds only `total_frames - 1` indices).
    pub fn random<R>(
        total_frames: u64,
        target_count: u64,
        rng: &mut R,
    ) -> Result<Self, FramepickError>
    where
        R: Rng + ?Sized,
    {
        validate_request(total_frames, target_count)?;
        if target_count >= total_frames {
            return Err(FramepickError::InvalidSampleCount {
                target_count,
                total_frames,
                reason: "target count must be less than the total frame count".to_string(),
            });
        }

        // Draw from 0..total-1 without replacement, then shift by one so
        // the pool becomes 1..total.
        let mut indices: Vec<u64> =
            rand::seq::index::sample(rng, (total_frames - 1) as usize, target_count as usize)
                .into_iter()
                .map(|index| index as u64 + 1)
                .collect();
        indices.sort_unstable();

        Ok(Self { indices })
    }

    /// An empty selection. The public constructors never produce one.
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// Whether `frame_index` is part of this selection.
    ///
    /// Binary search over the sorted indices.
    #[must_use]
    pub fn contains(&self, frame_index: u64) -> bool {
        self.indices.binary_search(&frame_index).is_ok()
    }

    /// The selected indices, sorted ascending.
    #[must_use]
    pub fn indices(&self) -> &[u64] {
        &self.indices
    }

    /// Iterate over the selected indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.indices.iter().copied()
    }

    /// Number of selected indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the selection is empty.
    ///
    /// Never true for a selection built through the public constructors,
    /// which reject zero counts up front.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The highest selected index, if any.
    ///
    /// The extraction loop uses this to stop decoding once the last
    /// selected frame has been written.
    #[must_use]
    pub fn last(&self) -> Option<u64> {
        self.indices.last().copied()
    }
}

/// Checks shared by both policies.
fn validate_request(total_frames: u64, target_count: u64) -> Result<(), FramepickError> {
    if target_count == 0 {
        return Err(FramepickError::InvalidSampleCount {
            target_count,
            total_frames,
            reason: "target count must be greater than zero".to_string(),
        });
    }
    if total_frames == 0 {
        return Err(FramepickError::InvalidSampleCount {
            target_count,
            total_frames,
            reason: "video reports zero frames".to_string(),
        });
    }
    Ok(())
}
