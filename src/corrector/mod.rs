//! Applying line assignments to fixation sequences.
//!
//! [`DriftCorrector`] owns a [`CorrectionParams`](crate::params::CorrectionParams)
//! and offers four entry points:
//! - [`DriftCorrector::correct`] rewrites the y of every active fixation in
//!   place.
//! - [`DriftCorrector::correct_copy`] does the same on a clone and leaves the
//!   input untouched.
//! - [`DriftCorrector::correct_by_consensus`] runs a jury of methods and
//!   writes the majority vote.
//! - [`DriftCorrector::reject_bounces`] discards fixations that dynamic time
//!   warping places far from where they were recorded, without moving any.
//!
//! Inputs are validated and the full assignment computed before the sequence
//! is touched, so a failed call never leaves a half-corrected sequence.
//! Discarded fixations are skipped and keep their coordinates.
//!
//! ```
//! use drift_correct::{correct_drift, FixationSequence, TextLayout};
//!
//! let layout = TextLayout::from_midlines(vec![100, 160]);
//! let mut seq = FixationSequence::from_xy(&[[100, 112], [300, 109], [110, 171]]);
//! correct_drift("chain", &mut seq, &layout, &Default::default()).unwrap();
//! let ys: Vec<i32> = seq.iter().map(|f| f.y).collect();
//! assert_eq!(ys, vec![100, 100, 160]);
//! ```

mod bounce;
mod pipeline;

pub use pipeline::{correct_drift, DriftCorrector};
