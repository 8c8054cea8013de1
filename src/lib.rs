#![doc = include_str!("../README.md")]

// Public modules
pub mod corrector;
pub mod diagnostics;
pub mod ensemble;
pub mod error;
pub mod geometry;
pub mod methods;
pub mod params;
pub mod types;

// Building blocks used by the methods. Public for experiments and tools.
#[cfg(feature = "clustering")]
pub mod cluster1d;
pub mod dtw;
#[cfg(feature = "optimize")]
pub mod optimize;
pub mod segments;

// Tool support
pub mod config;
pub mod io;

// --- High-level re-exports -------------------------------------------------

pub use crate::corrector::{correct_drift, DriftCorrector};
pub use crate::diagnostics::{ConsensusReport, CorrectionReport};
pub use crate::error::CorrectionError;
pub use crate::geometry::{LineGeometry, TextLayout};
pub use crate::methods::Method;
pub use crate::params::CorrectionParams;
pub use crate::types::{Fixation, FixationSequence};

// --- Prelude ---------------------------------------------------------------

/// Everything needed to correct a recorded trial.
///
/// ```
/// use drift_correct::prelude::*;
///
/// let layout = TextLayout::regular(155, 64, 380, 40, 60, &[3, 3]);
/// let mut trial = FixationSequence::from_xy(&[[395, 170], [520, 168], [610, 175], [410, 229], [500, 233]]);
/// let corrector = DriftCorrector::new(CorrectionParams::default());
/// let report = corrector.correct(Method::Warp, &mut trial, &layout).unwrap();
/// assert_eq!(report.fixations, 5);
/// assert!(trial.iter().all(|f| f.y == 155 || f.y == 219));
/// ```
pub mod prelude {
    pub use crate::{
        CorrectionError, CorrectionParams, DriftCorrector, Fixation, FixationSequence,
        LineGeometry, Method, TextLayout,
    };
}
