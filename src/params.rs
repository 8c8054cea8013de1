//! Parameter types configuring the line assignment methods.
//!
//! Each method owns a small params struct; [`CorrectionParams`] groups them
//! so a single value can be threaded through the corrector and loaded from
//! JSON. Every struct is `#[serde(default)]`, so configs only need to name
//! the knobs they change.
//!
//! Thresholds are in screen pixels and the defaults assume text set at
//! roughly 60 px line spacing with normal reading saccades.

use serde::{Deserialize, Serialize};

/// Options for every method, plus bounce rejection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionParams {
    pub chain: ChainParams,
    pub cluster: ClusterParams,
    pub merge: MergeParams,
    pub regress: RegressParams,
    pub slice: SliceParams,
    pub split: SplitParams,
    pub stretch: StretchParams,
    pub warp: WarpParams,
    pub bounce: BounceParams,
}

/// Proximity segmentation followed by nearest-line snapping.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainParams {
    /// Horizontal gap (px) that ends a run.
    pub x_thresh: f64,
    /// Vertical gap (px) that ends a run.
    pub y_thresh: f64,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            x_thresh: 192.0,
            y_thresh: 32.0,
        }
    }
}

/// 1-D k-means over fixation heights.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    pub max_iterations: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            max_iterations: 300,
        }
    }
}

/// Greedy merging of saccade-delimited runs by regression quality.
///
/// - `y_thresh`: vertical gap (px) that also ends a run.
/// - `gradient_thresh`: maximum |slope| of a merged run in constrained phases.
/// - `error_thresh`: maximum RMS residual (px) of a merged run in
///   constrained phases.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeParams {
    pub y_thresh: f64,
    pub gradient_thresh: f64,
    pub error_thresh: f64,
}

impl Default for MergeParams {
    fn default() -> Self {
        Self {
            y_thresh: 32.0,
            gradient_thresh: 0.1,
            error_thresh: 20.0,
        }
    }
}

/// Bounds searched when fitting parallel regression lines.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressParams {
    pub slope_bounds: (f64, f64),
    pub offset_bounds: (f64, f64),
    pub std_bounds: (f64, f64),
    /// Initial simplex step in the unconstrained (probit) space.
    pub initial_step: f64,
    pub optimizer: OptimizerParams,
}

impl Default for RegressParams {
    fn default() -> Self {
        Self {
            slope_bounds: (-0.1, 0.1),
            offset_bounds: (-50.0, 50.0),
            std_bounds: (1.0, 20.0),
            initial_step: 0.5,
            optimizer: OptimizerParams::default(),
        }
    }
}

/// Proto-line growth (Glandorf & Schroeder style slicing).
///
/// - `x_thresh`, `y_thresh`: proximity thresholds for the initial runs.
/// - `w_thresh`: mean vertical offset (px) under which a run joins a
///   proto-line.
/// - `n_thresh`: upper bound (px) for a run to join the adjacent proto-line.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceParams {
    pub x_thresh: f64,
    pub y_thresh: f64,
    pub w_thresh: f64,
    pub n_thresh: f64,
}

impl Default for SliceParams {
    fn default() -> Self {
        Self {
            x_thresh: 192.0,
            y_thresh: 32.0,
            w_thresh: 32.0,
            n_thresh: 90.0,
        }
    }
}

/// 2-means separation of return sweeps from within-line saccades.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitParams {
    pub max_iterations: usize,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            max_iterations: 300,
        }
    }
}

/// Bounds and starting simplex for the vertical stretch/offset fit.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StretchParams {
    pub stretch_bounds: (f64, f64),
    pub offset_bounds: (f64, f64),
    pub stretch_step: f64,
    pub offset_step: f64,
    pub optimizer: OptimizerParams,
}

impl Default for StretchParams {
    fn default() -> Self {
        Self {
            stretch_bounds: (0.9, 1.1),
            offset_bounds: (-50.0, 50.0),
            stretch_step: 0.05,
            offset_step: 5.0,
            optimizer: OptimizerParams::default(),
        }
    }
}

/// Reference points used by dynamic time warping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarpReference {
    #[default]
    Words,
    Characters,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpParams {
    pub reference: WarpReference,
}

/// DTW-based bounce rejection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceParams {
    /// A fixation is discarded when its warped line is further than this
    /// many pixels from its recorded y.
    pub threshold: f64,
    pub reference: WarpReference,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            threshold: 64.0,
            reference: WarpReference::Words,
        }
    }
}

/// Stopping rules for the Nelder-Mead optimiser.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerParams {
    pub max_iterations: usize,
    /// Simplex spread in parameter space below which the search may stop.
    pub x_tolerance: f64,
    /// Spread of objective values below which the search may stop.
    pub f_tolerance: f64,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            x_tolerance: 1e-4,
            f_tolerance: 1e-4,
        }
    }
}
