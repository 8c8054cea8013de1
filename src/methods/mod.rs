//! Line assignment methods.
//!
//! Every method takes the active fixations as `[x, y]` pixels plus the text
//! geometry and returns one corrected y per fixation, each equal to one of
//! the midlines. Methods never reorder fixations and never look at anything
//! other than coordinates, so they are easy to test in isolation.
//!
//! | method    | idea                                                        |
//! |-----------|-------------------------------------------------------------|
//! | `chain`   | proximity runs snapped to the nearest line                  |
//! | `cluster` | 1-D k-means on y seeded at the midlines                      |
//! | `merge`   | saccade runs greedily merged by regression quality          |
//! | `regress` | parallel regression lines fitted by likelihood              |
//! | `segment` | the `m - 1` longest return sweeps are the line changes      |
//! | `slice`   | proto-lines grown outward from the longest run              |
//! | `split`   | 2-means on saccade lengths finds the return sweeps          |
//! | `stretch` | vertical scale and offset fitted to minimise snap distance  |
//! | `warp`    | dynamic time warping against word centres                   |
//!
//! `regress` and `stretch` need the `optimize` feature; `cluster` and
//! `split` need `clustering`.

mod chain;
#[cfg(feature = "clustering")]
mod cluster;
mod common;
mod merge;
#[cfg(feature = "optimize")]
mod regress;
mod segment;
mod slice;
#[cfg(feature = "clustering")]
mod split;
#[cfg(feature = "optimize")]
mod stretch;
mod warp;

pub use chain::chain;
#[cfg(feature = "clustering")]
pub use cluster::cluster;
pub use common::{nearest_line, LineFit};
pub use merge::merge;
#[cfg(feature = "optimize")]
pub use regress::{regress, RegressFit};
pub use segment::segment;
pub use slice::slice;
#[cfg(feature = "clustering")]
pub use split::split;
#[cfg(feature = "optimize")]
pub use stretch::{stretch, StretchFit};
pub use warp::{mode, warp};

use crate::error::CorrectionError;
use crate::geometry::{validate_midlines, LineGeometry};
use crate::params::{CorrectionParams, WarpReference};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The nine drift correction methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Chain,
    Cluster,
    Merge,
    Regress,
    Segment,
    Slice,
    Split,
    Stretch,
    Warp,
}

impl Method {
    pub const ALL: [Method; 9] = [
        Method::Chain,
        Method::Cluster,
        Method::Merge,
        Method::Regress,
        Method::Segment,
        Method::Slice,
        Method::Split,
        Method::Stretch,
        Method::Warp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Method::Chain => "chain",
            Method::Cluster => "cluster",
            Method::Merge => "merge",
            Method::Regress => "regress",
            Method::Segment => "segment",
            Method::Slice => "slice",
            Method::Split => "split",
            Method::Stretch => "stretch",
            Method::Warp => "warp",
        }
    }

    /// Cargo feature the method depends on, if any.
    pub fn required_capability(self) -> Option<&'static str> {
        match self {
            Method::Regress | Method::Stretch => Some("optimize"),
            Method::Cluster | Method::Split => Some("clustering"),
            _ => None,
        }
    }

    /// Whether the method was compiled into this build.
    pub fn is_available(self) -> bool {
        match self.required_capability() {
            Some("optimize") => cfg!(feature = "optimize"),
            Some("clustering") => cfg!(feature = "clustering"),
            _ => true,
        }
    }

    /// Assign every fixation in `fixations` to a line of `geometry`.
    ///
    /// Validates the inputs first; on success the result has exactly one
    /// midline per fixation.
    pub fn assign<G: LineGeometry + ?Sized>(
        self,
        fixations: &[[i32; 2]],
        geometry: &G,
        params: &CorrectionParams,
    ) -> Result<Vec<i32>, CorrectionError> {
        let midlines = geometry.midlines();
        validate_midlines(midlines)?;
        if fixations.is_empty() {
            return Err(CorrectionError::EmptySequence);
        }
        let rtl = geometry.right_to_left();

        let assigned = match self {
            Method::Chain => chain(fixations, midlines, &params.chain),
            Method::Cluster | Method::Split => {
                run_clustering(self, fixations, midlines, rtl, params)?
            }
            Method::Merge => merge(fixations, midlines, rtl, &params.merge),
            Method::Regress | Method::Stretch => run_optimizing(self, fixations, midlines, params)?,
            Method::Segment => segment(fixations, midlines, rtl),
            Method::Slice => slice(fixations, midlines, rtl, &params.slice),
            Method::Warp => {
                let reference = reference_points(geometry, params.warp.reference);
                warp(fixations, &reference)?
            }
        };
        debug_assert_eq!(assigned.len(), fixations.len());
        Ok(assigned)
    }
}

#[cfg(feature = "clustering")]
fn run_clustering(
    method: Method,
    fixations: &[[i32; 2]],
    midlines: &[i32],
    rtl: bool,
    params: &CorrectionParams,
) -> Result<Vec<i32>, CorrectionError> {
    Ok(match method {
        Method::Cluster => cluster(fixations, midlines, &params.cluster),
        _ => split(fixations, midlines, rtl, &params.split),
    })
}

#[cfg(not(feature = "clustering"))]
fn run_clustering(
    method: Method,
    _fixations: &[[i32; 2]],
    _midlines: &[i32],
    _rtl: bool,
    _params: &CorrectionParams,
) -> Result<Vec<i32>, CorrectionError> {
    Err(CorrectionError::DependencyUnavailable {
        method,
        capability: "clustering",
    })
}

#[cfg(feature = "optimize")]
fn run_optimizing(
    method: Method,
    fixations: &[[i32; 2]],
    midlines: &[i32],
    params: &CorrectionParams,
) -> Result<Vec<i32>, CorrectionError> {
    Ok(match method {
        Method::Regress => regress(fixations, midlines, &params.regress).assignment,
        _ => stretch(fixations, midlines, &params.stretch).assignment,
    })
}

#[cfg(not(feature = "optimize"))]
fn run_optimizing(
    method: Method,
    _fixations: &[[i32; 2]],
    _midlines: &[i32],
    _params: &CorrectionParams,
) -> Result<Vec<i32>, CorrectionError> {
    Err(CorrectionError::DependencyUnavailable {
        method,
        capability: "optimize",
    })
}

/// Word or character centres, depending on `reference`.
pub(crate) fn reference_points<G: LineGeometry + ?Sized>(
    geometry: &G,
    reference: WarpReference,
) -> Vec<[i32; 2]> {
    match reference {
        WarpReference::Words => geometry.word_centers(),
        WarpReference::Characters => geometry.character_centers(),
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = CorrectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| CorrectionError::UnknownMethod { name: s.to_string() })
    }
}
