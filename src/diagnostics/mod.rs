//! Reports returned by the corrector.
//!
//! Reports are plain serialisable records so the demo binary can write them
//! next to the corrected fixations. They never hold references to the
//! sequence they describe.

pub mod timing;

pub use timing::{MethodTiming, TimingBreakdown};

use crate::methods::Method;
use serde::Serialize;

/// Outcome of a single correction or bounce rejection pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionReport {
    pub method: Method,
    /// Active fixations the method was run on.
    pub fixations: usize,
    /// Fixations whose y changed.
    pub moved: usize,
    /// Fixations newly marked as discarded (bounce rejection only).
    pub discarded: usize,
    pub elapsed_ms: f64,
}

/// Outcome of a jury vote.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusReport {
    pub methods: Vec<Method>,
    /// Fleiss' kappa of the jury; absent when undefined.
    pub kappa: Option<f64>,
    pub fixations: usize,
    pub moved: usize,
    pub timing: TimingBreakdown,
}
