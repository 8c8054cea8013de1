//! Majority voting across several line assignments ("wisdom of the crowd").
//!
//! A jury is `k >= 2` assignments of the same `n` fixations, one per method.
//! [`vote`] picks, per fixation, the line chosen most often, and
//! [`fleiss_kappa`] reports how much the jurors agree beyond chance.

use crate::error::CorrectionError;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Consensus assignment and the jury's agreement.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consensus {
    pub assignment: Vec<i32>,
    /// Fleiss' kappa; `None` when every vote went to one line.
    pub kappa: Option<f64>,
}

fn check_jury(jury: &[Vec<i32>]) -> Result<usize, CorrectionError> {
    if jury.len() < 2 {
        return Err(CorrectionError::invalid(format!(
            "a jury needs at least two assignments, got {}",
            jury.len()
        )));
    }
    let n = jury[0].len();
    if let Some((i, other)) = jury.iter().enumerate().find(|(_, a)| a.len() != n) {
        return Err(CorrectionError::invalid(format!(
            "juror {i} assigned {} fixations, juror 0 assigned {n}",
            other.len()
        )));
    }
    Ok(n)
}

/// Winning vote for one fixation. Among equally popular lines the one voted
/// by the earliest juror wins.
fn majority(votes: &[i32]) -> i32 {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for &v in votes {
        *counts.entry(v).or_default() += 1;
    }
    let top = counts.values().copied().max().unwrap_or(0);
    votes
        .iter()
        .copied()
        .find(|v| counts[v] == top)
        .unwrap_or(votes[0])
}

/// Combine the jury's assignments into one.
pub fn vote(jury: &[Vec<i32>]) -> Result<Consensus, CorrectionError> {
    let n = check_jury(jury)?;
    let mut votes = Vec::with_capacity(jury.len());
    let assignment = (0..n)
        .map(|i| {
            votes.clear();
            votes.extend(jury.iter().map(|a| a[i]));
            majority(&votes)
        })
        .collect();
    let kappa = fleiss_kappa(jury)?;
    debug!("ensemble: {} jurors over {n} fixations, kappa {kappa:?}", jury.len());
    Ok(Consensus { assignment, kappa })
}

/// Fleiss' kappa over the `n x k` vote matrix, treating every distinct line
/// as a category.
///
/// Returns `Ok(None)` when the expected agreement is 1 (a single category,
/// or no fixations), where kappa is undefined.
pub fn fleiss_kappa(jury: &[Vec<i32>]) -> Result<Option<f64>, CorrectionError> {
    let n = check_jury(jury)?;
    if n == 0 {
        return Ok(None);
    }
    let k = jury.len() as f64;

    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    let mut observed = 0.0;
    for i in 0..n {
        let mut counts: BTreeMap<i32, f64> = BTreeMap::new();
        for assignment in jury {
            *counts.entry(assignment[i]).or_default() += 1.0;
        }
        let agreeing: f64 = counts.values().map(|c| c * c).sum::<f64>() - k;
        observed += agreeing / (k * (k - 1.0));
        for (category, c) in counts {
            *totals.entry(category).or_default() += c;
        }
    }
    observed /= n as f64;

    let votes = n as f64 * k;
    let expected: f64 = totals.values().map(|t| (t / votes).powi(2)).sum();
    if (1.0 - expected).abs() <= f64::EPSILON {
        return Ok(None);
    }
    Ok(Some((observed - expected) / (1.0 - expected)))
}
