//! Dynamic time warping between two ordered point sequences.
//!
//! The cumulative cost matrix is `(n1 + 1) x (n2 + 1)` with an infinite
//! border and a zero origin, so cell `(i + 1, j + 1)` holds the cheapest
//! monotonic alignment of `seq1[..=i]` with `seq2[..=j]`:
//!
//! ```text
//! C[i+1][j+1] = |seq1[i] - seq2[j]| + min(C[i][j+1], C[i+1][j], C[i][j])
//! ```
//!
//! Backtracking starts in the far corner and at each step moves to the
//! cheapest of the diagonal, upper and left neighbours, checked in that
//! order so the diagonal wins ties. Time and memory are `O(n1 * n2)`, fine for
//! the tens to low thousands of points found in a reading trial.

use crate::error::CorrectionError;
use nalgebra::{DMatrix, Vector2};

/// Optimal monotonic alignment of two sequences.
#[derive(Clone, Debug, PartialEq)]
pub struct Alignment {
    /// Total cost of the warping path.
    pub cost: f64,
    /// For every index of the first sequence, the ascending indices of the
    /// second sequence aligned to it. Never empty.
    pub path: Vec<Vec<usize>>,
}

impl Alignment {
    /// Number of cells on the warping path.
    pub fn path_len(&self) -> usize {
        self.path.iter().map(Vec::len).sum()
    }
}

fn point(p: &[i32; 2]) -> Vector2<f64> {
    Vector2::new(p[0] as f64, p[1] as f64)
}

/// Align `seq1` against `seq2`. Both must be non-empty.
pub fn align(seq1: &[[i32; 2]], seq2: &[[i32; 2]]) -> Result<Alignment, CorrectionError> {
    let (n1, n2) = (seq1.len(), seq2.len());
    if n1 == 0 || n2 == 0 {
        return Err(CorrectionError::invalid(format!(
            "cannot align empty sequences (lengths {n1} and {n2})"
        )));
    }

    let mut cost = DMatrix::from_element(n1 + 1, n2 + 1, f64::INFINITY);
    cost[(0, 0)] = 0.0;
    for i in 0..n1 {
        let a = point(&seq1[i]);
        for j in 0..n2 {
            let local = (a - point(&seq2[j])).norm();
            let prev = cost[(i, j + 1)].min(cost[(i + 1, j)]).min(cost[(i, j)]);
            cost[(i + 1, j + 1)] = local + prev;
        }
    }

    // Offsets into the cost matrix: cell (i, j) of the alignment lives at
    // (i + 1, j + 1).
    let at = |i: usize, j: usize| cost[(i + 1, j + 1)];

    let mut path = vec![Vec::new(); n1];
    let (mut i, mut j) = (n1 - 1, n2 - 1);
    while i > 0 || j > 0 {
        path[i].push(j);
        let diagonal = if i > 0 && j > 0 {
            at(i - 1, j - 1)
        } else {
            f64::INFINITY
        };
        let up = if i > 0 { at(i - 1, j) } else { f64::INFINITY };
        let left = if j > 0 { at(i, j - 1) } else { f64::INFINITY };

        if diagonal <= up && diagonal <= left {
            i -= 1;
            j -= 1;
        } else if up <= left {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    path[0].push(0);
    for aligned in path.iter_mut() {
        aligned.sort_unstable();
    }

    Ok(Alignment {
        cost: at(n1 - 1, n2 - 1),
        path,
    })
}
