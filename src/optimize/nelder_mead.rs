use crate::params::OptimizerParams;
use log::{debug, warn};
use nalgebra::DVector;

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Result of a Nelder-Mead search.
#[derive(Clone, Debug)]
pub struct Minimum {
    pub x: DVector<f64>,
    pub value: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub converged: bool,
}

/// Derivative-free simplex minimisation.
///
/// The initial simplex is `x0` plus one vertex per axis displaced by
/// `step[i]`. When `bounds` is given every candidate vertex is clamped into
/// the box before evaluation, so the objective is never evaluated outside
/// it. Vertices are kept in a stable order by objective value, so equal
/// values resolve the same way on every run.
pub fn nelder_mead<F>(
    objective: F,
    x0: &[f64],
    step: &[f64],
    bounds: Option<&[(f64, f64)]>,
    params: &OptimizerParams,
) -> Minimum
where
    F: Fn(&DVector<f64>) -> f64,
{
    let dim = x0.len();
    assert_eq!(step.len(), dim, "one initial step per dimension");
    if let Some(b) = bounds {
        assert_eq!(b.len(), dim, "one bound per dimension");
    }

    let clamp = |mut v: DVector<f64>| -> DVector<f64> {
        if let Some(b) = bounds {
            for (value, &(lo, hi)) in v.iter_mut().zip(b) {
                *value = value.clamp(lo, hi);
            }
        }
        v
    };

    let mut evaluations = 0usize;
    let mut eval = |v: &DVector<f64>| -> f64 {
        evaluations += 1;
        objective(v)
    };

    let origin = DVector::from_column_slice(x0);
    let mut simplex: Vec<DVector<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(clamp(origin.clone()));
    for i in 0..dim {
        let mut v = origin.clone();
        v[i] += step[i];
        simplex.push(clamp(v));
    }
    let mut values: Vec<f64> = simplex.iter().map(&mut eval).collect();

    let mut iterations = 0usize;
    let mut converged = false;
    while iterations < params.max_iterations {
        sort_simplex(&mut simplex, &mut values);
        if has_converged(&simplex, &values, params) {
            converged = true;
            break;
        }
        iterations += 1;

        let worst = dim;
        let centroid = simplex[..dim]
            .iter()
            .fold(DVector::zeros(dim), |acc, v| acc + v)
            / dim as f64;

        let reflected = clamp(&centroid + (&centroid - &simplex[worst]) * REFLECT);
        let f_reflected = eval(&reflected);

        if f_reflected < values[0] {
            let expanded = clamp(&centroid + (&centroid - &simplex[worst]) * EXPAND);
            let f_expanded = eval(&expanded);
            if f_expanded < f_reflected {
                simplex[worst] = expanded;
                values[worst] = f_expanded;
            } else {
                simplex[worst] = reflected;
                values[worst] = f_reflected;
            }
            continue;
        }

        if f_reflected < values[dim - 1] {
            simplex[worst] = reflected;
            values[worst] = f_reflected;
            continue;
        }

        if f_reflected < values[worst] {
            let contracted = clamp(&centroid + (&reflected - &centroid) * CONTRACT);
            let f_contracted = eval(&contracted);
            if f_contracted <= f_reflected {
                simplex[worst] = contracted;
                values[worst] = f_contracted;
                continue;
            }
        } else {
            let contracted = clamp(&centroid + (&simplex[worst] - &centroid) * CONTRACT);
            let f_contracted = eval(&contracted);
            if f_contracted < values[worst] {
                simplex[worst] = contracted;
                values[worst] = f_contracted;
                continue;
            }
        }

        let best = simplex[0].clone();
        for i in 1..=dim {
            let shrunk = clamp(&best + (&simplex[i] - &best) * SHRINK);
            values[i] = eval(&shrunk);
            simplex[i] = shrunk;
        }
    }

    sort_simplex(&mut simplex, &mut values);
    if converged {
        debug!(
            "nelder-mead converged: f={:.6} after {} iterations ({} evaluations)",
            values[0], iterations, evaluations
        );
    } else {
        warn!(
            "nelder-mead stopped at iteration cap {} with f={:.6}",
            params.max_iterations, values[0]
        );
    }

    Minimum {
        x: simplex.swap_remove(0),
        value: values[0],
        iterations,
        evaluations,
        converged,
    }
}

fn sort_simplex(simplex: &mut Vec<DVector<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

fn has_converged(simplex: &[DVector<f64>], values: &[f64], params: &OptimizerParams) -> bool {
    let f_spread = values[1..]
        .iter()
        .map(|v| (v - values[0]).abs())
        .fold(0.0f64, f64::max);
    let x_spread = simplex[1..]
        .iter()
        .map(|v| (v - &simplex[0]).amax())
        .fold(0.0f64, f64::max);
    f_spread <= params.f_tolerance && x_spread <= params.x_tolerance
}
