use crate::dtw;
use crate::error::CorrectionError;
use log::debug;
use std::collections::HashMap;

/// Most frequent value; ties go to the value seen first.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn mode(values: &[i32]) -> i32 {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for &v in values {
        *counts.entry(v).or_default() += 1;
    }
    let mut best = values[0];
    for &v in values {
        if counts[&v] > counts[&best] {
            best = v;
        }
    }
    best
}

/// Align the fixations with `reference` (word or character centres in
/// reading order) by dynamic time warping, then give each fixation the
/// most common line among the reference points mapped to it.
pub fn warp(fixations: &[[i32; 2]], reference: &[[i32; 2]]) -> Result<Vec<i32>, CorrectionError> {
    if reference.is_empty() {
        return Err(CorrectionError::invalid(
            "warp needs at least one word or character centre",
        ));
    }
    let alignment = dtw::align(fixations, reference)?;
    debug!(
        "warp: {} fixations against {} reference points, cost {:.1}",
        fixations.len(),
        reference.len(),
        alignment.cost
    );
    Ok(alignment
        .path
        .iter()
        .map(|aligned| {
            let ys: Vec<i32> = aligned.iter().map(|&j| reference[j][1]).collect();
            mode(&ys)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_prefers_first_seen_on_ties() {
        assert_eq!(mode(&[5]), 5);
        assert_eq!(mode(&[200, 100, 100, 200]), 200);
        assert_eq!(mode(&[300, 100, 100]), 100);
    }

    #[test]
    fn follows_reading_order_through_drift() {
        let words = [[100, 100], [200, 100], [300, 100], [100, 200], [200, 200], [300, 200]];
        // Second line read 45 px high, closer to the first line than its own.
        let fixations = [[105, 110], [210, 95], [290, 105], [110, 150], [205, 160], [295, 155]];
        let out = warp(&fixations, &words).unwrap();
        assert_eq!(out, vec![100, 100, 100, 200, 200, 200]);
    }

    #[test]
    fn empty_reference_is_invalid() {
        assert!(matches!(
            warp(&[[0, 0]], &[]),
            Err(CorrectionError::InvalidInput(_))
        ));
    }
}
