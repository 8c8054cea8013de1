use crate::segments::saccade_dx;
use log::debug;

/// Treat the `m - 1` longest return sweeps as the line changes and number
/// the lines in between from the top.
///
/// Return sweeps are the most negative horizontal saccades for left-to-right
/// text and the most positive for right-to-left text. Equal saccades keep
/// their chronological order.
///
/// # Panics
///
/// Panics if `midlines` is empty. [`Method::assign`](super::Method::assign)
/// rejects empty layouts before dispatching here.
pub fn segment(fixations: &[[i32; 2]], midlines: &[i32], right_to_left: bool) -> Vec<i32> {
    let dx = saccade_dx(fixations);
    let mut by_length: Vec<usize> = (0..dx.len()).collect();
    if right_to_left {
        by_length.sort_by_key(|&i| std::cmp::Reverse(dx[i]));
    } else {
        by_length.sort_by_key(|&i| dx[i]);
    }

    let changes = (midlines.len() - 1).min(dx.len());
    let mut is_change = vec![false; dx.len()];
    for &i in &by_length[..changes] {
        is_change[i] = true;
    }
    debug!("segment: {} line changes among {} saccades", changes, dx.len());

    let mut line = 0;
    let mut out = Vec::with_capacity(fixations.len());
    for i in 0..fixations.len() {
        out.push(midlines[line]);
        if i < is_change.len() && is_change[i] {
            line += 1;
        }
    }
    out
}
