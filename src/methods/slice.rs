use super::common::nearest_line;
use crate::params::SliceParams;
use crate::segments::{split_by_proximity, Run};
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Proto-lines keyed by their offset from the seed line (negative = above).
struct ProtoLines<'a> {
    fixations: &'a [[i32; 2]],
    members: BTreeMap<i32, Vec<usize>>,
    /// Extrapolated anchor for proto-lines that have no fixations yet.
    phantoms: HashMap<i32, [f64; 2]>,
}

impl<'a> ProtoLines<'a> {
    fn seeded(fixations: &'a [[i32; 2]], seed: Run) -> Self {
        let mut members = BTreeMap::new();
        members.insert(0, seed.collect());
        Self {
            fixations,
            members,
            phantoms: HashMap::new(),
        }
    }

    fn top(&self) -> i32 {
        self.members.keys().next().copied().unwrap_or(0)
    }

    fn bottom(&self) -> i32 {
        self.members.keys().next_back().copied().unwrap_or(0)
    }

    /// Points representing a proto-line: its fixations, or its phantom.
    fn points(&self, key: i32) -> Vec<[f64; 2]> {
        match self.members.get(&key) {
            Some(members) if !members.is_empty() => members
                .iter()
                .map(|&k| [self.fixations[k][0] as f64, self.fixations[k][1] as f64])
                .collect(),
            _ => self.phantoms.get(&key).map(|p| vec![*p]).unwrap_or_default(),
        }
    }

    /// Mean signed vertical offset of `run` from the proto-line, comparing
    /// each fixation with the proto-line point nearest to it in x.
    fn offset_of(&self, run: &Run, anchor: &[[f64; 2]]) -> Option<f64> {
        if anchor.is_empty() {
            return None;
        }
        let mut sum = 0.0;
        for k in run.clone() {
            let [x, y] = self.fixations[k];
            let (x, y) = (x as f64, y as f64);
            let mut nearest = 0;
            for (q, p) in anchor.iter().enumerate() {
                if (p[0] - x).abs() < (anchor[nearest][0] - x).abs() {
                    nearest = q;
                }
            }
            sum += y - anchor[nearest][1];
        }
        Some(sum / run.len() as f64)
    }
}

/// Grow proto-lines outward from the longest run, absorbing runs that sit
/// on or just beside them, then prune and map proto-lines to text lines.
///
/// # Panics
///
/// Panics if `midlines` is empty. [`Method::assign`](super::Method::assign)
/// rejects empty layouts before dispatching here.
pub fn slice(
    fixations: &[[i32; 2]],
    midlines: &[i32],
    right_to_left: bool,
    params: &SliceParams,
) -> Vec<i32> {
    if fixations.is_empty() {
        return Vec::new();
    }
    let line_height = if midlines.len() > 1 {
        (midlines[midlines.len() - 1] - midlines[0]) as f64 / (midlines.len() - 1) as f64
    } else {
        0.0
    };

    let mut runs = split_by_proximity(fixations, params.x_thresh, params.y_thresh);
    let extent = |run: &Run| {
        let dx = fixations[run.end - 1][0] - fixations[run.start][0];
        if right_to_left {
            -dx
        } else {
            dx
        }
    };
    let mut seed = 0;
    for i in 1..runs.len() {
        if extent(&runs[i]) > extent(&runs[seed]) {
            seed = i;
        }
    }
    let mut lines = ProtoLines::seeded(fixations, runs.remove(seed));

    while !runs.is_empty() {
        let mut merged_any = false;
        for (key, direction) in [(lines.top(), -1), (lines.bottom(), 1)] {
            let adjacent = key + direction;
            lines.members.insert(adjacent, Vec::new());
            let anchor = lines.points(key);

            let offsets: Vec<Option<f64>> =
                runs.iter().map(|r| lines.offset_of(r, &anchor)).collect();
            let mut into_current = Vec::new();
            let mut into_adjacent = Vec::new();
            for (i, offset) in offsets.iter().enumerate() {
                let Some(d) = *offset else { continue };
                let signed = d * f64::from(direction);
                if d.abs() < params.w_thresh {
                    into_current.push(i);
                } else if signed >= params.w_thresh && signed < params.n_thresh {
                    into_adjacent.push(i);
                }
            }

            for &i in &into_current {
                lines.members.entry(key).or_default().extend(runs[i].clone());
            }
            for &i in &into_adjacent {
                lines.members.entry(adjacent).or_default().extend(runs[i].clone());
            }
            if into_adjacent.is_empty() && !anchor.is_empty() {
                let n = anchor.len() as f64;
                let mean_x = anchor.iter().map(|p| p[0]).sum::<f64>() / n;
                let mean_y = anchor.iter().map(|p| p[1]).sum::<f64>() / n;
                lines
                    .phantoms
                    .insert(adjacent, [mean_x, mean_y + line_height * f64::from(direction)]);
            }

            let mut taken: Vec<usize> = into_current.into_iter().chain(into_adjacent).collect();
            taken.sort_unstable_by(|a, b| b.cmp(a));
            for i in taken {
                runs.remove(i);
                merged_any = true;
            }
        }
        if !merged_any {
            break;
        }
    }

    // Leftovers join whichever proto-line they sit closest to.
    for run in runs {
        let mut best: Option<(i32, f64)> = None;
        for &key in lines.members.keys() {
            let anchor = lines.points(key);
            let Some(d) = lines.offset_of(&run, &anchor) else {
                continue;
            };
            if best.map_or(true, |(_, best_d)| d.abs() < best_d) {
                best = Some((key, d.abs()));
            }
        }
        let key = best.map(|(k, _)| k).unwrap_or(0);
        lines.members.entry(key).or_default().extend(run);
    }

    while lines.members.len() > midlines.len() {
        let (top, bottom) = (lines.top(), lines.bottom());
        let top_len = lines.members[&top].len();
        let bottom_len = lines.members[&bottom].len();
        let (removed, into) = if top_len < bottom_len {
            (top, top + 1)
        } else {
            (bottom, bottom - 1)
        };
        let moved = lines.members.remove(&removed).unwrap_or_default();
        lines.members.entry(into).or_default().extend(moved);
    }
    debug!(
        "slice: {} proto-lines, sizes {:?}",
        lines.members.len(),
        lines.members.values().map(Vec::len).collect::<Vec<_>>()
    );

    let mut out: Vec<Option<i32>> = vec![None; fixations.len()];
    for (line, members) in lines.members.values().enumerate() {
        for &k in members {
            out[k] = Some(midlines[line]);
        }
    }
    out.into_iter()
        .zip(fixations)
        .map(|(assigned, p)| {
            assigned.unwrap_or_else(|| midlines[nearest_line(midlines, p[1] as f64)])
        })
        .collect()
}
