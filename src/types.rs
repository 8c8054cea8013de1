use serde::{Deserialize, Serialize};

/// A single fixation in screen pixels, with start/end timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixation {
    pub x: i32,
    pub y: i32,
    pub start: i32,
    pub end: i32,
    #[serde(default)]
    pub discarded: bool,
}

impl Fixation {
    pub fn new(x: i32, y: i32, start: i32, end: i32) -> Self {
        Self {
            x,
            y,
            start,
            end,
            discarded: false,
        }
    }

    pub fn duration(&self) -> i32 {
        self.end - self.start
    }

    pub fn xy(&self) -> [i32; 2] {
        [self.x, self.y]
    }
}

/// Chronologically ordered fixations.
///
/// Indices are stable: drift correction only rewrites `y` or sets
/// `discarded`, it never reorders, inserts or removes fixations. Use
/// [`FixationSequence::purge`] to drop discarded fixations explicitly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixationSequence {
    fixations: Vec<Fixation>,
}

impl FixationSequence {
    pub fn new(fixations: Vec<Fixation>) -> Self {
        Self { fixations }
    }

    /// Build a sequence from bare coordinates, giving each fixation a
    /// nominal 100 ms duration laid end to end.
    pub fn from_xy(points: &[[i32; 2]]) -> Self {
        let fixations = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let start = i as i32 * 100;
                Fixation::new(p[0], p[1], start, start + 100)
            })
            .collect();
        Self { fixations }
    }

    pub fn len(&self) -> usize {
        self.fixations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Fixation> {
        self.fixations.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Fixation> {
        self.fixations.get_mut(index)
    }

    pub fn push(&mut self, fixation: Fixation) {
        self.fixations.push(fixation);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fixation> {
        self.fixations.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Fixation> {
        self.fixations.iter_mut()
    }

    pub fn as_slice(&self) -> &[Fixation] {
        &self.fixations
    }

    /// Indices of fixations that are not discarded, in chronological order.
    pub fn active_indices(&self) -> Vec<usize> {
        self.fixations
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.discarded)
            .map(|(i, _)| i)
            .collect()
    }

    /// `[x, y]` of every non-discarded fixation, in chronological order.
    pub fn active_coordinates(&self) -> Vec<[i32; 2]> {
        self.fixations
            .iter()
            .filter(|f| !f.discarded)
            .map(Fixation::xy)
            .collect()
    }

    pub fn active_len(&self) -> usize {
        self.fixations.iter().filter(|f| !f.discarded).count()
    }

    /// Mark fixations shorter than `threshold` as discarded. Returns how many
    /// were newly discarded.
    pub fn discard_short_fixations(&mut self, threshold: i32) -> usize {
        let mut count = 0;
        for f in self.fixations.iter_mut() {
            if !f.discarded && f.duration() < threshold {
                f.discarded = true;
                count += 1;
            }
        }
        count
    }

    /// Remove discarded fixations. This is the only operation that changes
    /// indices.
    pub fn purge(&mut self) {
        self.fixations.retain(|f| !f.discarded);
    }
}

impl From<Vec<Fixation>> for FixationSequence {
    fn from(fixations: Vec<Fixation>) -> Self {
        Self::new(fixations)
    }
}

impl<'a> IntoIterator for &'a FixationSequence {
    type Item = &'a Fixation;
    type IntoIter = std::slice::Iter<'a, Fixation>;

    fn into_iter(self) -> Self::IntoIter {
        self.fixations.iter()
    }
}
