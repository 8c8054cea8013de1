//! Text geometry consumed by the line assigners.
//!
//! Layout itself (fonts, wrapping, glyph metrics) happens elsewhere; this
//! module only describes what drift correction needs to know about it:
//! - the vertical centre of every rendered line ("midline"), top to bottom;
//! - the centres of words and characters in reading order (for `warp`);
//! - whether the script runs right to left, which flips saccade signs.

use crate::error::CorrectionError;
use serde::{Deserialize, Serialize};

/// Source of line positions and reference points for drift correction.
pub trait LineGeometry {
    /// Strictly ascending y-coordinates of line centres.
    fn midlines(&self) -> &[i32];

    /// Word centres in reading order.
    fn word_centers(&self) -> Vec<[i32; 2]>;

    /// Character centres in reading order.
    fn character_centers(&self) -> Vec<[i32; 2]>;

    fn right_to_left(&self) -> bool {
        false
    }
}

/// Axis-aligned box in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Integer centre, rounding toward the top-left.
    pub fn center(&self) -> [i32; 2] {
        [self.x + self.width / 2, self.y + self.height / 2]
    }
}

/// Pre-computed layout of a block of text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayout {
    pub midlines: Vec<i32>,
    #[serde(default)]
    pub words: Vec<Region>,
    #[serde(default)]
    pub characters: Vec<Region>,
    #[serde(default)]
    pub right_to_left: bool,
}

impl TextLayout {
    /// Layout with line positions only (no word or character boxes).
    pub fn from_midlines(midlines: Vec<i32>) -> Self {
        Self {
            midlines,
            ..Default::default()
        }
    }

    /// Evenly spaced layout: `words_per_line[i]` words of `word_width` pixels
    /// on line `i`, starting at `left` and separated by `gap` pixels.
    pub fn regular(
        first_midline: i32,
        line_height: i32,
        left: i32,
        word_width: i32,
        gap: i32,
        words_per_line: &[usize],
    ) -> Self {
        let mut midlines = Vec::with_capacity(words_per_line.len());
        let mut words = Vec::new();
        for (line, &count) in words_per_line.iter().enumerate() {
            let midline = first_midline + line as i32 * line_height;
            midlines.push(midline);
            let top = midline - line_height / 2;
            for w in 0..count {
                let x = left + w as i32 * (word_width + gap);
                words.push(Region::new(x, top, word_width, line_height));
            }
        }
        Self {
            midlines,
            words,
            characters: Vec::new(),
            right_to_left: false,
        }
    }

    pub fn with_right_to_left(mut self, right_to_left: bool) -> Self {
        self.right_to_left = right_to_left;
        self
    }
}

impl LineGeometry for TextLayout {
    fn midlines(&self) -> &[i32] {
        &self.midlines
    }

    fn word_centers(&self) -> Vec<[i32; 2]> {
        self.words.iter().map(Region::center).collect()
    }

    fn character_centers(&self) -> Vec<[i32; 2]> {
        self.characters.iter().map(Region::center).collect()
    }

    fn right_to_left(&self) -> bool {
        self.right_to_left
    }
}

/// Reject empty or non strictly ascending midlines.
pub fn validate_midlines(midlines: &[i32]) -> Result<(), CorrectionError> {
    if midlines.is_empty() {
        return Err(CorrectionError::invalid("geometry has no text lines"));
    }
    if let Some(i) = midlines.windows(2).position(|w| w[1] <= w[0]) {
        return Err(CorrectionError::invalid(format!(
            "midlines must be strictly ascending (line {} at y={} follows y={})",
            i + 1,
            midlines[i + 1],
            midlines[i]
        )));
    }
    Ok(())
}
