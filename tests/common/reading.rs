//! A short reading trial: four lines of text, 25 fixations with the usual
//! vertical scatter, and the line each fixation was actually on.

use drift_correct::{FixationSequence, TextLayout};

pub const MIDLINES: [i32; 4] = [155, 219, 283, 347];

pub const FIXATIONS: [[i32; 2]; 25] = [
    [395, 150],
    [479, 152],
    [619, 155],
    [670, 168],
    [726, 142],
    [912, 161],
    [1086, 176],
    [401, 212],
    [513, 199],
    [594, 219],
    [725, 200],
    [806, 215],
    [884, 189],
    [1000, 220],
    [1133, 218],
    [379, 288],
    [472, 281],
    [651, 286],
    [684, 290],
    [804, 284],
    [908, 289],
    [1024, 275],
    [401, 352],
    [621, 359],
    [803, 336],
];

/// Reference line per fixation: 7, 8, 7 and 3 fixations per line.
pub fn expected_lines() -> Vec<i32> {
    [(155, 7), (219, 8), (283, 7), (347, 3)]
        .iter()
        .flat_map(|&(y, n)| std::iter::repeat(y).take(n))
        .collect()
}

/// Eight words per line (five on the last), centres 100 px apart from
/// x = 400, vertically centred on the midlines.
pub fn layout() -> TextLayout {
    TextLayout::regular(155, 64, 380, 40, 60, &[8, 8, 8, 5])
}

pub fn trial() -> FixationSequence {
    FixationSequence::from_xy(&FIXATIONS)
}

/// The trial with the reader's vertical scale inflated by a quarter around
/// the first line.
pub fn stretched_fixations() -> Vec<[i32; 2]> {
    const Y: [i32; 25] = [
        149, 151, 155, 171, 139, 162, 181, 226, 210, 235, 211, 230, 198, 236, 234, 321, 312, 319,
        324, 316, 322, 305, 401, 410, 381,
    ];
    FIXATIONS.iter().zip(Y).map(|(p, y)| [p[0], y]).collect()
}

/// The trial with a stray fixation far below the line being read, inserted
/// after the eleventh fixation.
pub fn trial_with_bounce() -> FixationSequence {
    let mut points = FIXATIONS.to_vec();
    points.insert(11, [760, 330]);
    FixationSequence::from_xy(&points)
}
