mod common;

use common::reading::{self, expected_lines, FIXATIONS, MIDLINES};
use drift_correct::methods::{self, Method};
use drift_correct::params::{CorrectionParams, StretchParams};
use drift_correct::TextLayout;

fn assign(method: Method, layout: &TextLayout) -> Vec<i32> {
    method
        .assign(&FIXATIONS, layout, &CorrectionParams::default())
        .unwrap_or_else(|e| panic!("{method} failed: {e}"))
}

/// Methods compiled into this build.
fn available() -> impl Iterator<Item = Method> {
    Method::ALL.into_iter().filter(|m| m.is_available())
}

#[test]
fn every_method_recovers_the_reference_lines() {
    common::init_logging();
    let layout = reading::layout();
    for method in available() {
        assert_eq!(assign(method, &layout), expected_lines(), "{method}");
    }
}

#[test]
fn repeated_runs_are_identical() {
    let layout = reading::layout();
    for method in available() {
        assert_eq!(assign(method, &layout), assign(method, &layout), "{method}");
    }
}

#[test]
fn single_line_takes_every_fixation() {
    let layout = TextLayout::regular(200, 64, 380, 40, 60, &[8]);
    for method in available() {
        let out = assign(method, &layout);
        assert_eq!(out.len(), FIXATIONS.len(), "{method}");
        assert!(out.iter().all(|&y| y == 200), "{method}: {out:?}");
    }
}

#[test]
fn outputs_are_midlines_for_short_sequences() {
    let layout = reading::layout();
    let params = CorrectionParams::default();
    let cases: [&[[i32; 2]]; 4] = [
        &[[500, 260]],
        &[[500, 260], [700, 150]],
        &[[500, 260], [500, 260], [500, 260]],
        &FIXATIONS[..5],
    ];
    for points in cases {
        for method in available() {
            let out = method.assign(points, &layout, &params).unwrap();
            assert_eq!(out.len(), points.len(), "{method}");
            assert!(out.iter().all(|y| MIDLINES.contains(y)), "{method}: {out:?}");
        }
    }
}

#[test]
fn right_to_left_reading_is_mirrored() {
    let mirrored: Vec<[i32; 2]> = FIXATIONS.iter().map(|p| [1500 - p[0], p[1]]).collect();
    let layout = TextLayout::from_midlines(MIDLINES.to_vec()).with_right_to_left(true);
    let params = CorrectionParams::default();
    let sequential = [Method::Chain, Method::Merge, Method::Segment, Method::Slice, Method::Split];
    for method in sequential.into_iter().filter(|m| m.is_available()) {
        let out = method.assign(&mirrored, &layout, &params).unwrap();
        assert_eq!(out, expected_lines(), "{method}");
    }
}

#[test]
#[cfg(feature = "optimize")]
fn stretch_undoes_vertical_scaling_where_chain_cannot() {
    let points = reading::stretched_fixations();
    let params = StretchParams {
        stretch_bounds: (0.7, 1.3),
        ..StretchParams::default()
    };
    let fit = methods::stretch(&points, &MIDLINES, &params);
    assert_eq!(fit.assignment, expected_lines());
    assert!(fit.stretch < 1.0, "stretch={}", fit.stretch);

    let chained = methods::chain(&points, &MIDLINES, &Default::default());
    assert_ne!(chained, expected_lines());
}

#[test]
fn warp_can_use_character_centres() {
    // One character box per word is enough to exercise the switch.
    let mut layout = reading::layout();
    layout.characters = layout.words.clone();
    layout.words.clear();

    let mut params = CorrectionParams::default();
    assert!(Method::Warp.assign(&FIXATIONS, &layout, &params).is_err());
    params.warp.reference = drift_correct::params::WarpReference::Characters;
    assert_eq!(
        Method::Warp.assign(&FIXATIONS, &layout, &params).unwrap(),
        expected_lines()
    );
}
