mod common;

use common::reading::{self, expected_lines};
use drift_correct::prelude::*;
use drift_correct::correct_drift;

fn ys(seq: &FixationSequence) -> Vec<i32> {
    seq.iter().map(|f| f.y).collect()
}

#[test]
fn correct_rewrites_only_y() {
    common::init_logging();
    let mut trial = reading::trial();
    let before = trial.clone();
    let report = DriftCorrector::default()
        .correct(Method::Chain, &mut trial, &reading::layout())
        .unwrap();

    assert_eq!(ys(&trial), expected_lines());
    for (after, before) in trial.iter().zip(&before) {
        assert_eq!((after.x, after.start, after.end), (before.x, before.start, before.end));
    }
    let moved = before
        .iter()
        .zip(expected_lines())
        .filter(|(f, y)| f.y != *y)
        .count();
    assert_eq!(report.moved, moved);
    assert_eq!(report.fixations, 25);
}

#[test]
fn copy_leaves_the_input_untouched() {
    let trial = reading::trial();
    let pristine = trial.clone();
    let (corrected, report) = DriftCorrector::default()
        .correct_copy(Method::Warp, &trial, &reading::layout())
        .unwrap();
    assert_eq!(trial, pristine);
    assert_eq!(ys(&corrected), expected_lines());
    assert_eq!(report.method, Method::Warp);
}

#[test]
fn failures_leave_the_sequence_untouched() {
    let mut trial = reading::trial();
    let pristine = trial.clone();
    let params = CorrectionParams::default();

    let err = correct_drift("wrap", &mut trial, &reading::layout(), &params).unwrap_err();
    assert_eq!(err, CorrectionError::UnknownMethod { name: "wrap".into() });
    assert!(err.to_string().contains("warp"), "{err}");

    let no_words = TextLayout::from_midlines(reading::MIDLINES.to_vec());
    let err = correct_drift("warp", &mut trial, &no_words, &params).unwrap_err();
    assert!(matches!(err, CorrectionError::InvalidInput(_)));

    let unsorted = TextLayout::from_midlines(vec![219, 155]);
    assert!(correct_drift("chain", &mut trial, &unsorted, &params).is_err());
    assert_eq!(trial, pristine);
}

#[test]
fn bounces_are_discarded_then_ignored() {
    let layout = reading::layout();
    let corrector = DriftCorrector::default();
    let mut trial = reading::trial_with_bounce();
    let before = trial.clone();

    let report = corrector.reject_bounces(&mut trial, &layout).unwrap();
    assert_eq!(report.discarded, 1);
    assert_eq!(ys(&trial), ys(&before));
    let flagged: Vec<usize> = (0..trial.len())
        .filter(|&i| trial.get(i).map_or(false, |f| f.discarded))
        .collect();
    assert_eq!(flagged, vec![11]);

    corrector.correct(Method::Chain, &mut trial, &layout).unwrap();
    let mut corrected = ys(&trial);
    assert_eq!(corrected.remove(11), 330);
    assert_eq!(corrected, expected_lines());

    trial.purge();
    assert_eq!(trial.len(), 25);
}

#[test]
#[cfg(feature = "clustering")]
fn consensus_of_agreeing_methods() {
    let mut trial = reading::trial();
    let jury = [Method::Chain, Method::Cluster, Method::Merge, Method::Warp];
    let report = DriftCorrector::default()
        .correct_by_consensus(&jury, &mut trial, &reading::layout())
        .unwrap();

    assert_eq!(ys(&trial), expected_lines());
    assert_eq!(report.methods, jury.to_vec());
    assert_eq!(report.timing.methods.len(), jury.len());
    let kappa = report.kappa.expect("four lines in use");
    assert!((kappa - 1.0).abs() < 1e-12, "kappa={kappa}");
}

#[test]
#[cfg(feature = "optimize")]
fn consensus_keeps_the_first_jurors_choice_on_ties() {
    // chain and stretch disagree on the scaled trial; with two jurors every
    // disagreement is a tie and the first juror wins.
    let layout = TextLayout::from_midlines(reading::MIDLINES.to_vec());
    let points = reading::stretched_fixations();
    let params = CorrectionParams::default();
    let chained = Method::Chain.assign(&points, &layout, &params).unwrap();

    let mut trial = FixationSequence::from_xy(&points);
    let report = DriftCorrector::new(params)
        .correct_by_consensus(&[Method::Chain, Method::Stretch], &mut trial, &layout)
        .unwrap();
    assert_eq!(ys(&trial), chained);
    assert!(report.kappa.map_or(true, |k| k <= 1.0 + 1e-12));
}
