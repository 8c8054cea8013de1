use drift_correct::config::correct::{self, CorrectionMode};
use drift_correct::io::{load_fixations, load_layout, write_json_file};
use drift_correct::{ConsensusReport, CorrectionReport, DriftCorrector};
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
    short_fixations_discarded: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounces: Option<CorrectionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correction: Option<CorrectionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    consensus: Option<ConsensusReport>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = correct::load_config(Path::new(&config_path))?;
    let mode = config.mode()?;

    let mut fixations = load_fixations(&config.fixations)?;
    let layout = load_layout(&config.layout)?;
    let corrector = DriftCorrector::new(config.params.clone());

    let short_fixations_discarded = config
        .min_duration_ms
        .map(|ms| fixations.discard_short_fixations(ms))
        .unwrap_or(0);

    let bounces = if config.reject_bounces {
        Some(
            corrector
                .reject_bounces(&mut fixations, &layout)
                .map_err(|e| e.to_string())?,
        )
    } else {
        None
    };

    let mut report = RunReport {
        short_fixations_discarded,
        bounces,
        correction: None,
        consensus: None,
    };
    match mode {
        CorrectionMode::Single(method) => {
            let r = corrector
                .correct(method, &mut fixations, &layout)
                .map_err(|e| e.to_string())?;
            println!(
                "{}: {} of {} fixations moved ({:.3} ms)",
                r.method, r.moved, r.fixations, r.elapsed_ms
            );
            report.correction = Some(r);
        }
        CorrectionMode::Consensus(methods) => {
            let r = corrector
                .correct_by_consensus(&methods, &mut fixations, &layout)
                .map_err(|e| e.to_string())?;
            let kappa = r
                .kappa
                .map(|k| format!("{k:.3}"))
                .unwrap_or_else(|| "undefined".to_string());
            println!(
                "consensus of {} methods: {} of {} fixations moved, kappa {kappa}",
                r.methods.len(),
                r.moved,
                r.fixations
            );
            if let Some(slowest) = r.timing.slowest() {
                println!(
                    "slowest juror: {} ({:.3} ms of {:.3} ms)",
                    slowest.method, slowest.elapsed_ms, r.timing.total_ms
                );
            }
            report.consensus = Some(r);
        }
    }

    write_json_file(&config.output.fixations, &fixations)?;
    println!("Saved corrected fixations to {}", config.output.fixations.display());
    if let Some(path) = &config.output.report {
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: drift_correct <config.json>".to_string()
}
