use crate::methods::Method;
use crate::params::CorrectionParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct CorrectToolConfig {
    /// JSON array of fixations (`x`, `y`, `start`, `end`, optional `discarded`).
    pub fixations: PathBuf,
    /// JSON text layout (`midlines`, optional `words`, `characters`,
    /// `rightToLeft`).
    pub layout: PathBuf,
    /// Single method to apply. Mutually exclusive with `jury`.
    #[serde(default)]
    pub method: Option<Method>,
    /// Methods whose majority vote is applied.
    #[serde(default)]
    pub jury: Vec<Method>,
    #[serde(default)]
    pub params: CorrectionParams,
    /// Fixations shorter than this many milliseconds are discarded first.
    #[serde(default)]
    pub min_duration_ms: Option<i32>,
    /// Discard bounces (see `params.bounce`) before correcting.
    #[serde(default)]
    pub reject_bounces: bool,
    pub output: CorrectOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct CorrectOutputConfig {
    /// Corrected fixations, same format as the input.
    pub fixations: PathBuf,
    /// Optional JSON report of what was done.
    #[serde(default)]
    pub report: Option<PathBuf>,
}

/// What the tool should run.
#[derive(Clone, Debug, PartialEq)]
pub enum CorrectionMode {
    Single(Method),
    Consensus(Vec<Method>),
}

impl CorrectToolConfig {
    /// What to run. Fails when the config is ambiguous or names a method
    /// this build was compiled without.
    pub fn mode(&self) -> Result<CorrectionMode, String> {
        if let Some(missing) = self
            .method
            .iter()
            .chain(&self.jury)
            .find(|m| !m.is_available())
        {
            return Err(format!(
                "Method `{missing}` needs the `{}` feature",
                missing.required_capability().unwrap_or_default()
            ));
        }
        match (self.method, self.jury.len()) {
            (Some(method), 0) => Ok(CorrectionMode::Single(method)),
            (None, n) if n >= 2 => Ok(CorrectionMode::Consensus(self.jury.clone())),
            (None, 0) => Err("Config must name a `method` or a `jury`".to_string()),
            (None, _) => Err("A `jury` needs at least two methods".to_string()),
            (Some(_), _) => Err("Config may name a `method` or a `jury`, not both".to_string()),
        }
    }
}

pub fn load_config(path: &Path) -> Result<CorrectToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: CorrectToolConfig = serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    config
        .mode()
        .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CorrectToolConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn single_method_with_partial_params() {
        let config = parse(
            r#"{
                "fixations": "trial.json",
                "layout": "layout.json",
                "method": "slice",
                "params": { "slice": { "w_thresh": 40 } },
                "output": { "fixations": "out/trial.json" }
            }"#,
        );
        assert_eq!(config.mode(), Ok(CorrectionMode::Single(Method::Slice)));
        assert_eq!(config.params.slice.w_thresh, 40.0);
        assert_eq!(config.params.slice.n_thresh, 90.0);
        assert!(!config.reject_bounces);
        assert!(config.output.report.is_none());
    }

    #[test]
    fn jury_and_method_are_exclusive() {
        let config = parse(
            r#"{
                "fixations": "a", "layout": "b",
                "method": "chain", "jury": ["chain", "warp"],
                "output": { "fixations": "c" }
            }"#,
        );
        assert!(config.mode().is_err());

        let config = parse(
            r#"{
                "fixations": "a", "layout": "b",
                "jury": ["chain", "warp", "merge"],
                "output": { "fixations": "c" }
            }"#,
        );
        assert_eq!(
            config.mode(),
            Ok(CorrectionMode::Consensus(vec![Method::Chain, Method::Warp, Method::Merge]))
        );
    }

    #[test]
    #[cfg(not(feature = "optimize"))]
    fn methods_missing_from_the_build_are_rejected() {
        let config = parse(
            r#"{
                "fixations": "a", "layout": "b",
                "jury": ["chain", "stretch"],
                "output": { "fixations": "c" }
            }"#,
        );
        let err = config.mode().unwrap_err();
        assert!(err.contains("stretch") && err.contains("optimize"), "{err}");
    }

    #[test]
    fn missing_file_mentions_path() {
        let err = load_config(Path::new("/nonexistent/correct.json")).unwrap_err();
        assert!(err.contains("/nonexistent/correct.json"), "{err}");
    }
}
