use crate::methods::Method;
use serde::{Deserialize, Serialize};

/// Wall-clock time spent in one method call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodTiming {
    pub method: Method,
    pub elapsed_ms: f64,
}

/// Per-method timings of a consensus run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub methods: Vec<MethodTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, method: Method, elapsed_ms: f64) {
        self.methods.push(MethodTiming { method, elapsed_ms });
    }

    /// The method that took longest, if any ran.
    pub fn slowest(&self) -> Option<&MethodTiming> {
        self.methods
            .iter()
            .max_by(|a, b| a.elapsed_ms.total_cmp(&b.elapsed_ms))
    }
}
